//! # Products
//!
//! The closed set of product categories sold at Mercat and their pricing.
//!
//! ## Type Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Product                                      │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  name        "Llet sencera"      letters and spaces                     │
//! │  base_price  1.20                > 0                                    │
//! │  barcode     "8410001"           1-13 digits, identity in the cart      │
//! │  category ───┐                                                          │
//! │              ▼                                                          │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐        │
//! │  │   Perishable     │ │     Textile      │ │   Electronic     │        │
//! │  │  expiry_date     │ │  composition     │ │  warranty_days   │        │
//! │  │  cheaper near    │ │  base price      │ │  +10% per year   │        │
//! │  │  expiry, 0 after │ │  unchanged       │ │  of warranty     │        │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - A `Product` value only exists if every field passed validation.
//! - Setters re-run the constructor's check and leave the field untouched
//!   on failure.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::error::{CoreError, CoreResult, ValidationResult};
use crate::money::Money;
use crate::validation::{
    validate_barcode, validate_composition, validate_expiry_on, validate_name, validate_price,
    validate_warranty_days,
};

/// Date format used when displaying expiry dates.
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Markup applied to every perishable good on top of the expiry discount.
const PERISHABLE_MARKUP: f64 = 0.1;

/// Price premium for one full year of warranty.
const WARRANTY_ANNUAL_PREMIUM: f64 = 0.1;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// =============================================================================
// Pricing Contract
// =============================================================================

/// Anything that can produce its current selling price.
///
/// Implementations must be free of side effects. The result may depend on
/// the calendar day (perishable goods) but on nothing else outside `self`.
pub trait Calculable {
    fn compute_price(&self) -> f64;
}

// =============================================================================
// Product Type Selector
// =============================================================================

/// The category an operator picks before entering product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Perishable,
    Textile,
    Electronic,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::Perishable,
        ProductType::Textile,
        ProductType::Electronic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Perishable => "perishable",
            ProductType::Textile => "textile",
            ProductType::Electronic => "electronic",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = CoreError;

    /// Parses a category selector, ignoring case and surrounding spaces.
    ///
    /// ```rust
    /// use mercat_core::ProductType;
    ///
    /// assert_eq!("Textile".parse::<ProductType>().unwrap(), ProductType::Textile);
    /// assert!("toys".parse::<ProductType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "perishable" | "food" | "alimentacio" => Ok(ProductType::Perishable),
            "textile" | "textil" => Ok(ProductType::Textile),
            "electronic" | "electronics" | "electronica" => Ok(ProductType::Electronic),
            _ => Err(CoreError::InvalidCategory(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Category Payloads
// =============================================================================

/// Food and other goods with an expiry date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Perishable {
    expiry_date: NaiveDate,
}

impl Perishable {
    #[inline]
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Moves the expiry date. Dates before today are rejected.
    pub fn set_expiry_date(&mut self, date: NaiveDate) -> ValidationResult<()> {
        self.set_expiry_date_on(date, today())
    }

    /// Moves the expiry date, checking it against an explicit day.
    pub fn set_expiry_date_on(&mut self, date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
        validate_expiry_on(date, today)?;
        self.expiry_date = date;
        Ok(())
    }

    /// Whole days from `today` until expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expiry_date - today).num_days()
    }

    /// ## Formula
    /// ```text
    /// d < 0   → 0
    /// d >= 0  → base - base / (d + 1) + base * 0.1
    ///
    ///   d = 0 (expires today)  → 0.10 × base
    ///   d = 1                  → 0.60 × base
    ///   d = 9                  → 1.00 × base
    /// ```
    fn price_on(&self, base_price: f64, today: NaiveDate) -> f64 {
        let days = self.days_until_expiry(today);
        if days < 0 {
            return 0.0;
        }

        base_price - base_price * (1.0 / (days + 1) as f64) + base_price * PERISHABLE_MARKUP
    }
}

/// Clothing. Composition groups textiles in cart listings; it never
/// affects price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Textile {
    composition: String,
}

impl Textile {
    #[inline]
    pub fn composition(&self) -> &str {
        &self.composition
    }

    pub fn set_composition(&mut self, composition: impl Into<String>) -> ValidationResult<()> {
        let composition = composition.into();
        validate_composition(&composition)?;
        self.composition = composition;
        Ok(())
    }
}

/// Devices sold with a warranty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Electronic {
    warranty_days: i64,
}

impl Electronic {
    #[inline]
    pub fn warranty_days(&self) -> i64 {
        self.warranty_days
    }

    pub fn set_warranty_days(&mut self, days: i64) -> ValidationResult<()> {
        validate_warranty_days(days)?;
        self.warranty_days = days;
        Ok(())
    }

    /// `base + base × (warranty_days / 365) × 0.1`
    fn price(&self, base_price: f64) -> f64 {
        base_price + base_price * (self.warranty_days as f64 / 365.0) * WARRANTY_ANNUAL_PREMIUM
    }
}

/// Category-specific data carried by a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Category {
    Perishable(Perishable),
    Textile(Textile),
    Electronic(Electronic),
}

impl Category {
    pub fn product_type(&self) -> ProductType {
        match self {
            Category::Perishable(_) => ProductType::Perishable,
            Category::Textile(_) => ProductType::Textile,
            Category::Electronic(_) => ProductType::Electronic,
        }
    }
}

impl fmt::Display for Category {
    /// The suffix appended to a product's display string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Perishable(p) => {
                write!(f, " | Expires on: {}", p.expiry_date.format(DISPLAY_DATE_FORMAT))
            }
            Category::Textile(t) => write!(f, " | Composition: {}", t.composition),
            Category::Electronic(e) => write!(f, " | Warranty: {} days", e.warranty_days),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product that can be placed in a [`Cart`](crate::Cart).
///
/// Built through one of the category constructors, all of which validate
/// in the same order: price, barcode, name, then the category field. The
/// first failing check is returned and no product is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    name: String,
    base_price: f64,
    barcode: String,
    category: Category,
}

impl Product {
    /// Creates a perishable good. The expiry date may be today but not earlier.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{Duration, Local};
    /// use mercat_core::Product;
    ///
    /// let tomorrow = Local::now().date_naive() + Duration::days(1);
    /// let milk = Product::perishable("Llet", 1.20, "8410001", tomorrow).unwrap();
    /// assert_eq!(milk.barcode(), "8410001");
    /// ```
    pub fn perishable(
        name: impl Into<String>,
        base_price: f64,
        barcode: impl Into<String>,
        expiry_date: NaiveDate,
    ) -> CoreResult<Self> {
        Self::perishable_as_of(name, base_price, barcode, expiry_date, today())
    }

    /// Creates a perishable good, checking the expiry against `today`.
    pub fn perishable_as_of(
        name: impl Into<String>,
        base_price: f64,
        barcode: impl Into<String>,
        expiry_date: NaiveDate,
        today: NaiveDate,
    ) -> CoreResult<Self> {
        Self::build(name.into(), base_price, barcode.into(), || {
            validate_expiry_on(expiry_date, today)?;
            Ok(Category::Perishable(Perishable { expiry_date }))
        })
    }

    /// Creates a textile good.
    ///
    /// The composition is stored as typed; matching against the valid
    /// set ignores case.
    pub fn textile(
        name: impl Into<String>,
        base_price: f64,
        barcode: impl Into<String>,
        composition: impl Into<String>,
    ) -> CoreResult<Self> {
        let composition = composition.into();
        Self::build(name.into(), base_price, barcode.into(), || {
            validate_composition(&composition)?;
            Ok(Category::Textile(Textile { composition }))
        })
    }

    /// Creates an electronic good. A warranty of zero days is allowed.
    pub fn electronic(
        name: impl Into<String>,
        base_price: f64,
        barcode: impl Into<String>,
        warranty_days: i64,
    ) -> CoreResult<Self> {
        Self::build(name.into(), base_price, barcode.into(), || {
            validate_warranty_days(warranty_days)?;
            Ok(Category::Electronic(Electronic { warranty_days }))
        })
    }

    fn build<F>(name: String, base_price: f64, barcode: String, category: F) -> CoreResult<Self>
    where
        F: FnOnce() -> ValidationResult<Category>,
    {
        validate_price(base_price)?;
        validate_barcode(&barcode)?;
        validate_name(&name)?;
        let category = category()?;

        Ok(Product {
            name,
            base_price,
            barcode,
            category,
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    #[inline]
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    #[inline]
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Mutable access to the category payload. Its setters validate.
    #[inline]
    pub fn category_mut(&mut self) -> &mut Category {
        &mut self.category
    }

    #[inline]
    pub fn product_type(&self) -> ProductType {
        self.category.product_type()
    }

    pub fn as_textile(&self) -> Option<&Textile> {
        match &self.category {
            Category::Textile(t) => Some(t),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Validated setters
    // -------------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_base_price(&mut self, base_price: f64) -> ValidationResult<()> {
        validate_price(base_price)?;
        self.base_price = base_price;
        Ok(())
    }

    pub fn set_barcode(&mut self, barcode: impl Into<String>) -> ValidationResult<()> {
        let barcode = barcode.into();
        validate_barcode(&barcode)?;
        self.barcode = barcode;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Selling price on a given calendar day.
    pub fn price_on(&self, today: NaiveDate) -> f64 {
        match &self.category {
            Category::Perishable(p) => p.price_on(self.base_price, today),
            Category::Textile(_) => self.base_price,
            Category::Electronic(e) => e.price(self.base_price),
        }
    }
}

impl Calculable for Product {
    fn compute_price(&self) -> f64 {
        self.price_on(today())
    }
}

impl fmt::Display for Product {
    /// `"{name} ({barcode}) - {base price} EUR"` plus the category suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}{}",
            self.name,
            self.barcode,
            Money::from_amount(self.base_price),
            self.category
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use chrono::Duration;

    const EPS: f64 = 1e-9;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn milk(expiry: NaiveDate, today: NaiveDate) -> Product {
        Product::perishable_as_of("Llet", 20.0, "8410001", expiry, today).unwrap()
    }

    #[test]
    fn test_perishable_price_on_expiry_day() {
        let today = day(2024, 6, 1);
        let product = milk(today, today);
        // base - base * 1.0 + base * 0.1
        assert!((product.price_on(today) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_perishable_price_after_expiry_is_zero() {
        let expiry = day(2024, 6, 1);
        let product = milk(expiry, expiry);
        assert_eq!(product.price_on(expiry + Duration::days(1)), 0.0);
        assert_eq!(product.price_on(expiry + Duration::days(30)), 0.0);
    }

    #[test]
    fn test_perishable_price_drops_as_expiry_approaches() {
        let today = day(2024, 6, 1);
        let product = milk(today + Duration::days(2), today);
        // 20 - 20/3 + 2
        assert!((product.price_on(today) - (22.0 - 20.0 / 3.0)).abs() < EPS);

        let far = product.price_on(today);
        let near = product.price_on(today + Duration::days(1));
        let last = product.price_on(today + Duration::days(2));
        assert!(far > near && near > last);
    }

    #[test]
    fn test_electronic_price_with_one_year_warranty() {
        let laptop = Product::electronic("Portatil", 100.0, "12345", 365).unwrap();
        assert!((laptop.compute_price() - 110.0).abs() < EPS);

        let no_warranty = Product::electronic("Cable", 100.0, "12346", 0).unwrap();
        assert!((no_warranty.compute_price() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_textile_price_is_base_price() {
        for composition in ["cotton", "WOOL", "Silk"] {
            let shirt = Product::textile("Samarreta", 14.95, "777", composition).unwrap();
            assert_eq!(shirt.compute_price(), 14.95);
        }
    }

    #[test]
    fn test_construction_rejects_invalid_common_fields() {
        let err = Product::textile("Jersei", 0.0, "123", "wool").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);

        let err = Product::textile("Jersei", 10.0, "12345678901234", "wool").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthLimit);

        let err = Product::electronic("Radio 2000", 10.0, "123", 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthLimit);
    }

    #[test]
    fn test_price_is_checked_before_barcode() {
        let err = Product::electronic("Radio", -1.0, "bad code", 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);
    }

    #[test]
    fn test_construction_rejects_invalid_category_fields() {
        let today = day(2024, 6, 1);
        let err = Product::perishable_as_of("Iogurt", 1.0, "1", day(2024, 5, 31), today).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExpiredDate);

        let err = Product::textile("Jaqueta", 50.0, "2", "polyester").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthLimit);

        let err = Product::electronic("Mobil", 300.0, "3", -5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NegativeValue);
    }

    #[test]
    fn test_setters_validate_and_keep_old_value_on_failure() {
        let mut product = Product::textile("Bufanda", 12.0, "555", "wool").unwrap();

        assert!(product.set_base_price(0.0).is_err());
        assert_eq!(product.base_price(), 12.0);

        assert!(product.set_barcode("55A").is_err());
        assert_eq!(product.barcode(), "555");

        assert!(product.set_name("Bufanda 2").is_err());
        assert_eq!(product.name(), "Bufanda");

        product.set_base_price(15.0).unwrap();
        product.set_name("Bufanda llarga").unwrap();
        assert_eq!(product.base_price(), 15.0);
        assert_eq!(product.name(), "Bufanda llarga");
    }

    #[test]
    fn test_category_setters_validate() {
        let today = day(2024, 6, 1);
        let mut product = milk(today + Duration::days(3), today);

        if let Category::Perishable(p) = product.category_mut() {
            assert!(p.set_expiry_date_on(day(2024, 5, 1), today).is_err());
            assert_eq!(p.expiry_date(), day(2024, 6, 4));
            p.set_expiry_date_on(today, today).unwrap();
            assert_eq!(p.days_until_expiry(today), 0);
        } else {
            panic!("expected a perishable product");
        }

        let mut radio = Product::electronic("Radio", 40.0, "9", 30).unwrap();
        if let Category::Electronic(e) = radio.category_mut() {
            assert!(e.set_warranty_days(-1).is_err());
            assert_eq!(e.warranty_days(), 30);
        }

        let mut shirt = Product::textile("Camisa", 20.0, "10", "silk").unwrap();
        if let Category::Textile(t) = shirt.category_mut() {
            assert!(t.set_composition("linen").is_err());
            t.set_composition("Cotton").unwrap();
        }
        assert_eq!(shirt.as_textile().map(|t| t.composition()), Some("Cotton"));
    }

    #[test]
    fn test_display() {
        let today = day(2024, 6, 1);
        let product = milk(day(2024, 6, 9), today);
        assert_eq!(
            product.to_string(),
            "Llet (8410001) - 20.00 EUR | Expires on: 09/06/2024"
        );

        let shirt = Product::textile("Samarreta", 9.5, "777", "cotton").unwrap();
        assert_eq!(
            shirt.to_string(),
            "Samarreta (777) - 9.50 EUR | Composition: cotton"
        );

        let radio = Product::electronic("Radio", 40.0, "9", 730).unwrap();
        assert_eq!(radio.to_string(), "Radio (9) - 40.00 EUR | Warranty: 730 days");
    }

    #[test]
    fn test_product_type_parsing() {
        assert_eq!("perishable".parse::<ProductType>().unwrap(), ProductType::Perishable);
        assert_eq!(" TEXTIL ".parse::<ProductType>().unwrap(), ProductType::Textile);
        assert_eq!("Electronics".parse::<ProductType>().unwrap(), ProductType::Electronic);

        let err = "furniture".parse::<ProductType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCategory);
        assert!(err.to_string().contains("furniture"));

        for kind in ProductType::ALL {
            assert_eq!(kind.as_str().parse::<ProductType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serializes_with_category_tag() {
        let radio = Product::electronic("Radio", 40.0, "9", 30).unwrap();
        let json = serde_json::to_value(&radio).unwrap();
        assert_eq!(json["category"]["type"], "electronic");
        assert_eq!(json["category"]["warranty_days"], 30);
        assert_eq!(json["barcode"], "9");
    }
}
