//! # Cart
//!
//! The shopping cart for one checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation              Effect                                          │
//! │  ─────────              ──────                                          │
//! │                                                                         │
//! │  add_product(p) ──────► new barcode: push (p, qty 1)                    │
//! │                         known barcode: qty += 1, p is dropped           │
//! │                         101st barcode: LimitExceeded, nothing changes   │
//! │                                                                         │
//! │  listing() ───────────► textiles by composition, then the rest in       │
//! │                         insertion order (read only)                     │
//! │                                                                         │
//! │  search(code) ────────► first product with that barcode (read only)     │
//! │                                                                         │
//! │  checkout() ──────────► take all entries (cart is now empty), sort by   │
//! │                         price, price each line, total → Receipt         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries are unique by barcode (adding the same barcode increases quantity)
//! - Every entry has quantity >= 1 (increments saturate at `u64::MAX`)
//! - At most [`MAX_CART_PRODUCTS`] entries; quantities are unbounded
//!
//! The cart owns its products. Callers only ever see shared references, so
//! a barcode inside the cart cannot be changed behind its back.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::ordering::{by_composition, by_price};
use crate::product::{Product, Textile};
use crate::MAX_CART_PRODUCTS;

/// Timestamp format printed on receipts.
const RECEIPT_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Width of the receipt separator lines.
const RECEIPT_WIDTH: usize = 32;

/// A product in the cart together with how many units were added.
#[derive(Debug, Clone)]
struct CartEntry {
    product: Product,
    quantity: u64,
}

/// The shopping cart.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Barcode already in cart: its quantity goes up by one. The stored
    ///   product keeps its original fields; `product` is discarded.
    /// - New barcode: the product is stored with quantity 1.
    ///
    /// ## Errors
    /// [`CoreError::LimitExceeded`] when the barcode is new and the cart
    /// already holds [`MAX_CART_PRODUCTS`] distinct products. The cart is
    /// left unchanged.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.product.barcode() == product.barcode())
        {
            entry.quantity = entry.quantity.saturating_add(1);
            return Ok(());
        }

        if self.entries.len() >= MAX_CART_PRODUCTS {
            return Err(CoreError::cart_full());
        }

        self.entries.push(CartEntry {
            product,
            quantity: 1,
        });
        Ok(())
    }

    /// Looks a product up by exact barcode.
    pub fn search(&self, barcode: &str) -> Option<&Product> {
        self.entries
            .iter()
            .map(|e| &e.product)
            .find(|p| p.barcode() == barcode)
    }

    /// Units of the given barcode in the cart, if present.
    pub fn quantity_of(&self, barcode: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.product.barcode() == barcode)
            .map(|e| e.quantity)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units across all products.
    pub fn total_units(&self) -> u64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Builds the cart listing without prices.
    ///
    /// Textiles come first, sorted by composition; everything else follows
    /// in the order it was first added.
    pub fn listing(&self) -> CartListing {
        let mut textiles: Vec<(&Textile, &CartEntry)> = Vec::new();
        let mut others: Vec<&CartEntry> = Vec::new();
        for entry in &self.entries {
            match entry.product.as_textile() {
                Some(textile) => textiles.push((textile, entry)),
                None => others.push(entry),
            }
        }

        textiles.sort_by(|(a, _), (b, _)| by_composition(a, b));

        let lines = textiles
            .into_iter()
            .map(|(_, entry)| entry)
            .chain(others)
            .map(|e| ListingLine {
                name: e.product.name().to_string(),
                quantity: e.quantity,
            })
            .collect();

        CartListing { lines }
    }

    /// Prices the cart, returns the receipt and empties the cart.
    pub fn checkout(&mut self) -> Receipt {
        self.checkout_at(Local::now())
    }

    /// Checkout with an explicit timestamp. Perishable goods are priced
    /// for the calendar day of `now`.
    ///
    /// The entries are taken out of the cart in one step before any pricing
    /// happens, so the cart is never observed half-cleared.
    pub fn checkout_at(&mut self, now: DateTime<Local>) -> Receipt {
        let mut entries = std::mem::take(&mut self.entries);
        entries.sort_by(|a, b| by_price(&a.product, &b.product));

        let today = now.date_naive();
        let lines: Vec<ReceiptLine> = entries
            .into_iter()
            .map(|e| {
                let unit_price = e.product.price_on(today);
                ReceiptLine {
                    barcode: e.product.barcode().to_string(),
                    name: e.product.name().to_string(),
                    quantity: e.quantity,
                    unit_price,
                    line_total: unit_price * e.quantity as f64,
                }
            })
            .collect();

        let grand_total: f64 = lines.iter().map(|l| l.line_total).sum();

        Receipt {
            id: Uuid::new_v4(),
            issued_at: now,
            lines,
            grand_total,
        }
    }
}

// =============================================================================
// Listing
// =============================================================================

/// One row of the cart listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLine {
    pub name: String,
    pub quantity: u64,
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.quantity > 1 { "s" } else { "" };
        write!(f, "{} - {} unit{}", self.name, self.quantity, plural)
    }
}

/// The ordered, price-free view of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartListing {
    pub lines: Vec<ListingLine>,
}

impl CartListing {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for CartListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            return f.write_str("cart is empty");
        }

        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A priced line on a receipt. Amounts are unrounded; rounding to cents
/// happens only when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub barcode: String,
    pub name: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Snapshot of a cart at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub issued_at: DateTime<Local>,
    /// Lines ordered by base price, cheapest first.
    pub lines: Vec<ReceiptLine>,
    pub grand_total: f64,
}

impl Receipt {
    pub fn grand_total(&self) -> Money {
        Money::from_amount(self.grand_total)
    }

    /// Renders the printed ticket.
    ///
    /// ```text
    /// --------- SAPAMERCAT ---------
    /// Date: 19/10/2026 18:30:00
    /// --------------------------------
    /// Bufanda     1  5.00 EUR  5.00 EUR
    /// Jersei      2  10.00 EUR  20.00 EUR
    /// --------------------------------
    /// Total: 25.00 EUR
    /// ```
    pub fn render(&self, store_name: &str) -> String {
        let rule = "-".repeat(RECEIPT_WIDTH);
        let mut out = String::new();

        out.push_str(&format!("--------- {} ---------\n", store_name));
        out.push_str(&format!(
            "Date: {}\n",
            self.issued_at.format(RECEIPT_TIME_FORMAT)
        ));
        out.push_str(&rule);
        out.push('\n');

        for line in &self.lines {
            out.push_str(&format!(
                "{:<10} {:>2}  {}  {}\n",
                line.name,
                line.quantity,
                Money::from_amount(line.unit_price),
                Money::from_amount(line.line_total)
            ));
        }

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Total: {}\n", self.grand_total()));
        out
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
