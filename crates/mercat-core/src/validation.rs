//! # Validation Module
//!
//! Field legality checks for Mercat products.
//!
//! These functions are the single source of truth for what a legal field
//! looks like. Product constructors and every setter that changes a
//! validated field call them; the shell also calls them directly to reject
//! raw input as soon as it is typed.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell prompt                                                 │
//! │  ├── Parse raw text (number, date)                                     │
//! │  └── THIS MODULE: reject the field right after it is typed             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Product constructors / setters                               │
//! │  └── THIS MODULE again: nothing illegal ever becomes a Product         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mercat_core::validation::{validate_barcode, validate_price};
//!
//! assert!(validate_barcode("8410001").is_ok());
//! assert!(validate_price(0.0).is_err());
//! ```

use chrono::{Local, NaiveDate};

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_BARCODE_LEN, MAX_COMPOSITION_LEN, VALID_COMPOSITIONS};

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a base price.
///
/// ## Rules
/// - Must be strictly positive (zero is not a price)
/// - Must be a finite number
///
/// ## Example
/// ```rust
/// use mercat_core::validation::validate_price;
///
/// assert!(validate_price(9.99).is_ok());
/// assert!(validate_price(0.0).is_err());
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::NegativeValue { field: "price" });
    }

    Ok(())
}

/// Validates a warranty length in days. Zero days is a valid warranty.
pub fn validate_warranty_days(days: i64) -> ValidationResult<()> {
    if days < 0 {
        return Err(ValidationError::NegativeValue { field: "warranty" });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode.
///
/// ## Rules
/// - Between 1 and 13 characters
/// - ASCII digits only
///
/// ## Example
/// ```rust
/// use mercat_core::validation::validate_barcode;
///
/// assert!(validate_barcode("12345").is_ok());
/// assert!(validate_barcode("12345678901234").is_err());
/// assert!(validate_barcode("12A45").is_err());
/// ```
pub fn validate_barcode(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::length_limit("barcode", "cannot be empty"));
    }

    if code.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::length_limit(
            "barcode",
            format!("cannot be longer than {} characters", MAX_BARCODE_LEN),
        ));
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::length_limit(
            "barcode",
            "must contain only digits",
        ));
    }

    Ok(())
}

/// Validates a textile composition.
///
/// ## Rules
/// - At most 100 characters
/// - One of `cotton`, `wool`, `silk`, ignoring case
pub fn validate_composition(text: &str) -> ValidationResult<()> {
    if text.chars().count() > MAX_COMPOSITION_LEN {
        return Err(ValidationError::length_limit(
            "composition",
            format!("cannot be longer than {} characters", MAX_COMPOSITION_LEN),
        ));
    }

    if !VALID_COMPOSITIONS
        .iter()
        .any(|valid| valid.eq_ignore_ascii_case(text))
    {
        return Err(ValidationError::length_limit(
            "composition",
            format!("must be one of: {}", VALID_COMPOSITIONS.join(", ")),
        ));
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - Letters (accented letters included) and spaces only
///
/// ## Example
/// ```rust
/// use mercat_core::validation::validate_name;
///
/// assert!(validate_name("Pa de pagès").is_ok());
/// assert!(validate_name("Cola 330").is_err());
/// ```
pub fn validate_name(text: &str) -> ValidationResult<()> {
    if text.trim().is_empty() {
        return Err(ValidationError::length_limit("name", "cannot be empty"));
    }

    if !text.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err(ValidationError::length_limit(
            "name",
            "may only contain letters and spaces",
        ));
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates an expiry date against the local calendar day.
pub fn validate_expiry(date: NaiveDate) -> ValidationResult<()> {
    validate_expiry_on(date, Local::now().date_naive())
}

/// Validates an expiry date against an explicit reference day.
///
/// Expiring today is still allowed; only strictly earlier dates fail.
pub fn validate_expiry_on(date: NaiveDate, today: NaiveDate) -> ValidationResult<()> {
    if date < today {
        return Err(ValidationError::ExpiredDate { date, today });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
