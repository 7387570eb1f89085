//! # Money Module
//!
//! Two-decimal currency rendering for listings and receipts.
//!
//! ## Where floats stop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pricing formulas (expiry discount, warranty premium) work in f64:      │
//! │    100.0 - 100.0 * (1/3) + 10.0 = 76.666...                             │
//! │                                                                         │
//! │  Anything shown to a customer goes through Money first:                 │
//! │    Money::from_amount(76.666...) → 7667 cents → "76.67 EUR"             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CURRENCY;

/// A monetary value in euro cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use mercat_core::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99 EUR");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a computed amount to the nearest cent (halves away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use mercat_core::Money;
    ///
    /// assert_eq!(Money::from_amount(76.666).cents(), 7667);
    /// assert_eq!(Money::from_amount(0.125).cents(), 13);
    /// ```
    pub fn from_amount(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole euros, truncated toward zero.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Amount without the currency label, e.g. `"10.99"`.
    pub fn amount_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.euros().abs(), self.cents_part())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount_string(), CURRENCY)
    }
}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money::from_amount(amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
