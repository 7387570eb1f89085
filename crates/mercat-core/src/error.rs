//! # Error Types
//!
//! Domain-specific error types for mercat-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mercat-core errors (this file)                                        │
//! │  ├── ValidationError  - A single field failed its check                │
//! │  └── CoreError        - Operation failures (category, cart limit)      │
//! │                                                                         │
//! │  mercat-shell errors (app)                                             │
//! │  └── ShellError       - Input parsing + wrapped CoreError              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ShellError → message on console   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is recoverable by the caller. A failed operation never
//! leaves a product or the cart partially modified.

use chrono::NaiveDate;
use thiserror::Error;

use crate::MAX_CART_PRODUCTS;

// =============================================================================
// Validation Error
// =============================================================================

/// A field value that does not meet its legality rule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value must be strictly positive (prices) or non-negative (warranty).
    #[error("{field} cannot be negative or zero")]
    NegativeValue { field: &'static str },

    /// Length or character-set violation (barcode, name, composition).
    #[error("{field} {reason}")]
    LengthLimit { field: &'static str, reason: String },

    /// Expiry date lies before the reference day.
    #[error("expiry date {date} cannot be earlier than today ({today})")]
    ExpiredDate { date: NaiveDate, today: NaiveDate },
}

impl ValidationError {
    pub(crate) fn length_limit(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::LengthLimit {
            field,
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core operation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The product-type selector is not one of the known categories.
    #[error("invalid product type '{0}': expected perishable, textile or electronic")]
    InvalidCategory(String),

    /// The cart already holds the maximum number of distinct products.
    #[error("cannot add more than {max} products to the cart")]
    LimitExceeded { max: usize },

    /// A field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn cart_full() -> Self {
        CoreError::LimitExceeded {
            max: MAX_CART_PRODUCTS,
        }
    }

    /// Returns the error kind, flattening wrapped validation errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidCategory(_) => ErrorKind::InvalidCategory,
            CoreError::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            CoreError::Validation(v) => v.kind(),
        }
    }
}

impl ValidationError {
    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::NegativeValue { .. } => ErrorKind::NegativeValue,
            ValidationError::LengthLimit { .. } => ErrorKind::LengthLimit,
            ValidationError::ExpiredDate { .. } => ErrorKind::ExpiredDate,
        }
    }
}

/// The flat taxonomy of everything that can go wrong in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NegativeValue,
    LengthLimit,
    ExpiredDate,
    InvalidCategory,
    LimitExceeded,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::cart_full();
        assert_eq!(err.to_string(), "cannot add more than 100 products to the cart");

        let err = ValidationError::NegativeValue { field: "price" };
        assert_eq!(err.to_string(), "price cannot be negative or zero");

        let err = ValidationError::length_limit("barcode", "must contain only digits");
        assert_eq!(err.to_string(), "barcode must contain only digits");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::NegativeValue { field: "price" }.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        // transparent: the wrapped message is shown as-is
        assert_eq!(core_err.to_string(), "price cannot be negative or zero");
    }

    #[test]
    fn test_kind_flattens_validation() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        let err: CoreError = ValidationError::ExpiredDate { date, today }.into();
        assert_eq!(err.kind(), ErrorKind::ExpiredDate);

        assert_eq!(
            CoreError::InvalidCategory("toys".into()).kind(),
            ErrorKind::InvalidCategory
        );
        assert_eq!(CoreError::cart_full().kind(), ErrorKind::LimitExceeded);
    }
}
