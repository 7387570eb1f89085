//! # Shell Error Type
//!
//! Everything that can interrupt a menu action.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator input ──► decode / parse ──► InvalidInput / InvalidNumber ... │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  mercat-core ─────► ValidationError / CoreError                         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Menu prints "Error: {message}" and shows the menu again.               │
//! │  Only Io and EndOfInput stop the loop.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use mercat_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Business rule violation reported by the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A field rejected by a validation function before construction.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{field} must be a number, got '{input}'")]
    InvalidNumber { field: &'static str, input: String },

    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid option '{0}'. Try again.")]
    InvalidOption(String),

    /// A line that could not be decoded as UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidInput,

    #[error("could not serialize receipt: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input stream closed.
    #[error("end of input")]
    EndOfInput,
}

impl ShellError {
    /// Whether the menu can carry on after reporting this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ShellError::Io(_) | ShellError::EndOfInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_messages_pass_through() {
        let err: ShellError = CoreError::InvalidCategory("toys".into()).into();
        assert!(err.to_string().starts_with("invalid product type 'toys'"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_undecodable_input_is_recoverable() {
        assert!(ShellError::InvalidInput.is_recoverable());
    }

    #[test]
    fn test_stream_errors_are_fatal() {
        assert!(!ShellError::EndOfInput.is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!ShellError::from(io).is_recoverable());
    }
}
