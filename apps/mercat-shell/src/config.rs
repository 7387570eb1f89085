//! # Shell Configuration
//!
//! Configuration read once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MERCAT_*`)
//! 2. Defaults (this file)
//!
//! `RUST_LOG`, when set, takes precedence over `MERCAT_LOG` for the log filter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default tracing filter when neither `RUST_LOG` nor `MERCAT_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,mercat=info";

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    /// Store name printed in the receipt header.
    pub store_name: String,

    /// How receipts are written at checkout.
    pub receipt_format: ReceiptFormat,

    /// Tracing filter directives.
    pub log_filter: String,
}

/// Receipt output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptFormat {
    /// The printed ticket.
    #[default]
    Text,

    /// The receipt serialized as pretty JSON.
    Json,
}

impl FromStr for ReceiptFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(ReceiptFormat::Text),
            "json" => Ok(ReceiptFormat::Json),
            _ => Err(ConfigError::InvalidValue("MERCAT_RECEIPT_FORMAT".to_string())),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            store_name: "SAPAMERCAT".to_string(),
            receipt_format: ReceiptFormat::Text,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ShellConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MERCAT_STORE_NAME`: receipt header
    /// - `MERCAT_RECEIPT_FORMAT`: `text` or `json`
    /// - `MERCAT_LOG`: tracing filter
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ShellConfig::default();

        if let Some(store_name) = lookup("MERCAT_STORE_NAME") {
            if store_name.trim().is_empty() {
                return Err(ConfigError::InvalidValue("MERCAT_STORE_NAME".to_string()));
            }
            config.store_name = store_name;
        }

        if let Some(format) = lookup("MERCAT_RECEIPT_FORMAT") {
            config.receipt_format = format.parse()?;
        }

        if let Some(filter) = lookup("MERCAT_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Filter directives to install, given the value of `RUST_LOG`.
    ///
    /// A non-blank `RUST_LOG` wins; otherwise the configured filter is used.
    pub fn effective_log_filter<'a>(&'a self, rust_log: Option<&'a str>) -> &'a str {
        match rust_log {
            Some(directives) if !directives.trim().is_empty() => directives,
            _ => &self.log_filter,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
