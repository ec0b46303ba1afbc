//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EAUDUMAROC_DATA_DIR` - Directory holding the persisted cart (default: `.eaudumaroc`)
//! - `EAUDUMAROC_STORAGE_KEY` - Slot the cart is saved under (default: `eaudumaroc-cart`)
//! - `EAUDUMAROC_CHECKOUT_CLEAR_DELAY_MS` - Delay before a confirmed checkout
//!   clears the cart, in milliseconds (default: 2000)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::checkout::DEFAULT_CLEAR_DELAY;
use crate::persistence::{DEFAULT_STORAGE_KEY, is_valid_key};

const DEFAULT_DATA_DIR: &str = ".eaudumaroc";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed cart slot
    pub data_dir: PathBuf,
    /// Key-value slot holding the cart
    pub storage_key: String,
    /// Delay between checkout confirmation and cart clear
    pub checkout_clear_delay: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            checkout_clear_delay: DEFAULT_CLEAR_DELAY,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("EAUDUMAROC_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let storage_key = match lookup("EAUDUMAROC_STORAGE_KEY") {
            Some(key) if is_valid_key(&key) => key,
            Some(key) => {
                return Err(ConfigError::InvalidEnvVar(
                    "EAUDUMAROC_STORAGE_KEY".to_string(),
                    format!("{key:?} must be non-empty and use only [A-Za-z0-9_.-]"),
                ));
            }
            None => defaults.storage_key,
        };

        let checkout_clear_delay = match lookup("EAUDUMAROC_CHECKOUT_CLEAR_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "EAUDUMAROC_CHECKOUT_CLEAR_DELAY_MS".to_string(),
                        e.to_string(),
                    )
                })?,
            None => defaults.checkout_clear_delay,
        };

        Ok(Self {
            data_dir,
            storage_key,
            checkout_clear_delay,
        })
    }
}
