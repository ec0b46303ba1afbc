//! Unified error handling.
//!
//! Provides an `AppError` type wrapping every engine error so callers (the
//! CLI, a UI shell) can use a single `Result`. Nothing in here is fatal to a
//! session: each variant is recovered by whoever receives it.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::persistence::{PersistenceError, StorageError};

/// Application-level error type for the storefront engine.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog data failed validation.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout refused.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Saving the cart failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Storage backend could not be opened or used.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether the error is an expected user-facing condition rather than a
    /// wiring or environment problem.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Checkout(_) | Self::Cart(_))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
