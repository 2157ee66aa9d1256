//! Unified error handling.
//!
//! Provides a unified `AppError` type for callers that drive the storefront
//! end to end (such as the CLI). Cart operations themselves never fail; only
//! startup and checkout do.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::checkout::CheckoutError;
use crate::services::order_relay::RelayError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Order relay client could not be built.
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Requested book does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
