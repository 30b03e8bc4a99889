//! Unified error handling for the storefront binary.
//!
//! Library modules return their own error types; this aggregates them
//! for the startup path and the event loop, which mix configuration,
//! storage, cart and terminal IO failures.

use thiserror::Error;

use crate::cart::CartError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shared storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Terminal or file IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for application-level operations.
pub type Result<T> = std::result::Result<T, AppError>;
