//! Theme commands operating on the shared storage document.
//!
//! # Usage
//!
//! ```bash
//! bq theme show
//! bq theme set light
//! ```
//!
//! # Environment Variables
//!
//! - `BOUTIQUE_DATA_DIR` - Overrides where the storage document lives

use std::sync::Arc;

use boutique_storefront::config::{ConfigError, StorefrontConfig};
use boutique_storefront::storage::{FileStorage, SharedStorage, StorageError};
use boutique_storefront::theme::{Theme, ThemePreference};
use thiserror::Error;

/// Errors that can occur during theme commands.
#[derive(Debug, Error)]
pub enum ThemeCommandError {
    /// The theme token was not recognized.
    #[error("Invalid theme: {0}. Valid themes: light, dark")]
    InvalidTheme(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The storage document could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Print the current theme name.
///
/// # Errors
///
/// Returns an error if configuration or storage cannot be opened.
pub fn show() -> Result<(), ThemeCommandError> {
    let preference = open_preference()?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", preference.theme());
    }

    Ok(())
}

/// Persist a theme choice for every session sharing the document.
///
/// # Errors
///
/// Returns an error if the token is not `light` or `dark`, or the
/// document cannot be written.
pub fn set(theme: &str) -> Result<(), ThemeCommandError> {
    let theme: Theme = theme
        .parse()
        .map_err(|_| ThemeCommandError::InvalidTheme(theme.to_owned()))?;
    let mut preference = open_preference()?;
    preference.set(theme)?;

    tracing::info!("Theme set to {theme}");
    Ok(())
}

fn open_preference() -> Result<ThemePreference, ThemeCommandError> {
    let config = StorefrontConfig::from_env()?;
    let storage = FileStorage::open(config.storage_path())?;
    let storage: Arc<dyn SharedStorage> = Arc::new(storage);
    Ok(ThemePreference::open(storage))
}
