//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `BOUTIQUE_DATA_DIR` - Directory for storage and logs
//!   (default: the platform data directory plus `boutique`)
//! - `BOUTIQUE_WATCH_INTERVAL_MS` - How often to poll the storage file
//!   for writes by other processes, in milliseconds (default: 500)
//! - `BOUTIQUE_LOG_FILE` - Log destination
//!   (default: `boutique.log` inside the data directory)
//! - `RUST_LOG` - Tracing filter, read by the subscriber at startup

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the storage document and log file
    pub data_dir: PathBuf,
    /// Poll interval for picking up writes from other processes
    pub watch_interval: Duration,
    /// Where tracing output goes while the terminal UI owns the screen
    pub log_file: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from the environment, reading a `.env` file
    /// first if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value, or
    /// if no data directory can be determined at all.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let data_dir = resolve_data_dir(get_optional_env("BOUTIQUE_DATA_DIR"))?;
        let watch_interval =
            parse_watch_interval(&get_env_or_default("BOUTIQUE_WATCH_INTERVAL_MS", "500"))?;
        let log_file = get_optional_env("BOUTIQUE_LOG_FILE")
            .map_or_else(|| data_dir.join("boutique.log"), PathBuf::from);

        Ok(Self {
            data_dir,
            watch_interval,
            log_file,
        })
    }

    /// Path of the shared storage document.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Pick the data directory: the override when given, otherwise the
/// platform data directory.
fn resolve_data_dir(configured: Option<String>) -> Result<PathBuf, ConfigError> {
    configured.map_or_else(
        || {
            dirs::data_dir()
                .map(|dir| dir.join("boutique"))
                .ok_or_else(|| ConfigError::MissingEnvVar("BOUTIQUE_DATA_DIR".to_string()))
        },
        |dir| Ok(PathBuf::from(dir)),
    )
}

/// Parse the watch interval, rejecting zero so the watcher never spins.
fn parse_watch_interval(raw: &str) -> Result<Duration, ConfigError> {
    let millis: u64 = raw.parse().map_err(|_| {
        ConfigError::InvalidEnvVar(
            "BOUTIQUE_WATCH_INTERVAL_MS".to_string(),
            format!("not a number of milliseconds: {raw}"),
        )
    })?;
    if millis == 0 {
        return Err(ConfigError::InvalidEnvVar(
            "BOUTIQUE_WATCH_INTERVAL_MS".to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_millis(millis))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
