//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_CATALOG_PATH` - Path to a catalog JSON file (default:
//!   compiled-in seed catalog)
//! - `STOREFRONT_DATA_DIR` - Directory for persisted state such as the cart
//!   (default: `.bazaar`)
//! - `RUST_LOG` - Tracing filter, handled by `tracing_subscriber::EnvFilter`

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".bazaar";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Path to the catalog JSON file; `None` means the builtin seed catalog.
    pub catalog_path: Option<PathBuf>,
    /// Directory holding persisted state (the cart blob).
    pub data_dir: PathBuf,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable has an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let catalog_path = parse_path("STOREFRONT_CATALOG_PATH", env_value("STOREFRONT_CATALOG_PATH"))?;
        let data_dir = parse_path("STOREFRONT_DATA_DIR", env_value("STOREFRONT_DATA_DIR"))?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            catalog_path,
            data_dir,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Interpret an optional path variable; set-but-empty is an error.
fn parse_path(name: &str, value: Option<String>) -> Result<Option<PathBuf>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(Some(PathBuf::from(value))),
        None => Ok(None),
    }
}
