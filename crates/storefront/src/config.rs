//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `CATALOG_API_URL` - Base URL of the catalog API (default: `https://dummyjson.com`)
//! - `CATALOG_CATEGORIES` - Comma-separated categories fetched for "all"
//!   (default: smartphones,groceries,kitchen-accessories)
//! - `STOREFRONT_DEFAULT_LIMIT` - Per-category item limit for the initial render (default: 3)
//! - `STOREFRONT_DATA_DIR` - Directory holding the persisted cart snapshot (default: data)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Categories fetched for the "all" selection when `CATALOG_CATEGORIES` is unset.
const DEFAULT_CATEGORIES: &str = "smartphones,groceries,kitchen-accessories";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory holding the persisted cart snapshot
    pub data_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without a trailing slash
    pub base_url: String,
    /// Categories fetched concurrently for the "all" selection
    pub categories: Vec<String>,
    /// Per-category item limit used for the initial render
    pub default_limit: u32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or the category
    /// list is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;

        let catalog = CatalogConfig::from_env()?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", "data"));
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            catalog,
            data_dir,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("CATALOG_API_URL", "https://dummyjson.com")
            .trim_end_matches('/')
            .to_string();

        let categories = parse_categories(&get_env_or_default(
            "CATALOG_CATEGORIES",
            DEFAULT_CATEGORIES,
        ));
        if categories.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_CATEGORIES".to_string(),
                "category list is empty".to_string(),
            ));
        }

        let default_limit = get_env_or_default("STOREFRONT_DEFAULT_LIMIT", "3")
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_DEFAULT_LIMIT".to_string(), e.to_string())
            })?;
        if default_limit == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_DEFAULT_LIMIT".to_string(),
                "limit must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            categories,
            default_limit,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Split a comma-separated category list, dropping empty segments.
fn parse_categories(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
