//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CART_WIDGET_HOST` - Bind address (default: 127.0.0.1)
//! - `CART_WIDGET_PORT` - Listen port (default: 3000)
//! - `CART_API_URL` - Remote cart endpoint (default: the Shopify CDN cart fixture)
//! - `CART_API_TIMEOUT_SECS` - Remote fetch timeout in seconds (default: none)
//! - `CART_STORAGE_PATH` - Key-value store file (default: cart-storage.json)
//! - `CART_STORAGE_KEY` - Key the cart is stored under (default: cart)
//! - `CART_STATIC_DIR` - Static asset directory (default: crates/widget/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::remote::DEFAULT_CART_API_URL;
use crate::storage::DEFAULT_CART_KEY;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart widget application configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote cart endpoint configuration
    pub remote: RemoteConfig,
    /// Local persistence configuration
    pub storage: StorageConfig,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote cart endpoint configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// URL fetched when local storage holds no cart
    pub url: Url,
    /// Request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

/// Local persistence configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the key-value store file
    pub path: PathBuf,
    /// Key the cart is stored under
    pub key: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            remote: RemoteConfig::default(),
            storage: StorageConfig::default(),
            static_dir: PathBuf::from("crates/widget/static"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_cart_api_url(),
            timeout: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cart-storage.json"),
            key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl WidgetConfig {
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

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_or(&lookup, "CART_WIDGET_HOST", defaults.host)?;
        let port = parse_or(&lookup, "CART_WIDGET_PORT", defaults.port)?;
        let url = parse_or(&lookup, "CART_API_URL", defaults.remote.url)?;
        validate_http_url(&url, "CART_API_URL")?;
        let timeout = match lookup("CART_API_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_value(
                "CART_API_TIMEOUT_SECS",
                &raw,
            )?)),
            None => None,
        };
        let key = lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage.key);
        if key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            remote: RemoteConfig { url, timeout },
            storage: StorageConfig {
                path: lookup("CART_STORAGE_PATH").map_or(defaults.storage.path, PathBuf::from),
                key,
            },
            static_dir: lookup("CART_STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_cart_api_url() -> Url {
    Url::parse(DEFAULT_CART_API_URL).expect("default cart API URL is valid")
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Only http(s) endpoints can be fetched.
fn validate_http_url(url: &Url, key: &str) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}
