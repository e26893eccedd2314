//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TOOLQUOTE_CATALOG_URL` - Product feed endpoint (JSON array of products)
//! - `TOOLQUOTE_QUOTE_URL` - Quote generation endpoint (`/send` is appended
//!   for dispatch)
//! - `TOOLQUOTE_QUOTE_RECIPIENTS` - Comma-separated sales inbox addresses
//!
//! ## Optional
//! - `TOOLQUOTE_STORAGE_PATH` - Key-value store file (default:
//!   `.toolquote/store.json`)
//! - `TOOLQUOTE_REFRESH_SECS` - Catalog refresh period in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use toolquote_core::Email;

/// Default catalog refresh period.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Product feed endpoint.
    pub catalog_url: Url,
    /// Quote generation endpoint.
    pub quote_url: Url,
    /// Sales inbox addresses the generated quote is emailed to.
    pub recipients: Vec<Email>,
    /// Path of the durable key-value store file.
    pub storage_path: PathBuf,
    /// Catalog refresh period.
    pub refresh_interval: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_url("TOOLQUOTE_CATALOG_URL")?;
        let quote_url = get_url("TOOLQUOTE_QUOTE_URL")?;
        let recipients = parse_recipients(
            "TOOLQUOTE_QUOTE_RECIPIENTS",
            &get_required_env("TOOLQUOTE_QUOTE_RECIPIENTS")?,
        )?;
        let storage_path = PathBuf::from(get_env_or_default(
            "TOOLQUOTE_STORAGE_PATH",
            ".toolquote/store.json",
        ));
        let refresh_secs = get_env_or_default(
            "TOOLQUOTE_REFRESH_SECS",
            &DEFAULT_REFRESH_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("TOOLQUOTE_REFRESH_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            catalog_url,
            quote_url,
            recipients,
            storage_path,
            refresh_interval: Duration::from_secs(refresh_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required environment variable parsed as a URL.
fn get_url(key: &str) -> Result<Url, ConfigError> {
    let value = get_required_env(key)?;
    Url::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a comma-separated recipient list, validating each address.
fn parse_recipients(key: &str, raw: &str) -> Result<Vec<Email>, ConfigError> {
    let recipients = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Email::parse(s).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if recipients.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "at least one recipient address is required".to_string(),
        ));
    }
    Ok(recipients)
}
