//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TAVOLA_API_BASE_URL` - Backend API origin including the `/api` prefix
//!   (default: `http://localhost:5000/api`)
//! - `TAVOLA_REQUEST_TIMEOUT_SECS` - Uniform request timeout in seconds
//!   (default: 10)
//! - `TAVOLA_CREDENTIALS_PATH` - Path for the file-backed credential store;
//!   when unset, callers typically use the in-memory store

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default backend base URL, matching a local development backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default uniform request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API base URL. All endpoint paths are joined under this.
    pub base_url: Url,
    /// Uniform request timeout applied to every call.
    pub timeout: Duration,
    /// Path for file-backed credential storage, if configured.
    pub credentials_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_env_or_default(
            "TAVOLA_API_BASE_URL",
            DEFAULT_BASE_URL,
        ))?;
        let timeout_secs = get_env_or_default(
            "TAVOLA_REQUEST_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("TAVOLA_REQUEST_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        let credentials_path = get_optional_env("TAVOLA_CREDENTIALS_PATH").map(PathBuf::from);

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            credentials_path,
        })
    }

    /// Build a configuration pointing at the given base URL, with defaults
    /// for everything else. Mostly useful in tests and embedding scenarios.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` is not a valid http(s) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credentials_path: None,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("TAVOLA_API_BASE_URL".to_string(), e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            "TAVOLA_API_BASE_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
