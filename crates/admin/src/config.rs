//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MURTI_API_URL` - Base URL of the store REST API (default: `http://localhost:5000/api`)
//! - `MURTI_API_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `MURTI_TOKEN_FILE` - Where file-backed sessions keep the auth token
//!   (default: `<config dir>/murti/session.json`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL used when `MURTI_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Window after which an unsettled request is aborted.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const TOKEN_FILE_NAME: &str = "session.json";
const APP_DIR_NAME: &str = "murti";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Could not determine a directory for the session file; set MURTI_TOKEN_FILE")]
    NoConfigDir,
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to (no trailing slash)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL is not an absolute
    /// `http`/`https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url("MURTI_API_URL", base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_env_or_default("MURTI_API_URL", DEFAULT_API_URL);
        let base_url = normalize_base_url("MURTI_API_URL", &base_url)?;

        let timeout = match get_optional_env("MURTI_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("MURTI_API_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "MURTI_API_TIMEOUT_SECS".to_string(),
                        "must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }
}

/// Resolve where a file-backed session should keep its token.
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` if `MURTI_TOKEN_FILE` is unset and the
/// platform has no configuration directory.
pub fn token_file_from_env() -> Result<PathBuf, ConfigError> {
    if let Some(path) = get_optional_env("MURTI_TOKEN_FILE") {
        return Ok(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(TOKEN_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Validate a base URL and strip any trailing slash.
fn normalize_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let parsed = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar(var.to_string(), e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var.to_string(),
            format!("unsupported scheme: {}", parsed.scheme()),
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
