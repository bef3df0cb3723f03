//! Configuration management for aboutgen
//!
//! Settings are loaded from environment variables with sensible defaults. CLI
//! flags override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `ABOUTGEN_MODEL`: Generation model - default: "gemini-2.5-flash"
//! - `ABOUTGEN_GITHUB_API_URL`: Hosting API base URL - default: "https://api.github.com"
//! - `ABOUTGEN_REQUEST_TIMEOUT`: Transport timeout in seconds - default: "30"
//! - `ABOUTGEN_LOG_LEVEL`: Logging level - default: "info"
//! - `ABOUTGEN_BIND`: Listen address for `aboutgen serve` - default: "127.0.0.1:3000"
//!
//! ## Credentials
//!
//! Credentials are not stored in [`AboutgenConfig`]. They are read from the
//! process environment each time they are needed, so a missing key is always
//! reported against the current environment:
//!
//! - `GEMINI_API_KEY`, `API_KEY`, or `NEXT_PUBLIC_API_KEY`: generation service key (required)
//! - `GITHUB_TOKEN`: hosting API token (optional)

use std::env;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Generation service key variables, in lookup order
pub const GENERATION_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "API_KEY", "NEXT_PUBLIC_API_KEY"];

/// Hosting API token variable
pub const HOSTING_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Hosting client could not be built
    #[error("Failed to initialize GitHub client: {0}")]
    HostInitError(String),
}

/// Runtime configuration for aboutgen
#[derive(Debug, Clone)]
pub struct AboutgenConfig {
    /// Generation model name
    pub model: String,

    /// Hosting API base URL
    pub github_api_url: String,

    /// Transport timeout in seconds, applied to every outbound call
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Listen address for the HTTP front door
    pub bind: String,
}

impl Default for AboutgenConfig {
    fn default() -> Self {
        let model = env::var("ABOUTGEN_MODEL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let github_api_url = env::var("ABOUTGEN_GITHUB_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let request_timeout_secs = env::var("ABOUTGEN_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let log_level = env::var("ABOUTGEN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let bind = env::var("ABOUTGEN_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());

        Self {
            model,
            github_api_url,
            request_timeout_secs,
            log_level,
            bind,
        }
    }
}

impl AboutgenConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` for an out-of-range timeout, an
    /// unknown log level, an empty model, or a non-http(s) API URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Model name cannot be empty".to_string(),
            ));
        }

        if !(self.github_api_url.starts_with("http://")
            || self.github_api_url.starts_with("https://"))
        {
            return Err(ConfigError::ValidationFailed(format!(
                "GitHub API URL must start with http:// or https://: {}",
                self.github_api_url
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl fmt::Display for AboutgenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Aboutgen Configuration:")?;
        writeln!(f, "  Model: {}", self.model)?;
        writeln!(f, "  GitHub API: {}", self.github_api_url)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(
            f,
            "  Generation Key: {}",
            if generation_api_key().is_some() { "set" } else { "missing" }
        )?;
        writeln!(
            f,
            "  GitHub Token: {}",
            if hosting_token().is_some() { "set" } else { "not set" }
        )?;
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Generation service key from the current environment
pub fn generation_api_key() -> Option<String> {
    GENERATION_KEY_VARS.iter().find_map(|name| non_empty_var(name))
}

/// Hosting API token from the current environment
pub fn hosting_token() -> Option<String> {
    non_empty_var(HOSTING_TOKEN_VAR)
}
