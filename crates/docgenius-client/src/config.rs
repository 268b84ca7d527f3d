// Client configuration
// The backend base URL is resolved and validated once, then carried by value
// into every client built from this config.

use crate::error::{ApiError, Result};
use std::time::Duration;
use url::Url;

/// Environment variable holding the backend origin (plus optional path prefix)
pub const BASE_URL_ENV: &str = "DOCGENIUS_API_BASE_URL";

/// Polling schedule used while waiting for a document to finish processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 30,
        }
    }
}

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    /// Per-request timeout (none by default)
    pub request_timeout: Option<Duration>,
    pub poll: PollConfig,
}

impl ClientConfig {
    /// Build a config from an explicit base URL
    ///
    /// Fails with [`ApiError::Config`] when the value is blank, unparseable,
    /// or not an http(s) URL. There is no fallback host.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            base_url: resolve_base_url(base_url.as_ref())?,
            request_timeout: None,
            poll: PollConfig::default(),
        })
    }

    /// Resolve the base URL from [`BASE_URL_ENV`]
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(BASE_URL_ENV).map_err(|_| {
            ApiError::Config(format!(
                "{} environment variable is required but not set",
                BASE_URL_ENV
            ))
        })?;
        Self::new(value)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Base URL without a trailing slash; endpoint paths are appended verbatim
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

fn resolve_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Config(format!(
            "{} is required but empty",
            BASE_URL_ENV
        )));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| ApiError::Config(format!("Invalid base URL '{}': {}", trimmed, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ApiError::Config(format!(
                "Base URL must use http or https, got '{}'",
                other
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(ApiError::Config(format!("Base URL '{}' has no host", trimmed)));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("https://api.example.com/").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(
            config.endpoint_url("/health"),
            "https://api.example.com/health"
        );
    }

    #[test]
    fn test_path_prefix_kept() {
        let config = ClientConfig::new("http://localhost:8000/api/v1").unwrap();
        assert_eq!(
            config.endpoint_url("/pdf/ask"),
            "http://localhost:8000/api/v1/pdf/ask"
        );
    }

    #[test]
    fn test_blank_base_url_is_config_error() {
        let err = ClientConfig::new("   ").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(ClientConfig::new("not a url").unwrap_err().is_config());
        assert!(ClientConfig::new("ftp://files.example.com")
            .unwrap_err()
            .is_config());
    }

    // Only test in this crate that touches BASE_URL_ENV
    #[test]
    fn test_from_env_requires_variable() {
        std::env::remove_var(BASE_URL_ENV);
        let err = ClientConfig::from_env().unwrap_err();
        assert!(err.is_config());
        assert!(err.message().contains(BASE_URL_ENV));

        std::env::set_var(BASE_URL_ENV, "http://localhost:8000/");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");

        std::env::remove_var(BASE_URL_ENV);
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://localhost:8000").unwrap();
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.poll, PollConfig::default());

        let config = config.with_timeout(Duration::from_secs(30));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }
}
