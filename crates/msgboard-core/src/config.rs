//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "MSGBOARD_API_URL";

/// Base URL used when no override is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Server-side cap on the number of messages returned per fetch.
pub const DEFAULT_MESSAGE_LIMIT: u32 = 100;

/// Settings for [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the message API.
    pub base_url: Url,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// `limit` query parameter sent with message fetches.
    pub message_limit: u32,
}

impl Default for ClientConfig {
    #[allow(clippy::expect_used)] // Constant URL always parses
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            timeout: DEFAULT_TIMEOUT,
            message_limit: DEFAULT_MESSAGE_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL does not parse or is not an
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| Error::Config(format!("invalid API URL `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API URL `{base_url}` must be an http or https URL"
            )));
        }
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Reads the base URL from [`API_URL_ENV`], falling back to [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the override is set but not a valid URL.
    pub fn from_env() -> Result<Self> {
        Self::from_override(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Builds a configuration from an optional override value.
    ///
    /// Blank overrides are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the override is not a valid URL.
    pub fn from_override(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the message fetch limit.
    #[must_use]
    pub const fn with_message_limit(mut self, limit: u32) -> Self {
        self.message_limit = limit;
        self
    }

    /// Resolves an endpoint path against the base URL.
    ///
    /// Paths are joined relative to the base, so a base with a path prefix
    /// (`http://host/api/`) keeps it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Request`] if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.message_limit, 100);
    }

    #[test]
    fn test_override() {
        let config = ClientConfig::from_override(Some("http://api.internal:9000")).unwrap();
        assert_eq!(config.base_url.as_str(), "http://api.internal:9000/");

        let config = ClientConfig::from_override(Some("   ")).unwrap();
        assert_eq!(config, ClientConfig::default());

        let config = ClientConfig::from_override(None).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_invalid_override() {
        let err = ClientConfig::from_override(Some("localhost without scheme")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_non_http_urls() {
        for raw in ["localhost:8000", "ftp://host/api", "mailto:ops@example.com"] {
            let err = ClientConfig::new(raw).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{raw:?}: {err:?}");
        }
        assert!(ClientConfig::new("https://api.example.com").is_ok());
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = ClientConfig::new("http://host:8000/api").unwrap();
        assert_eq!(
            config.endpoint("/messages/dates").unwrap().as_str(),
            "http://host:8000/api/messages/dates"
        );

        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint("db-config").unwrap().as_str(),
            "http://localhost:8000/db-config"
        );
    }
}
