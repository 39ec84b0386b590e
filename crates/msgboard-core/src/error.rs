//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur while talking to the message API.
///
/// Every variant carries plain strings so the error can travel inside GUI
/// messages, which must be `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No response was received (server unreachable, timeout, dropped body).
    #[error("No response from {url}: {reason}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying transport failure.
        reason: String,
    },

    /// The server answered with a non-2xx status.
    #[error("Server returned {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    Request(String),

    /// A response arrived but did not have the expected shape.
    #[error("Unexpected payload from {url}: {reason}")]
    Format {
        /// Requested URL.
        url: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if no response was received at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns the HTTP status for [`Error::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classifies a `reqwest` failure for the given URL.
    pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Request(err.to_string())
        } else {
            Self::Transport {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Request(err.to_string())
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = Error::Status {
            url: "http://localhost:8000/db-config".into(),
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_transport());
        assert_eq!(
            err.to_string(),
            "Server returned 500 for http://localhost:8000/db-config"
        );
    }

    #[test]
    fn test_url_error_is_request_error() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::Request(_)));
    }
}
