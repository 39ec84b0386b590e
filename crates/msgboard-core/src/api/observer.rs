//! Request observability hook.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use url::Url;

use crate::error::Error;

/// Receives one event per request, and then exactly one of a response or
/// an error event.
pub trait RequestObserver: Send + Sync {
    /// A request is about to be sent.
    fn on_request(&self, method: &Method, url: &Url);

    /// A 2xx response arrived and its body was read.
    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, elapsed: Duration);

    /// The request failed: no response, non-2xx status, or a bad request.
    fn on_error(&self, method: &Method, url: &Url, error: &Error);
}

/// Default observer that emits `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: &Method, url: &Url) {
        tracing::info!("API request: {} {}", method, url);
    }

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode, elapsed: Duration) {
        tracing::info!(
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "API response: {} {} -> {}",
            method,
            url.path(),
            status.as_u16()
        );
    }

    fn on_error(&self, method: &Method, url: &Url, error: &Error) {
        match error {
            Error::Status { status, body, .. } => {
                tracing::warn!(status, body = %body, "API error status: {} {}", method, url);
            }
            Error::Transport { reason, .. } => {
                tracing::error!(
                    "No response for {} {} ({}); is the server running?",
                    method,
                    url,
                    reason
                );
            }
            other => tracing::error!("API request {} {} failed: {}", method, url, other),
        }
    }
}
