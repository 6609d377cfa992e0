//! Transport client port
//!
//! Defines how the routing engine hands a built provider query to the network.
//! The HTTP adapter lives in the provider integration crate.

use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// HTTP method of a provider query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// Parameters in the URL
    #[default]
    Get,
    /// Parameters in a form-encoded body
    Post,
}

/// A fully built provider query, ready to be sent
#[derive(Clone, PartialEq, Eq, Default)]
pub struct TransportRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL including the query string
    pub url: String,
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Form-encoded body for POST requests
    pub body: Option<String>,
}

impl TransportRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a POST request with a form-encoded body
    pub fn post_form(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// URL without its query string, safe to log
    #[must_use]
    pub fn redacted_url(&self) -> &str {
        self.url.split_once('?').map_or(self.url.as_str(), |(base, _)| base)
    }
}

/// The URL carries the access token, so only the path part is printed
impl std::fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("url", &self.redacted_url())
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(String::len))
            .finish()
    }
}

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failures below the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection could not be established or was interrupted
    #[error("Connection failed: {0}")]
    Connection(String),

    /// No response within the configured timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Port for issuing provider queries
///
/// `dispatch` resolves exactly once, with either a response or a transport
/// error. Dropping the returned future aborts the operation; no completion is
/// delivered afterwards.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransportClient: Send + Sync {
    /// Send the request and wait for the full response body
    async fn dispatch(&self, request: TransportRequest)
    -> Result<TransportResponse, TransportError>;
}
