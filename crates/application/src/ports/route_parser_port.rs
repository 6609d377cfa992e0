//! Route parser port
//!
//! One implementation per provider response format. The engine is handed a
//! parser at construction and never inspects which one it got.

use domain::{Route, RouteRequest};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Reasons a provider response could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteParseError {
    /// Not a valid document, or a mandatory field is missing or mistyped
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Encoded geometry could not be decoded
    #[error("Invalid geometry: {0}")]
    Geometry(String),

    /// The provider reported a failure inside a successful HTTP response
    #[error("Provider error {code}: {message}")]
    Provider {
        /// Provider status code (e.g. `InvalidInput`)
        code: String,
        /// Provider message
        message: String,
    },
}

/// Port for decoding provider responses into routes
#[cfg_attr(test, automock)]
pub trait RouteParser: Send + Sync {
    /// Decode `body` into routes
    ///
    /// `request` is the request the response answers; a response with no
    /// routes yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteParseError`] for structurally malformed payloads.
    fn parse(&self, body: &[u8], request: &RouteRequest) -> Result<Vec<Route>, RouteParseError>;

    /// Extract the provider's diagnostic message from an error response body
    fn error_message(&self, body: &[u8]) -> Option<String> {
        let _ = body;
        None
    }
}
