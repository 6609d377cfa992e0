//! Routing error taxonomy
//!
//! Every failure of a routing operation ends up as a [`RouteError`] on the
//! reply handle; none of these are returned across the async boundary.

use std::fmt;

use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ports::{RouteParseError, TransportError};

/// Classification of a failed routing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteErrorKind {
    /// Malformed or incomplete request, caught before dispatch
    InvalidRequest,
    /// Transport-level failure (DNS, connect, timeout)
    NetworkError,
    /// Provider rejected the credentials (HTTP 401/403)
    UnauthorizedError,
    /// Any other non-2xx provider response
    CommunicationError,
    /// Response body could not be decoded
    ParseError,
}

impl RouteErrorKind {
    /// Map a non-success HTTP status to an error kind
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::UnauthorizedError,
            _ => Self::CommunicationError,
        }
    }

    /// Stable identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NetworkError => "network_error",
            Self::UnauthorizedError => "unauthorized_error",
            Self::CommunicationError => "communication_error",
            Self::ParseError => "parse_error",
        }
    }
}

impl fmt::Display for RouteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal error of a routing operation: a kind plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct RouteError {
    /// Error classification
    pub kind: RouteErrorKind,
    /// Diagnostic message
    pub message: String,
}

impl RouteError {
    /// Create a new error
    pub fn new(kind: RouteErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for [`RouteErrorKind::InvalidRequest`]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(RouteErrorKind::InvalidRequest, message)
    }

    /// Error for a non-success HTTP status
    ///
    /// `detail` is the provider's diagnostic, if one could be extracted.
    #[must_use]
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let message = match detail {
            Some(detail) if !detail.is_empty() => format!("HTTP {status}: {detail}"),
            _ => format!("HTTP {status}"),
        };
        Self::new(RouteErrorKind::from_status(status), message)
    }
}

impl From<DomainError> for RouteError {
    fn from(err: DomainError) -> Self {
        Self::invalid_request(err.to_string())
    }
}

impl From<TransportError> for RouteError {
    fn from(err: TransportError) -> Self {
        Self::new(RouteErrorKind::NetworkError, err.to_string())
    }
}

impl From<RouteParseError> for RouteError {
    fn from(err: RouteParseError) -> Self {
        Self::new(RouteErrorKind::ParseError, err.to_string())
    }
}
