//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Coordinate outside the WGS84 value range
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Route request cannot be routed as stated
    #[error("Invalid route request: {0}")]
    InvalidRouteRequest(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
