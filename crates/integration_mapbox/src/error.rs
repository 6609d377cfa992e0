//! Mapbox integration error types

use thiserror::Error;

/// Errors raised while constructing the Mapbox routing engine
#[derive(Debug, Error)]
pub enum MapboxError {
    /// A mandatory parameter was not supplied
    #[error("Missing mandatory parameter: {0}")]
    MissingParameter(String),

    /// A parameter value could not be interpreted
    #[error("Invalid value for parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The HTTP client could not be built
    #[error("HTTP client initialization failed: {0}")]
    ClientInit(String),
}

impl MapboxError {
    /// Create an invalid parameter error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
