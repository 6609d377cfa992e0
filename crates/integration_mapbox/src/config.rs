//! Mapbox routing configuration
//!
//! The engine is configured once, either from a named parameter map (the
//! provider-plugin style `mapbox.*` keys) or from a serde document such as a
//! TOML file. The resulting [`MapboxConfig`] is immutable for the engine's
//! lifetime.

use std::collections::HashMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::MapboxError;

/// Parameter key of the access token (mandatory)
pub const PARAM_ACCESS_TOKEN: &str = "mapbox.access_token";
/// Parameter key of the directions API base URL
pub const PARAM_API_URL: &str = "mapbox.routing.api_url";
/// Parameter key selecting provider instruction text over synthesized text
pub const PARAM_USE_MAPBOX_TEXT: &str = "mapbox.routing.use_mapbox_text_instructions";
/// Parameter key of the polyline precision (5 or 6)
pub const PARAM_GEOMETRY_PRECISION: &str = "mapbox.routing.geometry_precision";
/// Parameter key of the request timeout in seconds
pub const PARAM_TIMEOUT_SECS: &str = "mapbox.routing.timeout_secs";
/// Parameter key of the HTTP user agent
pub const PARAM_USER_AGENT: &str = "useragent";

/// Encoding of route geometries requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryFormat {
    /// Encoded polyline, 1e-5 degree precision
    Polyline,
    /// Encoded polyline, 1e-6 degree precision
    #[default]
    Polyline6,
}

impl GeometryFormat {
    /// Decimal places encoded per coordinate
    #[must_use]
    pub const fn precision(&self) -> u32 {
        match self {
            Self::Polyline => 5,
            Self::Polyline6 => 6,
        }
    }

    /// Value of the `geometries` query parameter
    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::Polyline => "polyline",
            Self::Polyline6 => "polyline6",
        }
    }

    /// Select the format for a precision value
    #[must_use]
    pub const fn from_precision(precision: u32) -> Option<Self> {
        match precision {
            5 => Some(Self::Polyline),
            6 => Some(Self::Polyline6),
            _ => None,
        }
    }
}

/// Configuration of the Mapbox routing engine
#[derive(Clone, Serialize, Deserialize)]
pub struct MapboxConfig {
    /// Mapbox access token (sensitive - uses SecretString)
    #[serde(skip_serializing)]
    pub access_token: SecretString,

    /// Directions API base URL, up to and including the profile namespace
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Use the provider's instruction text; `false` synthesizes OSRM-style text
    #[serde(default = "default_true")]
    pub use_mapbox_text_instructions: bool,

    /// Geometry encoding requested from the provider
    #[serde(default)]
    pub geometry: GeometryFormat,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.mapbox.com/directions/v5/mapbox/".to_string()
}

fn default_user_agent() -> String {
    format!("routing-engine/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_true() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    15
}

impl MapboxConfig {
    /// Create a configuration with defaults for everything but the token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            use_mapbox_text_instructions: true,
            geometry: GeometryFormat::default(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Self::new("test-token")
        }
    }

    /// Build a configuration from named engine parameters
    ///
    /// Unrecognized keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MissingParameter` when no non-empty access token is given and
    /// `InvalidParameter` when a recognized value cannot be interpreted.
    pub fn from_parameters(parameters: &HashMap<String, String>) -> Result<Self, MapboxError> {
        let token = parameters
            .get(PARAM_ACCESS_TOKEN)
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| MapboxError::MissingParameter(PARAM_ACCESS_TOKEN.to_string()))?;

        let mut config = Self::new(token);

        for (key, value) in parameters {
            match key.as_str() {
                PARAM_ACCESS_TOKEN => {},
                PARAM_API_URL => config.api_url = value.trim().to_string(),
                PARAM_USER_AGENT => config.user_agent = value.trim().to_string(),
                PARAM_USE_MAPBOX_TEXT => {
                    config.use_mapbox_text_instructions = parse_bool(key, value)?;
                },
                PARAM_GEOMETRY_PRECISION => {
                    let precision = value
                        .trim()
                        .parse::<u32>()
                        .map_err(|e| MapboxError::invalid(key, e.to_string()))?;
                    config.geometry = GeometryFormat::from_precision(precision)
                        .ok_or_else(|| MapboxError::invalid(key, "precision must be 5 or 6"))?;
                },
                PARAM_TIMEOUT_SECS => {
                    config.timeout_secs = value
                        .trim()
                        .parse()
                        .map_err(|e: std::num::ParseIntError| MapboxError::invalid(key, e.to_string()))?;
                },
                other => debug!(parameter = other, "Ignoring unrecognized engine parameter"),
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), MapboxError> {
        if self.access_token.expose_secret().trim().is_empty() {
            return Err(MapboxError::MissingParameter(PARAM_ACCESS_TOKEN.to_string()));
        }

        let url = Url::parse(&self.api_url).map_err(|e| MapboxError::invalid(PARAM_API_URL, e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MapboxError::invalid(
                PARAM_API_URL,
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.user_agent.is_empty() {
            return Err(MapboxError::invalid(PARAM_USER_AGENT, "must not be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(MapboxError::invalid(
                PARAM_TIMEOUT_SECS,
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Base URL guaranteed to end with a slash
    #[must_use]
    pub fn api_base(&self) -> String {
        if self.api_url.ends_with('/') {
            self.api_url.clone()
        } else {
            format!("{}/", self.api_url)
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, MapboxError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(MapboxError::invalid(key, format!("expected a boolean, got '{other}'"))),
    }
}

impl fmt::Debug for MapboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapboxConfig")
            .field("access_token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("user_agent", &self.user_agent)
            .field(
                "use_mapbox_text_instructions",
                &self.use_mapbox_text_instructions,
            )
            .field("geometry", &self.geometry)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
