//! Raw Directions v5 payload
//!
//! Mirrors the subset of the Mapbox/OSRM response document the parsers read.
//! Everything except `routes` and `maneuver` is optional and defaulted.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawDirectionsResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Option<Vec<RawRoute>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoute {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawLeg {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub steps: Vec<RawStep>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawStep {
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
    #[serde(default)]
    pub name: Option<String>,
    pub maneuver: RawManeuver,
    #[serde(default)]
    pub banner_instructions: Vec<RawBannerInstruction>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawManeuver {
    /// `[longitude, latitude]`
    pub location: [f64; 2],
    #[serde(default)]
    pub bearing_after: Option<f64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub modifier: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub exit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBannerInstruction {
    #[serde(default)]
    pub primary: Option<RawBannerText>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBannerText {
    #[serde(default)]
    pub text: Option<String>,
}

/// Geometry as requested (`polyline`/`polyline6`) or as GeoJSON
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawGeometry {
    Encoded(String),
    LineString {
        /// `[longitude, latitude]` positions, optionally followed by altitude
        coordinates: Vec<Vec<f64>>,
    },
}

/// Body of a non-2xx provider response
#[derive(Debug, Deserialize)]
pub(crate) struct RawErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
