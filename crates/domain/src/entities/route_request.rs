//! Route request entity

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{AvoidFeature, BoundingBox, GeoCoordinate, TravelMode};

/// Locale used when the caller does not ask for one
pub const DEFAULT_LOCALE: &str = "en";

/// A request for one or more routes through an ordered list of waypoints
///
/// The first waypoint is the origin, the last one the destination. Requests
/// are plain values: the engine clones what it submits, so a caller may keep
/// reusing and modifying its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    waypoints: Vec<GeoCoordinate>,
    #[serde(default)]
    excluded_areas: Vec<BoundingBox>,
    #[serde(default)]
    avoid: BTreeSet<AvoidFeature>,
    #[serde(default)]
    travel_mode: TravelMode,
    #[serde(default = "default_locale")]
    locale: String,
    #[serde(default = "default_alternatives")]
    alternatives: u8,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

const fn default_alternatives() -> u8 {
    1
}

impl RouteRequest {
    /// Create a request through the given waypoints
    #[must_use]
    pub fn new(waypoints: Vec<GeoCoordinate>) -> Self {
        Self {
            waypoints,
            excluded_areas: Vec::new(),
            avoid: BTreeSet::new(),
            travel_mode: TravelMode::default(),
            locale: default_locale(),
            alternatives: default_alternatives(),
        }
    }

    /// Create an origin → destination request
    #[must_use]
    pub fn between(origin: GeoCoordinate, destination: GeoCoordinate) -> Self {
        Self::new(vec![origin, destination])
    }

    /// Set the travel mode
    #[must_use]
    pub const fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = mode;
        self
    }

    /// Add a feature to avoid
    #[must_use]
    pub fn with_avoid(mut self, feature: AvoidFeature) -> Self {
        self.avoid.insert(feature);
        self
    }

    /// Add an area the route must not cross
    #[must_use]
    pub fn with_excluded_area(mut self, area: BoundingBox) -> Self {
        self.excluded_areas.push(area);
        self
    }

    /// Set the locale used for instruction text
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the number of routes wanted (1 = no alternatives)
    #[must_use]
    pub fn with_alternatives(mut self, count: u8) -> Self {
        self.alternatives = count.max(1);
        self
    }

    /// All waypoints in travel order
    #[must_use]
    pub fn waypoints(&self) -> &[GeoCoordinate] {
        &self.waypoints
    }

    /// First waypoint
    #[must_use]
    pub fn origin(&self) -> Option<&GeoCoordinate> {
        self.waypoints.first()
    }

    /// Last waypoint
    #[must_use]
    pub fn destination(&self) -> Option<&GeoCoordinate> {
        if self.waypoints.len() < 2 {
            return None;
        }
        self.waypoints.last()
    }

    /// Areas the route must not cross
    #[must_use]
    pub fn excluded_areas(&self) -> &[BoundingBox] {
        &self.excluded_areas
    }

    /// Features to avoid, in stable order
    pub fn avoid(&self) -> impl Iterator<Item = AvoidFeature> + '_ {
        self.avoid.iter().copied()
    }

    /// Whether a feature should be avoided
    #[must_use]
    pub fn avoids(&self, feature: AvoidFeature) -> bool {
        self.avoid.contains(&feature)
    }

    /// Travel mode
    #[must_use]
    pub const fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    /// Locale for instruction text
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Number of routes wanted
    #[must_use]
    pub const fn alternatives(&self) -> u8 {
        self.alternatives
    }

    /// Number of legs a route for this request consists of
    #[must_use]
    pub fn expected_legs(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Check that the request can be routed at all
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRouteRequest` when fewer than two
    /// waypoints are given or the locale is empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.waypoints.len() < 2 {
            return Err(DomainError::InvalidRouteRequest(format!(
                "at least origin and destination are required, got {} waypoint(s)",
                self.waypoints.len()
            )));
        }
        if self.locale.trim().is_empty() {
            return Err(DomainError::InvalidRouteRequest(
                "locale must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
