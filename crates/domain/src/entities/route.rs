//! Route and leg model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RouteManeuver;
use crate::value_objects::{BoundingBox, GeoCoordinate, TravelMode};

/// Portion of a route between two consecutive waypoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// Position of the leg within its route, starting at 0
    pub index: usize,
    /// Leg distance in metres
    pub distance: f64,
    /// Leg travel time in seconds
    pub travel_time: f64,
    /// Provider summary (typically major road names)
    #[serde(default)]
    pub summary: String,
    /// Leg geometry
    #[serde(default)]
    pub path: Vec<GeoCoordinate>,
    /// Maneuvers in travel order
    #[serde(default)]
    pub maneuvers: Vec<RouteManeuver>,
}

impl RouteLeg {
    /// Sum of the maneuver distances
    #[must_use]
    pub fn maneuver_distance(&self) -> f64 {
        self.maneuvers.iter().map(|m| m.distance_to_next).sum()
    }

    /// Sum of the maneuver travel times
    #[must_use]
    pub fn maneuver_travel_time(&self) -> f64 {
        self.maneuvers.iter().map(|m| m.time_to_next).sum()
    }
}

/// An ordered path from origin to destination composed of legs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Mode the route was computed for
    pub travel_mode: TravelMode,
    /// Total distance in metres
    pub distance: f64,
    /// Total travel time in seconds
    pub travel_time: f64,
    /// Region covered by the route geometry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    /// Overview geometry
    #[serde(default)]
    pub path: Vec<GeoCoordinate>,
    /// Legs in waypoint order
    pub legs: Vec<RouteLeg>,
}

impl Route {
    /// Sum of the leg distances
    #[must_use]
    pub fn leg_distance(&self) -> f64 {
        self.legs.iter().map(|l| l.distance).sum()
    }

    /// Sum of the leg travel times
    #[must_use]
    pub fn leg_travel_time(&self) -> f64 {
        self.legs.iter().map(|l| l.travel_time).sum()
    }

    /// All maneuvers of all legs in travel order
    pub fn maneuvers(&self) -> impl Iterator<Item = &RouteManeuver> {
        self.legs.iter().flat_map(|l| l.maneuvers.iter())
    }

    /// Travel time rounded to whole minutes
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn travel_minutes(&self) -> u32 {
        (self.travel_time / 60.0).round().max(0.0) as u32
    }

    /// Format as a compact one-line summary
    #[must_use]
    pub fn format_summary(&self) -> String {
        let km = self.distance / 1000.0;
        let legs = self.legs.len();
        format!(
            "{km:.1} km, {} min by {} ({legs} leg{})",
            self.travel_minutes(),
            self.travel_mode,
            if legs == 1 { "" } else { "s" }
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_summary())
    }
}
