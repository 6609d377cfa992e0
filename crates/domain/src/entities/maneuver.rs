//! Turn-by-turn maneuver model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::GeoCoordinate;

/// What happens at a maneuver point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverKind {
    /// Start of a leg
    Depart,
    /// End of a leg
    Arrive,
    /// Plain turn
    Turn,
    /// Keep going, possibly after a change of road
    Continue,
    /// Road name changes without a turn
    NewName,
    /// Merge onto a road
    Merge,
    /// Take a ramp onto a highway
    OnRamp,
    /// Leave a highway by ramp
    OffRamp,
    /// Road splits
    Fork,
    /// Road ends in a T intersection
    EndOfRoad,
    /// Enter a roundabout
    Roundabout,
    /// Enter a large roundabout (rotary)
    Rotary,
    /// Leave a roundabout or rotary
    ExitRoundabout,
    /// Informational change without a real maneuver
    Notification,
    /// Anything the provider reports that has no counterpart here
    #[default]
    Other,
}

impl ManeuverKind {
    /// Map an OSRM v5 `maneuver.type` value
    #[must_use]
    pub fn from_osrm(value: &str) -> Self {
        match value {
            "depart" => Self::Depart,
            "arrive" => Self::Arrive,
            "turn" | "roundabout turn" => Self::Turn,
            "continue" => Self::Continue,
            "new name" => Self::NewName,
            "merge" => Self::Merge,
            "on ramp" => Self::OnRamp,
            "off ramp" => Self::OffRamp,
            "fork" => Self::Fork,
            "end of road" => Self::EndOfRoad,
            "roundabout" => Self::Roundabout,
            "rotary" => Self::Rotary,
            "exit roundabout" | "exit rotary" => Self::ExitRoundabout,
            "notification" | "use lane" => Self::Notification,
            _ => Self::Other,
        }
    }
}

/// Direction of travel relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    /// No direction information
    #[default]
    None,
    /// Straight on
    Forward,
    /// Slight right
    LightRight,
    /// Right
    Right,
    /// Sharp right
    HardRight,
    /// U-turn
    UTurn,
    /// Sharp left
    HardLeft,
    /// Left
    Left,
    /// Slight left
    LightLeft,
}

impl TurnDirection {
    /// Map an OSRM v5 `maneuver.modifier` value
    #[must_use]
    pub fn from_osrm(value: &str) -> Self {
        match value {
            "straight" => Self::Forward,
            "slight right" => Self::LightRight,
            "right" => Self::Right,
            "sharp right" => Self::HardRight,
            "uturn" => Self::UTurn,
            "sharp left" => Self::HardLeft,
            "left" => Self::Left,
            "slight left" => Self::LightLeft,
            _ => Self::None,
        }
    }

    /// Human-readable phrase ("slight right", "left", ...)
    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Forward => "straight",
            Self::LightRight => "slight right",
            Self::Right => "right",
            Self::HardRight => "sharp right",
            Self::UTurn => "U-turn",
            Self::HardLeft => "sharp left",
            Self::Left => "left",
            Self::LightLeft => "slight left",
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

/// A single instruction step within a leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteManeuver {
    /// Where the maneuver takes place
    pub position: GeoCoordinate,
    /// Instruction text (empty when the provider gave none)
    pub instruction: String,
    /// Maneuver classification
    pub kind: ManeuverKind,
    /// Turn direction
    pub direction: TurnDirection,
    /// Name of the road travelled after the maneuver
    #[serde(default)]
    pub road_name: String,
    /// Distance to the next maneuver in metres
    pub distance_to_next: f64,
    /// Travel time to the next maneuver in seconds
    pub time_to_next: f64,
    /// Heading after the maneuver in degrees, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing_after: Option<f64>,
    /// Geometry from this maneuver to the next one
    #[serde(default)]
    pub path: Vec<GeoCoordinate>,
}

impl fmt::Display for RouteManeuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instruction.is_empty() {
            write!(f, "({:.0} m)", self.distance_to_next)
        } else {
            write!(f, "{} ({:.0} m)", self.instruction, self.distance_to_next)
        }
    }
}
