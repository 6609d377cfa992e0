//! Travel mode and avoid-feature value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// How the traveller moves along the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Car
    #[default]
    Driving,
    /// Pedestrian
    Walking,
    /// Bicycle
    Cycling,
    /// Public transport
    Transit,
}

impl TravelMode {
    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving" | "car" => Ok(Self::Driving),
            "walking" | "pedestrian" | "foot" => Ok(Self::Walking),
            "cycling" | "bicycle" | "bike" => Ok(Self::Cycling),
            "transit" | "public_transit" => Ok(Self::Transit),
            other => Err(DomainError::ValidationError(format!(
                "unknown travel mode: {other}"
            ))),
        }
    }
}

/// Road features a route should stay away from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvoidFeature {
    /// Toll roads
    Tolls,
    /// Motorways / highways
    Highways,
    /// Ferry connections
    Ferries,
    /// Tunnels
    Tunnels,
    /// Unpaved roads
    DirtRoads,
}

impl AvoidFeature {
    /// Snake-case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tolls => "tolls",
            Self::Highways => "highways",
            Self::Ferries => "ferries",
            Self::Tunnels => "tunnels",
            Self::DirtRoads => "dirt_roads",
        }
    }
}

impl fmt::Display for AvoidFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvoidFeature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tolls" | "toll" => Ok(Self::Tolls),
            "highways" | "highway" | "motorway" => Ok(Self::Highways),
            "ferries" | "ferry" => Ok(Self::Ferries),
            "tunnels" | "tunnel" => Ok(Self::Tunnels),
            "dirt_roads" | "dirt" | "unpaved" => Ok(Self::DirtRoads),
            other => Err(DomainError::ValidationError(format!(
                "unknown avoid feature: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_mode_default_is_driving() {
        assert_eq!(TravelMode::default(), TravelMode::Driving);
    }

    #[test]
    fn travel_mode_parses_aliases() {
        assert_eq!("Car".parse::<TravelMode>().unwrap(), TravelMode::Driving);
        assert_eq!("bike".parse::<TravelMode>().unwrap(), TravelMode::Cycling);
        assert_eq!("foot".parse::<TravelMode>().unwrap(), TravelMode::Walking);
        assert!("hovercraft".parse::<TravelMode>().is_err());
    }

    #[test]
    fn avoid_feature_parses_aliases() {
        assert_eq!("toll".parse::<AvoidFeature>().unwrap(), AvoidFeature::Tolls);
        assert_eq!(
            "motorway".parse::<AvoidFeature>().unwrap(),
            AvoidFeature::Highways
        );
        assert!("potholes".parse::<AvoidFeature>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&TravelMode::Cycling).unwrap();
        assert_eq!(json, "\"cycling\"");
        let json = serde_json::to_string(&AvoidFeature::DirtRoads).unwrap();
        assert_eq!(json, "\"dirt_roads\"");
    }
}
