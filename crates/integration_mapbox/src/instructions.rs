//! English instruction text for OSRM maneuvers
//!
//! Used when the provider's own instruction text is not wanted. The wording
//! follows the OSRM text-instruction conventions closely enough for display,
//! without per-locale tables.

use domain::{ManeuverKind, TurnDirection};

/// Maneuver facts an instruction is composed from
#[derive(Debug, Clone, Copy, Default)]
pub struct ManeuverFacts<'a> {
    /// Maneuver type
    pub kind: ManeuverKind,
    /// Maneuver modifier
    pub direction: TurnDirection,
    /// Road travelled afterwards; empty when unnamed
    pub road_name: &'a str,
    /// Roundabout exit number
    pub exit: Option<u32>,
    /// Heading after the maneuver in degrees
    pub bearing_after: Option<f64>,
}

/// Compose the instruction text for a maneuver
#[must_use]
pub fn synthesize(facts: &ManeuverFacts<'_>) -> String {
    let road = facts.road_name.trim();
    let direction = facts.direction;

    let (base, preposition) = match facts.kind {
        ManeuverKind::Depart => match facts.bearing_after.map(compass) {
            Some(heading) => (format!("Head {heading}"), "on"),
            None => ("Depart".to_string(), "on"),
        },
        ManeuverKind::Arrive => {
            return match direction {
                TurnDirection::Left | TurnDirection::LightLeft | TurnDirection::HardLeft => {
                    "You have arrived at your destination, on the left".to_string()
                },
                TurnDirection::Right | TurnDirection::LightRight | TurnDirection::HardRight => {
                    "You have arrived at your destination, on the right".to_string()
                },
                _ => "You have arrived at your destination".to_string(),
            };
        },
        ManeuverKind::Turn => (turn(direction), "onto"),
        ManeuverKind::Continue => match direction {
            TurnDirection::None => ("Continue".to_string(), "on"),
            TurnDirection::UTurn => ("Make a U-turn".to_string(), "and continue on"),
            d => (format!("Continue {}", d.phrase()), "on"),
        },
        ManeuverKind::NewName => ("Continue".to_string(), "onto"),
        ManeuverKind::Merge => (with_direction("Merge", direction), "onto"),
        ManeuverKind::OnRamp => (on_side("Take the ramp", direction), "onto"),
        ManeuverKind::OffRamp => (on_side("Take the exit", direction), "onto"),
        ManeuverKind::Fork => match direction {
            TurnDirection::None | TurnDirection::Forward => ("Keep straight at the fork".to_string(), "onto"),
            d => (format!("Keep {} at the fork", side(d)), "onto"),
        },
        ManeuverKind::EndOfRoad => (format!("At the end of the road, {}", turn(direction).to_lowercase()), "onto"),
        ManeuverKind::Roundabout | ManeuverKind::Rotary => {
            let place = if facts.kind == ManeuverKind::Rotary { "rotary" } else { "roundabout" };
            match facts.exit {
                Some(exit) if exit > 0 => (
                    format!("Enter the {place} and take the {} exit", ordinal(exit)),
                    "onto",
                ),
                _ => (format!("Enter the {place}"), "and exit onto"),
            }
        },
        ManeuverKind::ExitRoundabout => ("Exit the roundabout".to_string(), "onto"),
        ManeuverKind::Notification | ManeuverKind::Other => match direction {
            TurnDirection::None => ("Continue".to_string(), "on"),
            d => (format!("Go {}", d.phrase()), "on"),
        },
    };

    if road.is_empty() {
        base
    } else {
        format!("{base} {preposition} {road}")
    }
}

fn turn(direction: TurnDirection) -> String {
    match direction {
        TurnDirection::None => "Turn".to_string(),
        TurnDirection::Forward => "Go straight".to_string(),
        TurnDirection::UTurn => "Make a U-turn".to_string(),
        TurnDirection::Left | TurnDirection::Right => format!("Turn {}", direction.phrase()),
        d => format!("Make a {}", d.phrase()),
    }
}

fn with_direction(verb: &str, direction: TurnDirection) -> String {
    match direction {
        TurnDirection::None | TurnDirection::Forward => verb.to_string(),
        d => format!("{verb} {}", side(d)),
    }
}

fn on_side(verb: &str, direction: TurnDirection) -> String {
    match direction {
        TurnDirection::None | TurnDirection::Forward | TurnDirection::UTurn => verb.to_string(),
        d => format!("{verb} on the {}", side(d)),
    }
}

/// Just "left" or "right" for modifiers that have a side
const fn side(direction: TurnDirection) -> &'static str {
    match direction {
        TurnDirection::Left | TurnDirection::LightLeft | TurnDirection::HardLeft => "left",
        TurnDirection::Right | TurnDirection::LightRight | TurnDirection::HardRight => "right",
        TurnDirection::UTurn => "around",
        TurnDirection::None | TurnDirection::Forward => "straight",
    }
}

/// Eight-point compass word for a bearing in degrees
#[must_use]
pub fn compass(bearing: f64) -> &'static str {
    const POINTS: [&str; 8] = [
        "north",
        "northeast",
        "east",
        "southeast",
        "south",
        "southwest",
        "west",
        "northwest",
    ];
    let normalized = bearing.rem_euclid(360.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let sector = ((normalized + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[sector]
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(kind: ManeuverKind, direction: TurnDirection, road: &str) -> String {
        synthesize(&ManeuverFacts {
            kind,
            direction,
            road_name: road,
            ..ManeuverFacts::default()
        })
    }

    #[test]
    fn depart_uses_compass_heading() {
        let facts = ManeuverFacts {
            kind: ManeuverKind::Depart,
            road_name: "Damrak",
            bearing_after: Some(92.0),
            ..ManeuverFacts::default()
        };
        assert_eq!(synthesize(&facts), "Head east on Damrak");
        assert_eq!(text(ManeuverKind::Depart, TurnDirection::None, ""), "Depart");
    }

    #[test]
    fn turns() {
        assert_eq!(text(ManeuverKind::Turn, TurnDirection::Left, "Rokin"), "Turn left onto Rokin");
        assert_eq!(text(ManeuverKind::Turn, TurnDirection::LightRight, ""), "Make a slight right");
        assert_eq!(text(ManeuverKind::Turn, TurnDirection::HardLeft, "A10"), "Make a sharp left onto A10");
        assert_eq!(text(ManeuverKind::Turn, TurnDirection::UTurn, ""), "Make a U-turn");
        assert_eq!(text(ManeuverKind::Turn, TurnDirection::Forward, ""), "Go straight");
    }

    #[test]
    fn arrive_mentions_side() {
        assert_eq!(
            text(ManeuverKind::Arrive, TurnDirection::Right, "Dam"),
            "You have arrived at your destination, on the right"
        );
        assert_eq!(
            text(ManeuverKind::Arrive, TurnDirection::None, ""),
            "You have arrived at your destination"
        );
    }

    #[test]
    fn highway_maneuvers() {
        assert_eq!(text(ManeuverKind::OnRamp, TurnDirection::Right, "A4"), "Take the ramp on the right onto A4");
        assert_eq!(text(ManeuverKind::OffRamp, TurnDirection::None, ""), "Take the exit");
        assert_eq!(text(ManeuverKind::Fork, TurnDirection::LightLeft, "A2"), "Keep left at the fork onto A2");
        assert_eq!(text(ManeuverKind::Merge, TurnDirection::LightRight, "A9"), "Merge right onto A9");
    }

    #[test]
    fn end_of_road_and_names() {
        assert_eq!(
            text(ManeuverKind::EndOfRoad, TurnDirection::Left, "Spui"),
            "At the end of the road, turn left onto Spui"
        );
        assert_eq!(text(ManeuverKind::NewName, TurnDirection::Forward, "Kalverstraat"), "Continue onto Kalverstraat");
        assert_eq!(text(ManeuverKind::Continue, TurnDirection::Forward, "N200"), "Continue straight on N200");
    }

    #[test]
    fn roundabout_exit_numbers() {
        let facts = ManeuverFacts {
            kind: ManeuverKind::Roundabout,
            road_name: "Ring",
            exit: Some(2),
            ..ManeuverFacts::default()
        };
        assert_eq!(synthesize(&facts), "Enter the roundabout and take the 2nd exit onto Ring");
        assert_eq!(text(ManeuverKind::Rotary, TurnDirection::None, ""), "Enter the rotary");
        assert_eq!(text(ManeuverKind::ExitRoundabout, TurnDirection::None, "Ring"), "Exit the roundabout onto Ring");
    }

    #[test]
    fn compass_points() {
        assert_eq!(compass(0.0), "north");
        assert_eq!(compass(359.0), "north");
        assert_eq!(compass(45.0), "northeast");
        assert_eq!(compass(180.0), "south");
        assert_eq!(compass(-90.0), "west");
        assert_eq!(compass(300.0), "northwest");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn unclassified_maneuvers() {
        assert_eq!(text(ManeuverKind::Other, TurnDirection::None, "Dam"), "Continue on Dam");
        assert_eq!(text(ManeuverKind::Notification, TurnDirection::Left, ""), "Go left");
    }
}
