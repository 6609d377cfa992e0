//! Property-based tests for route requests and the route model
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    AvoidFeature, BoundingBox, GeoCoordinate, ManeuverKind, Route, RouteLeg, RouteManeuver,
    RouteRequest, TravelMode, TurnDirection,
};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = GeoCoordinate> {
    (-90.0f64..=90.0f64, -180.0f64..=180.0f64)
        .prop_map(|(lat, lon)| GeoCoordinate::new_unchecked(lat, lon))
}

fn avoid_feature() -> impl Strategy<Value = AvoidFeature> {
    prop_oneof![
        Just(AvoidFeature::Tolls),
        Just(AvoidFeature::Highways),
        Just(AvoidFeature::Ferries),
        Just(AvoidFeature::Tunnels),
        Just(AvoidFeature::DirtRoads),
    ]
}

fn maneuver(distance: f64, time: f64) -> RouteManeuver {
    RouteManeuver {
        position: GeoCoordinate::new_unchecked(0.0, 0.0),
        instruction: String::new(),
        kind: ManeuverKind::Continue,
        direction: TurnDirection::None,
        road_name: String::new(),
        distance_to_next: distance,
        time_to_next: time,
        bearing_after: None,
        path: Vec::new(),
    }
}

// ============================================================================
// RouteRequest Property Tests
// ============================================================================

mod route_request_tests {
    use super::*;

    proptest! {
        #[test]
        fn two_or_more_waypoints_validate(waypoints in prop::collection::vec(coordinate(), 2..25)) {
            let request = RouteRequest::new(waypoints.clone());
            prop_assert!(request.validate().is_ok());
            prop_assert_eq!(request.expected_legs(), waypoints.len() - 1);
            prop_assert_eq!(request.origin(), waypoints.first());
            prop_assert_eq!(request.destination(), waypoints.last());
        }

        #[test]
        fn fewer_than_two_waypoints_rejected(waypoints in prop::collection::vec(coordinate(), 0..2)) {
            let request = RouteRequest::new(waypoints);
            prop_assert!(request.validate().is_err());
            prop_assert!(request.destination().is_none());
        }

        #[test]
        fn waypoint_order_preserved(waypoints in prop::collection::vec(coordinate(), 2..25)) {
            let request = RouteRequest::new(waypoints.clone()).with_travel_mode(TravelMode::Cycling);
            prop_assert_eq!(request.waypoints(), waypoints.as_slice());
        }

        #[test]
        fn alternatives_never_below_one(count in any::<u8>()) {
            let request = RouteRequest::between(
                GeoCoordinate::new_unchecked(52.0, 4.0),
                GeoCoordinate::new_unchecked(52.1, 4.2),
            )
            .with_alternatives(count);
            prop_assert_eq!(request.alternatives(), count.max(1));
        }

        #[test]
        fn avoid_features_are_a_set(features in prop::collection::vec(avoid_feature(), 0..12)) {
            let request = features.iter().fold(
                RouteRequest::between(
                    GeoCoordinate::new_unchecked(52.0, 4.0),
                    GeoCoordinate::new_unchecked(52.1, 4.2),
                ),
                |request, feature| request.with_avoid(*feature),
            );

            let listed: Vec<AvoidFeature> = request.avoid().collect();
            let mut expected = features.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(listed, expected);
            for feature in features {
                prop_assert!(request.avoids(feature));
            }
        }
    }
}

// ============================================================================
// Route Property Tests
// ============================================================================

mod route_tests {
    use super::*;

    proptest! {
        #[test]
        fn leg_totals_are_maneuver_sums(
            steps in prop::collection::vec((0.0f64..10_000.0, 0.0f64..3_600.0), 0..40)
        ) {
            let leg = RouteLeg {
                index: 0,
                distance: 0.0,
                travel_time: 0.0,
                summary: String::new(),
                path: Vec::new(),
                maneuvers: steps.iter().map(|(d, t)| maneuver(*d, *t)).collect(),
            };

            let distance: f64 = steps.iter().map(|(d, _)| d).sum();
            let time: f64 = steps.iter().map(|(_, t)| t).sum();
            prop_assert!((leg.maneuver_distance() - distance).abs() < 1e-6);
            prop_assert!((leg.maneuver_travel_time() - time).abs() < 1e-6);
        }

        #[test]
        fn travel_minutes_rounds(seconds in 0.0f64..1_000_000.0) {
            let route = Route {
                travel_mode: TravelMode::Walking,
                distance: 0.0,
                travel_time: seconds,
                bounds: None,
                path: Vec::new(),
                legs: Vec::new(),
            };
            let minutes = f64::from(route.travel_minutes());
            prop_assert!((minutes - seconds / 60.0).abs() <= 0.5 + 1e-9);
        }

        #[test]
        fn path_bounds_contain_every_point(path in prop::collection::vec(coordinate(), 1..50)) {
            let bounds = BoundingBox::from_coordinates(&path).unwrap();
            for coord in &path {
                prop_assert!(bounds.contains(coord));
            }
        }
    }
}
