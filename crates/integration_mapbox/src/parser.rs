//! Directions v5 response parsers
//!
//! [`MapboxRouteParser`] keeps the provider's instruction text,
//! [`OsrmRouteParser`] composes English text from the maneuver type and
//! modifier. Both read the same document:
//!
//! - `code` absent or `"Ok"` parses `routes`; `"NoRoute"`/`"NoSegment"` mean
//!   no route was found; any other code is a provider error.
//! - Declared `distance`/`duration` aggregates win; when missing, legs are
//!   summed from their steps and routes from their legs.
//! - A leg's path is the concatenation of its step geometries; a route's path
//!   is its overview geometry, or the concatenated leg paths without one.

use application::{RouteParseError, RouteParser};
use domain::{
    BoundingBox, GeoCoordinate, ManeuverKind, Route, RouteLeg, RouteManeuver, RouteRequest,
    TurnDirection,
};
use tracing::{debug, warn};

use crate::config::GeometryFormat;
use crate::instructions::{ManeuverFacts, synthesize};
use crate::models::{
    RawDirectionsResponse, RawErrorResponse, RawGeometry, RawLeg, RawRoute, RawStep,
};
use crate::polyline;

/// Provider codes that mean "no route", not failure
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

/// Where maneuver instruction text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InstructionText {
    /// `maneuver.instruction`, then the primary banner text
    Provider,
    /// Composed from type, modifier and road name
    Synthesized,
}

/// Shared decoding of the Directions document
#[derive(Debug, Clone, Copy)]
struct RouteDecoder {
    precision: u32,
    text: InstructionText,
}

impl RouteDecoder {
    fn parse(&self, body: &[u8], request: &RouteRequest) -> Result<Vec<Route>, RouteParseError> {
        let response: RawDirectionsResponse =
            serde_json::from_slice(body).map_err(|e| RouteParseError::Malformed(e.to_string()))?;

        match response.code.as_deref() {
            None | Some("Ok") => {},
            Some(code) if NO_ROUTE_CODES.contains(&code) => {
                debug!(code, "Provider found no route");
                return Ok(Vec::new());
            },
            Some(code) => {
                return Err(RouteParseError::Provider {
                    code: code.to_string(),
                    message: response.message.unwrap_or_default(),
                });
            },
        }

        let routes = response
            .routes
            .ok_or_else(|| RouteParseError::Malformed("missing field `routes`".to_string()))?;

        routes
            .into_iter()
            .map(|route| self.route(route, request))
            .collect()
    }

    fn route(&self, raw: RawRoute, request: &RouteRequest) -> Result<Route, RouteParseError> {
        let legs = raw
            .legs
            .into_iter()
            .enumerate()
            .map(|(index, leg)| self.leg(index, leg))
            .collect::<Result<Vec<_>, _>>()?;

        if legs.len() != request.expected_legs() {
            warn!(
                legs = legs.len(),
                expected = request.expected_legs(),
                "Route leg count does not match waypoint count"
            );
        }

        let mut path = self.geometry(raw.geometry.as_ref())?;
        if path.is_empty() {
            for leg in &legs {
                append_path(&mut path, &leg.path);
            }
        }

        Ok(Route {
            travel_mode: request.travel_mode(),
            distance: raw
                .distance
                .unwrap_or_else(|| legs.iter().map(|l| l.distance).sum()),
            travel_time: raw
                .duration
                .unwrap_or_else(|| legs.iter().map(|l| l.travel_time).sum()),
            bounds: BoundingBox::from_coordinates(&path),
            path,
            legs,
        })
    }

    fn leg(&self, index: usize, raw: RawLeg) -> Result<RouteLeg, RouteParseError> {
        let mut path = Vec::new();
        let mut maneuvers = Vec::with_capacity(raw.steps.len());

        for step in raw.steps {
            let maneuver = self.maneuver(step)?;
            append_path(&mut path, &maneuver.path);
            maneuvers.push(maneuver);
        }

        Ok(RouteLeg {
            index,
            distance: raw
                .distance
                .unwrap_or_else(|| maneuvers.iter().map(|m| m.distance_to_next).sum()),
            travel_time: raw
                .duration
                .unwrap_or_else(|| maneuvers.iter().map(|m| m.time_to_next).sum()),
            summary: raw.summary.unwrap_or_default(),
            path,
            maneuvers,
        })
    }

    fn maneuver(&self, step: RawStep) -> Result<RouteManeuver, RouteParseError> {
        let [longitude, latitude] = step.maneuver.location;
        let position = GeoCoordinate::new(latitude, longitude)
            .map_err(|e| RouteParseError::Malformed(format!("maneuver location: {e}")))?;

        let kind = step
            .maneuver
            .kind
            .as_deref()
            .map_or(ManeuverKind::Other, ManeuverKind::from_osrm);
        let direction = step
            .maneuver
            .modifier
            .as_deref()
            .map_or(TurnDirection::None, TurnDirection::from_osrm);
        let road_name = step.name.unwrap_or_default();

        let instruction = match self.text {
            InstructionText::Provider => step
                .maneuver
                .instruction
                .filter(|text| !text.is_empty())
                .or_else(|| {
                    step.banner_instructions
                        .into_iter()
                        .find_map(|banner| banner.primary.and_then(|p| p.text))
                })
                .unwrap_or_default(),
            InstructionText::Synthesized => synthesize(&ManeuverFacts {
                kind,
                direction,
                road_name: &road_name,
                exit: step.maneuver.exit,
                bearing_after: step.maneuver.bearing_after,
            }),
        };

        Ok(RouteManeuver {
            position,
            instruction,
            kind,
            direction,
            road_name,
            distance_to_next: step.distance.unwrap_or_default(),
            time_to_next: step.duration.unwrap_or_default(),
            bearing_after: step.maneuver.bearing_after,
            path: self.geometry(step.geometry.as_ref())?,
        })
    }

    fn geometry(&self, geometry: Option<&RawGeometry>) -> Result<Vec<GeoCoordinate>, RouteParseError> {
        match geometry {
            None => Ok(Vec::new()),
            Some(RawGeometry::Encoded(encoded)) => polyline::decode(encoded, self.precision)
                .map_err(|e| RouteParseError::Geometry(e.to_string())),
            Some(RawGeometry::LineString { coordinates }) => coordinates
                .iter()
                .map(|position| match position.as_slice() {
                    [longitude, latitude, ..] => GeoCoordinate::new(*latitude, *longitude)
                        .map_err(|e| RouteParseError::Geometry(e.to_string())),
                    _ => Err(RouteParseError::Geometry(format!(
                        "position needs longitude and latitude, got {position:?}"
                    ))),
                })
                .collect(),
        }
    }
}

/// Append `segment` to `path`, skipping leading points equal to the join point
fn append_path(path: &mut Vec<GeoCoordinate>, segment: &[GeoCoordinate]) {
    let skip = path
        .last()
        .map_or(0, |last| segment.iter().take_while(|p| *p == last).count());
    path.extend_from_slice(&segment[skip..]);
}

/// Diagnostic from a provider error document
fn provider_message(body: &[u8]) -> Option<String> {
    let response: RawErrorResponse = serde_json::from_slice(body).ok()?;
    response
        .message
        .filter(|m| !m.is_empty())
        .or(response.code)
}

/// Parser that keeps the provider's instruction text
#[derive(Debug, Clone, Copy)]
pub struct MapboxRouteParser {
    decoder: RouteDecoder,
}

impl MapboxRouteParser {
    /// Create a parser for geometries in `geometry` encoding
    #[must_use]
    pub const fn new(geometry: GeometryFormat) -> Self {
        Self {
            decoder: RouteDecoder {
                precision: geometry.precision(),
                text: InstructionText::Provider,
            },
        }
    }
}

impl RouteParser for MapboxRouteParser {
    fn parse(&self, body: &[u8], request: &RouteRequest) -> Result<Vec<Route>, RouteParseError> {
        self.decoder.parse(body, request)
    }

    fn error_message(&self, body: &[u8]) -> Option<String> {
        provider_message(body)
    }
}

/// Parser that composes English instruction text from OSRM maneuvers
///
/// Provider instruction text in the payload is ignored.
#[derive(Debug, Clone, Copy)]
pub struct OsrmRouteParser {
    decoder: RouteDecoder,
}

impl OsrmRouteParser {
    /// Create a parser for geometries in `geometry` encoding
    #[must_use]
    pub const fn new(geometry: GeometryFormat) -> Self {
        Self {
            decoder: RouteDecoder {
                precision: geometry.precision(),
                text: InstructionText::Synthesized,
            },
        }
    }
}

impl RouteParser for OsrmRouteParser {
    fn parse(&self, body: &[u8], request: &RouteRequest) -> Result<Vec<Route>, RouteParseError> {
        self.decoder.parse(body, request)
    }

    fn error_message(&self, body: &[u8]) -> Option<String> {
        provider_message(body)
    }
}

#[cfg(test)]
mod tests {
    use domain::TravelMode;

    use super::*;

    const TWO_ROUTES: &str = include_str!("../tests/fixtures/two_routes.json");

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new_unchecked(lat, lon)
    }

    fn request() -> RouteRequest {
        RouteRequest::new(vec![coord(52.0, 4.0), coord(52.05, 4.1), coord(52.1, 4.2)])
    }

    fn mapbox() -> MapboxRouteParser {
        MapboxRouteParser::new(GeometryFormat::Polyline6)
    }

    fn osrm() -> OsrmRouteParser {
        OsrmRouteParser::new(GeometryFormat::Polyline6)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-6, "{actual} != {expected}");
    }

    #[test]
    fn parses_two_routes() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        assert_eq!(routes.len(), 2);
        assert!(routes.iter().all(|r| r.legs.len() == 2));
        assert!(routes.iter().all(|r| r.travel_mode == TravelMode::Driving));
    }

    #[test]
    fn declared_totals_are_kept() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        let route = &routes[0];
        assert_close(route.distance, 2500.0);
        assert_close(route.travel_time, 240.0);
        assert_close(route.legs[0].distance, 1200.0);
        assert_close(route.legs[1].travel_time, 130.0);
        assert_eq!(route.legs[1].summary, "Rokin");
    }

    #[test]
    fn missing_totals_are_summed() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        let route = &routes[1];

        assert_close(route.legs[0].distance, 1200.0);
        assert_close(route.legs[0].travel_time, 100.0);
        assert_close(route.legs[1].distance, 900.0);
        assert_close(route.distance, 2100.0);
        assert_close(route.travel_time, 180.0);
        assert_close(route.distance, route.leg_distance());
        for leg in &route.legs {
            assert_close(leg.distance, leg.maneuver_distance());
            assert_close(leg.travel_time, leg.maneuver_travel_time());
        }
    }

    #[test]
    fn overview_geometry_is_route_path() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        let route = &routes[0];
        assert_eq!(route.path, vec![coord(52.0, 4.0), coord(52.05, 4.1), coord(52.1, 4.2)]);

        let bounds = route.bounds.unwrap();
        assert_eq!(bounds.top_left(), coord(52.1, 4.0));
        assert_eq!(bounds.bottom_right(), coord(52.0, 4.2));
    }

    #[test]
    fn leg_paths_join_step_geometries() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        let leg = &routes[0].legs[0];
        assert_eq!(leg.maneuvers[0].path.len(), 2);
        assert_eq!(leg.maneuvers[1].path.len(), 2);
        assert_eq!(leg.path, vec![coord(52.0, 4.0), coord(52.05, 4.1)]);
    }

    #[test]
    fn route_path_falls_back_to_legs() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        let route = &routes[1];
        assert_eq!(route.path, vec![coord(52.0, 4.0), coord(52.05, 4.1), coord(52.1, 4.2)]);
        assert!(route.bounds.unwrap().contains(&coord(52.05, 4.1)));
    }

    #[test]
    fn maneuver_fields() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        let depart = &routes[0].legs[0].maneuvers[0];
        assert_eq!(depart.position, coord(52.0, 4.0));
        assert_eq!(depart.kind, ManeuverKind::Depart);
        assert_eq!(depart.road_name, "Damrak");
        assert_eq!(depart.bearing_after, Some(90.0));
        assert_close(depart.distance_to_next, 1200.0);

        let arrive = &routes[0].legs[0].maneuvers[1];
        assert_eq!(arrive.kind, ManeuverKind::Arrive);
        assert_eq!(arrive.direction, TurnDirection::Right);
    }

    #[test]
    fn provider_text_falls_back_to_banner_then_empty() {
        let routes = mapbox().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        assert_eq!(routes[0].legs[0].maneuvers[0].instruction, "Head east on Damrak");
        assert_eq!(routes[0].legs[1].maneuvers[1].instruction, "Arrive at Rokin");
        assert_eq!(routes[1].legs[0].maneuvers[1].instruction, "");
    }

    #[test]
    fn osrm_parser_synthesizes_text() {
        let routes = osrm().parse(TWO_ROUTES.as_bytes(), &request()).unwrap();
        let first = &routes[0].legs[0].maneuvers;
        assert_eq!(first[0].instruction, "Head east on Damrak");
        assert_eq!(first[1].instruction, "You have arrived at your destination, on the right");

        let second = &routes[1].legs;
        assert_eq!(second[0].maneuvers[0].instruction, "Head south on Prins Hendrikkade");
        assert_eq!(second[0].maneuvers[1].instruction, "Continue straight");
        assert_eq!(second[1].maneuvers[0].instruction, "Turn left onto Nieuwezijds Voorburgwal");
    }

    #[test]
    fn zero_routes_is_empty_not_error() {
        let routes = mapbox().parse(br#"{"code": "Ok", "routes": []}"#, &request()).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn no_route_codes_are_empty() {
        for code in NO_ROUTE_CODES {
            let body = format!(r#"{{"code": "{code}", "message": "No route found"}}"#);
            assert!(mapbox().parse(body.as_bytes(), &request()).unwrap().is_empty(), "{code}");
        }
    }

    #[test]
    fn other_codes_are_provider_errors() {
        let body = br#"{"code": "InvalidInput", "message": "Coordinate is invalid: 200,52"}"#;
        let err = mapbox().parse(body, &request()).unwrap_err();
        assert_eq!(
            err,
            RouteParseError::Provider {
                code: "InvalidInput".to_string(),
                message: "Coordinate is invalid: 200,52".to_string(),
            }
        );
    }

    #[test]
    fn missing_routes_is_malformed() {
        let err = mapbox().parse(br#"{"code": "Ok"}"#, &request()).unwrap_err();
        assert!(matches!(err, RouteParseError::Malformed(ref m) if m.contains("routes")));
    }

    #[test]
    fn wrong_type_and_truncation_are_malformed() {
        let cases: [&[u8]; 4] = [
            br#"{"code": "Ok", "routes": {"distance": 1}}"#,
            br#"{"code": "Ok", "routes": [{"legs": [{"steps": [{"distance": 5}]}]}]}"#,
            &TWO_ROUTES.as_bytes()[..TWO_ROUTES.len() / 2],
            b"",
        ];
        for body in cases {
            assert!(matches!(
                mapbox().parse(body, &request()),
                Err(RouteParseError::Malformed(_))
            ));
        }
    }

    #[test]
    fn missing_optional_fields_default() {
        let body = br#"{"routes": [{"legs": [{"steps": [{"maneuver": {"location": [4.0, 52.0]}}]}]}]}"#;
        let request = RouteRequest::between(coord(52.0, 4.0), coord(52.1, 4.2));
        let routes = mapbox().parse(body, &request).unwrap();

        let route = &routes[0];
        assert!(route.path.is_empty());
        assert!(route.bounds.is_none());
        let maneuver = &route.legs[0].maneuvers[0];
        assert_eq!(maneuver.instruction, "");
        assert_eq!(maneuver.road_name, "");
        assert_eq!(maneuver.kind, ManeuverKind::Other);
        assert_close(maneuver.distance_to_next, 0.0);
    }

    #[test]
    fn malformed_polyline_is_geometry_error() {
        let body = br#"{"routes": [{"geometry": "_p~iF", "legs": []}]}"#;
        let err = mapbox().parse(body, &request()).unwrap_err();
        assert!(matches!(err, RouteParseError::Geometry(_)));
    }

    #[test]
    fn geojson_geometry_is_accepted() {
        let body = br#"{"routes": [{
            "geometry": {"type": "LineString", "coordinates": [[151.2093, -33.8688], [151.21, -33.87]]},
            "legs": []
        }]}"#;
        let routes = mapbox().parse(body, &request()).unwrap();
        assert_eq!(routes[0].path, vec![coord(-33.8688, 151.2093), coord(-33.87, 151.21)]);
    }

    #[test]
    fn geojson_altitude_is_ignored() {
        let body = br#"{"routes": [{
            "geometry": {"type": "LineString", "coordinates": [[4.0, 52.0, 3.2], [4.1, 52.05, -1.0]]},
            "legs": []
        }]}"#;
        let routes = mapbox().parse(body, &request()).unwrap();
        assert_eq!(routes[0].path, vec![coord(52.0, 4.0), coord(52.05, 4.1)]);
    }

    #[test]
    fn geojson_short_position_is_geometry_error() {
        let body = br#"{"routes": [{
            "geometry": {"type": "LineString", "coordinates": [[4.0]]},
            "legs": []
        }]}"#;
        let err = mapbox().parse(body, &request()).unwrap_err();
        assert!(matches!(err, RouteParseError::Geometry(_)));
    }

    #[test]
    fn geometry_precision_follows_configuration() {
        let body = br#"{"routes": [{"geometry": "_gk|H_glWowH_pRowH_pR", "legs": []}]}"#;
        let routes = MapboxRouteParser::new(GeometryFormat::Polyline)
            .parse(body, &request())
            .unwrap();
        assert_eq!(routes[0].path, vec![coord(52.0, 4.0), coord(52.05, 4.1), coord(52.1, 4.2)]);
    }

    #[test]
    fn invalid_maneuver_location_is_malformed() {
        let body = br#"{"routes": [{"legs": [{"steps": [{"maneuver": {"location": [4.0, 95.0]}}]}]}]}"#;
        assert!(matches!(
            mapbox().parse(body, &request()),
            Err(RouteParseError::Malformed(_))
        ));
    }

    #[test]
    fn error_message_extraction() {
        let parser = mapbox();
        assert_eq!(
            parser.error_message(br#"{"message": "Not Authorized - Invalid Token"}"#).as_deref(),
            Some("Not Authorized - Invalid Token")
        );
        assert_eq!(
            osrm().error_message(br#"{"code": "InvalidUrl"}"#).as_deref(),
            Some("InvalidUrl")
        );
        assert!(parser.error_message(b"<html>Bad gateway</html>").is_none());
    }

    #[test]
    fn append_path_skips_join_duplicates() {
        let mut path = vec![coord(1.0, 1.0), coord(2.0, 2.0)];
        append_path(&mut path, &[coord(2.0, 2.0), coord(2.0, 2.0), coord(3.0, 3.0)]);
        assert_eq!(path, vec![coord(1.0, 1.0), coord(2.0, 2.0), coord(3.0, 3.0)]);

        let mut empty = Vec::new();
        append_path(&mut empty, &[coord(1.0, 1.0)]);
        assert_eq!(empty.len(), 1);
    }
}
