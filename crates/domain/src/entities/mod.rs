//! Domain entities - Route requests and the normalized route model

mod maneuver;
mod route;
mod route_request;

pub use maneuver::{ManeuverKind, RouteManeuver, TurnDirection};
pub use route::{Route, RouteLeg};
pub use route_request::{DEFAULT_LOCALE, RouteRequest};
