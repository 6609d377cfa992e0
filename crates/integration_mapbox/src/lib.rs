//! Mapbox Directions integration
//!
//! Provider adapters for the routing engine: the Directions v5 query builder,
//! the response parsers, a reqwest transport client and the factory that
//! wires them into a [`application::RoutingEngine`].
//!
//! # Example
//!
//! ```no_run
//! use domain::{GeoCoordinate, RouteRequest};
//! use integration_mapbox::{MapboxConfig, build_routing_engine};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = build_routing_engine(&MapboxConfig::new("pk.your-token"))?;
//! let request = RouteRequest::between(
//!     GeoCoordinate::new(52.3731, 4.8926)?,
//!     GeoCoordinate::new(52.3584, 4.8811)?,
//! );
//! let reply = engine.calculate_route(&request);
//! let status = reply.wait().await;
//! # let _ = status;
//! # Ok(())
//! # }
//! ```

pub mod config;
mod engine;
pub mod error;
pub mod instructions;
mod models;
pub mod parser;
pub mod polyline;
pub mod request;
pub mod transport;

pub use config::{GeometryFormat, MapboxConfig};
pub use engine::{build_routing_engine, route_parser_for, routing_engine_from_parameters};
pub use error::MapboxError;
pub use parser::{MapboxRouteParser, OsrmRouteParser};
pub use request::MapboxQueryBuilder;
pub use transport::ReqwestTransport;
