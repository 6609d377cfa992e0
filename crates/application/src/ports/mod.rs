//! Port definitions for application layer
//!
//! Ports are interfaces that define how the routing engine interacts with
//! external systems. Provider integration crates implement these ports.

mod route_parser_port;
mod route_query_port;
mod transport_port;

#[cfg(test)]
pub use route_parser_port::MockRouteParser;
pub use route_parser_port::{RouteParseError, RouteParser};
#[cfg(test)]
pub use route_query_port::MockRouteQueryBuilder;
pub use route_query_port::RouteQueryBuilder;
#[cfg(test)]
pub use transport_port::MockTransportClient;
pub use transport_port::{
    HttpMethod, TransportClient, TransportError, TransportRequest, TransportResponse,
};
