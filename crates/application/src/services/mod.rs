//! Application services - Use case implementations

mod routing_engine;

pub use routing_engine::RoutingEngine;
