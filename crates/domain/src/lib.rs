//! Domain layer for the routing engine
//!
//! Contains the route request, the normalized route/leg/maneuver model,
//! geographic value objects, and domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
