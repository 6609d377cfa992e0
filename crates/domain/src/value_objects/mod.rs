//! Value Objects - Immutable, identity-less domain primitives

mod bounding_box;
mod geo_coordinate;
mod travel_mode;

pub use bounding_box::BoundingBox;
pub use geo_coordinate::GeoCoordinate;
pub use travel_mode::{AvoidFeature, TravelMode};
