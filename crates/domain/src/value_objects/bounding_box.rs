//! Axis-aligned geographic bounding box

use serde::{Deserialize, Serialize};

use super::GeoCoordinate;

/// A rectangular region described by its north-west and south-east corners
///
/// Regions crossing the antimeridian are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    top_left: GeoCoordinate,
    bottom_right: GeoCoordinate,
}

impl BoundingBox {
    /// Create a box from its corners, normalising their order
    #[must_use]
    pub fn new(a: GeoCoordinate, b: GeoCoordinate) -> Self {
        let north = a.latitude().max(b.latitude());
        let south = a.latitude().min(b.latitude());
        let west = a.longitude().min(b.longitude());
        let east = a.longitude().max(b.longitude());
        Self {
            top_left: GeoCoordinate::new_unchecked(north, west),
            bottom_right: GeoCoordinate::new_unchecked(south, east),
        }
    }

    /// Smallest box enclosing every coordinate of a path
    ///
    /// Returns `None` for an empty path.
    #[must_use]
    pub fn from_coordinates(path: &[GeoCoordinate]) -> Option<Self> {
        let (first, rest) = path.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for coord in rest {
            bounds.extend(*coord);
        }
        Some(bounds)
    }

    /// North-west corner
    #[must_use]
    pub const fn top_left(&self) -> GeoCoordinate {
        self.top_left
    }

    /// South-east corner
    #[must_use]
    pub const fn bottom_right(&self) -> GeoCoordinate {
        self.bottom_right
    }

    /// Grow the box so that it contains `coord`
    pub fn extend(&mut self, coord: GeoCoordinate) {
        let north = self.top_left.latitude().max(coord.latitude());
        let west = self.top_left.longitude().min(coord.longitude());
        let south = self.bottom_right.latitude().min(coord.latitude());
        let east = self.bottom_right.longitude().max(coord.longitude());
        self.top_left = GeoCoordinate::new_unchecked(north, west);
        self.bottom_right = GeoCoordinate::new_unchecked(south, east);
    }

    /// Whether `coord` lies inside the box (edges inclusive)
    #[must_use]
    pub fn contains(&self, coord: &GeoCoordinate) -> bool {
        (self.bottom_right.latitude()..=self.top_left.latitude()).contains(&coord.latitude())
            && (self.top_left.longitude()..=self.bottom_right.longitude())
                .contains(&coord.longitude())
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn coordinate() -> impl Strategy<Value = GeoCoordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| GeoCoordinate::new_unchecked(lat, lon))
    }

    proptest! {
        #[test]
        fn bounds_contain_every_path_point(path in prop::collection::vec(coordinate(), 1..50)) {
            let bounds = BoundingBox::from_coordinates(&path).unwrap();
            for c in &path {
                prop_assert!(bounds.contains(c));
            }
        }
    }
}
