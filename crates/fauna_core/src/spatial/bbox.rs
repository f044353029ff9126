//! Closed axis-aligned rectangle.

use super::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle over longitude/latitude.
///
/// Built from any two opposite corners; the constructor orders them so
/// `min_*` never exceeds `max_*`. Rectangles do not wrap the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Builds the rectangle spanned by two opposite corners.
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        Self {
            min_lon: a.longitude().min(b.longitude()),
            min_lat: a.latitude().min(b.latitude()),
            max_lon: a.longitude().max(b.longitude()),
            max_lat: a.latitude().max(b.latitude()),
        }
    }

    /// Returns whether `point` lies inside or on the edge of this rectangle.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.min_lon <= point.longitude()
            && point.longitude() <= self.max_lon
            && self.min_lat <= point.latitude()
            && point.latitude() <= self.max_lat
    }

    /// Returns whether two closed rectangles share at least one point.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
            && self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
    }
}
