//! Validated polygon ring and its containment/intersection predicates.

use super::bbox::BoundingBox;
use super::error::{GeoError, GeoResult};
use super::point::GeoPoint;
use geo::Intersects;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Closed polygon described by its outer ring.
///
/// The ring is stored open: a trailing vertex equal to the first one is
/// dropped on construction, and the last vertex is implicitly connected
/// back to the first. Holes are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRepr", into = "Vec<GeoPoint>")]
pub struct GeoPolygon {
    ring: Vec<GeoPoint>,
}

impl GeoPolygon {
    /// Builds a polygon from an ordered ring of vertices.
    ///
    /// # Errors
    /// - Returns `GeoError::DegeneratePolygon` when fewer than 3 distinct
    ///   vertices remain.
    pub fn new(mut ring: Vec<GeoPoint>) -> GeoResult<Self> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        let distinct_vertices = ring.iter().map(GeoPoint::bits).collect::<HashSet<_>>().len();
        if distinct_vertices < 3 {
            return Err(GeoError::DegeneratePolygon { distinct_vertices });
        }

        Ok(Self { ring })
    }

    /// Builds a polygon from raw `[longitude, latitude]` pairs.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> GeoResult<Self> {
        let ring = pairs
            .iter()
            .map(|pair| GeoPoint::try_from(*pair))
            .collect::<GeoResult<Vec<_>>>()?;
        Self::new(ring)
    }

    /// Vertices of the open ring, in input order.
    pub fn vertices(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Smallest closed rectangle covering every vertex.
    pub fn bounding_box(&self) -> BoundingBox {
        let first = self.ring[0];
        self.ring.iter().fold(
            BoundingBox::from_corners(first, first),
            |acc, point| BoundingBox {
                min_lon: acc.min_lon.min(point.longitude()),
                min_lat: acc.min_lat.min(point.latitude()),
                max_lon: acc.max_lon.max(point.longitude()),
                max_lat: acc.max_lat.max(point.latitude()),
            },
        )
    }

    /// Returns whether `point` lies inside the polygon or on its boundary.
    pub fn contains_point(&self, point: &GeoPoint) -> bool {
        if !self.bounding_box().contains(point) {
            return false;
        }
        self.to_geo().intersects(&geo::Point::from(point.to_coord()))
    }

    /// Returns whether the two polygons share at least one point.
    ///
    /// Covers edge crossings, full containment in either direction, and
    /// polygons that only touch along an edge or at a vertex.
    pub fn intersects(&self, other: &GeoPolygon) -> bool {
        if !self.bounding_box().intersects(&other.bounding_box()) {
            return false;
        }
        self.to_geo().intersects(&other.to_geo())
    }

    fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior = self
            .ring
            .iter()
            .map(|point| point.to_coord())
            .collect::<Vec<_>>();
        geo::Polygon::new(geo::LineString::new(exterior), Vec::new())
    }
}

impl From<GeoPolygon> for Vec<GeoPoint> {
    fn from(value: GeoPolygon) -> Self {
        value.ring
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolygonRepr {
    Ring(Vec<GeoPoint>),
    GeoJson {
        #[serde(rename = "type")]
        kind: String,
        coordinates: Vec<Vec<GeoPoint>>,
    },
}

impl TryFrom<PolygonRepr> for GeoPolygon {
    type Error = GeoError;

    fn try_from(value: PolygonRepr) -> Result<Self, Self::Error> {
        match value {
            PolygonRepr::Ring(ring) => Self::new(ring),
            PolygonRepr::GeoJson { kind, coordinates } => {
                if kind != "Polygon" {
                    return Err(GeoError::UnsupportedGeometry {
                        expected: "Polygon",
                        found: kind,
                    });
                }
                let outer = coordinates.into_iter().next().unwrap_or_default();
                Self::new(outer)
            }
        }
    }
}
