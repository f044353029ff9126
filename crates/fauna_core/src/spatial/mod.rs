//! Geospatial query engine shared by species and animal stores.
//!
//! # Responsibility
//! - Provide strongly typed points, polygons and bounding boxes.
//! - Parse and validate loosely typed coordinate input at the boundary.
//! - Answer box containment and polygon intersection questions.
//!
//! # Invariants
//! - Every `GeoPoint` lies within longitude [-180, 180] and latitude [-90, 90].
//! - Every `GeoPolygon` has at least 3 distinct vertices.
//! - Coordinates are treated as planar; no great-circle correction.
//! - Boundaries are closed: points on an edge count as inside.
//!
//! This module has no storage dependency.

mod bbox;
mod error;
mod point;
mod polygon;

pub use bbox::BoundingBox;
pub use error::{GeoError, GeoResult};
pub use point::GeoPoint;
pub use polygon::GeoPolygon;
