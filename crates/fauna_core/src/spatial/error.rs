//! Error type for coordinate parsing and geometry validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GeoResult<T> = Result<T, GeoError>;

/// Validation failure for geometry-bearing input.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Coordinate text or array could not be read as a `longitude,latitude` pair.
    MalformedCoordinate(String),
    /// Coordinate is not finite or falls outside geographic bounds.
    OutOfRange { longitude: f64, latitude: f64 },
    /// Polygon ring has fewer than 3 distinct vertices.
    DegeneratePolygon { distinct_vertices: usize },
    /// GeoJSON object carries a geometry type other than the expected one.
    UnsupportedGeometry { expected: &'static str, found: String },
}

impl Display for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedCoordinate(value) => {
                write!(f, "malformed coordinate `{value}`; expected `longitude,latitude`")
            }
            Self::OutOfRange {
                longitude,
                latitude,
            } => write!(
                f,
                "coordinate ({longitude}, {latitude}) is outside longitude [-180,180] / latitude [-90,90]"
            ),
            Self::DegeneratePolygon { distinct_vertices } => write!(
                f,
                "polygon needs at least 3 distinct vertices, got {distinct_vertices}"
            ),
            Self::UnsupportedGeometry { expected, found } => {
                write!(f, "expected GeoJSON `{expected}`, got `{found}`")
            }
        }
    }
}

impl Error for GeoError {}
