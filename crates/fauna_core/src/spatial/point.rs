//! Validated geographic point.

use super::error::{GeoError, GeoResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Geographic position as a `[longitude, latitude]` pair.
///
/// Deserializes from a plain `[lon, lat]` array or a GeoJSON `Point` object
/// and always serializes back to the plain array form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointRepr", into = "[f64; 2]")]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Builds a point after checking geographic bounds.
    ///
    /// # Errors
    /// - Returns `GeoError::OutOfRange` for non-finite or out-of-bounds values.
    pub fn new(longitude: f64, latitude: f64) -> GeoResult<Self> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::OutOfRange {
                longitude,
                latitude,
            });
        }

        // `+ 0.0` folds -0.0 into 0.0 so equal positions compare and hash alike.
        Ok(Self {
            longitude: longitude + 0.0,
            latitude: latitude + 0.0,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub(crate) fn to_coord(self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    pub(crate) fn bits(&self) -> (u64, u64) {
        (self.longitude.to_bits(), self.latitude.to_bits())
    }
}

impl FromStr for GeoPoint {
    type Err = GeoError;

    /// Parses `"longitude,latitude"` text such as `"24.94,60.17"`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || GeoError::MalformedCoordinate(value.to_string());

        let mut parts = value.split(',');
        let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let longitude = lon.trim().parse::<f64>().map_err(|_| malformed())?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| malformed())?;
        Self::new(longitude, latitude)
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = GeoError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(value[0], value[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(value: GeoPoint) -> Self {
        [value.longitude, value.latitude]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRepr {
    Pair([f64; 2]),
    GeoJson {
        #[serde(rename = "type")]
        kind: String,
        coordinates: [f64; 2],
    },
}

impl TryFrom<PointRepr> for GeoPoint {
    type Error = GeoError;

    fn try_from(value: PointRepr) -> Result<Self, Self::Error> {
        match value {
            PointRepr::Pair(pair) => Self::try_from(pair),
            PointRepr::GeoJson { kind, coordinates } => {
                if kind != "Point" {
                    return Err(GeoError::UnsupportedGeometry {
                        expected: "Point",
                        found: kind,
                    });
                }
                Self::try_from(coordinates)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GeoPoint;
    use crate::spatial::GeoError;

    #[test]
    fn parses_lon_lat_text_with_whitespace() {
        let point: GeoPoint = " 24.5 , 60.25 ".parse().unwrap();
        assert_eq!(point.longitude(), 24.5);
        assert_eq!(point.latitude(), 60.25);
    }

    #[test]
    fn rejects_malformed_text() {
        for input in ["", "10", "10,", "a,b", "1,2,3", "10;20"] {
            let err = input.parse::<GeoPoint>().unwrap_err();
            assert!(
                matches!(err, GeoError::MalformedCoordinate(_)),
                "`{input}` should be malformed, got {err:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_and_non_finite_values() {
        assert!(matches!(
            GeoPoint::new(180.5, 0.0),
            Err(GeoError::OutOfRange { .. })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -90.1),
            Err(GeoError::OutOfRange { .. })
        ));
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(GeoError::OutOfRange { .. })
        ));
        assert!(GeoPoint::new(-180.0, 90.0).is_ok());
    }

    #[test]
    fn deserializes_plain_pair_and_geojson_point() {
        let plain: GeoPoint = serde_json::from_str("[5.0, 6.0]").unwrap();
        let geojson: GeoPoint =
            serde_json::from_str(r#"{"type":"Point","coordinates":[5.0,6.0]}"#).unwrap();
        assert_eq!(plain, geojson);
        assert_eq!(serde_json::to_string(&plain).unwrap(), "[5.0,6.0]");
    }

    #[test]
    fn deserialize_rejects_wrong_geojson_type() {
        let result: Result<GeoPoint, _> =
            serde_json::from_str(r#"{"type":"LineString","coordinates":[5.0,6.0]}"#);
        assert!(result.is_err());
    }
}
