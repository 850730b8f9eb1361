//! Geographic point pairing.

use serde::{Deserialize, Serialize};

/// A lon/lat coordinate pair.
///
/// Stored as two nullable columns; a pair with only one coordinate present
/// reads as "no location".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// Compose a point from scanned columns. Both coordinates are required.
    pub fn from_parts(lon: Option<f64>, lat: Option<f64>) -> Option<Self> {
        match (lon, lat) {
            (Some(lon), Some(lat)) => Some(Self { lon, lat }),
            _ => None,
        }
    }

    /// Decompose an optional point into bindable columns.
    pub fn parts(point: Option<Self>) -> (Option<f64>, Option<f64>) {
        match point {
            Some(p) => (Some(p.lon), Some(p.lat)),
            None => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_coordinates_make_a_point() {
        let point = GeoPoint::from_parts(Some(-122.4), Some(47.6));
        assert_eq!(
            point,
            Some(GeoPoint {
                lon: -122.4,
                lat: 47.6
            })
        );
    }

    #[test]
    fn half_present_pair_is_no_location() {
        assert_eq!(GeoPoint::from_parts(Some(-122.4), None), None);
        assert_eq!(GeoPoint::from_parts(None, Some(47.6)), None);
        assert_eq!(GeoPoint::from_parts(None, None), None);
    }

    #[test]
    fn parts_round_trip() {
        let point = GeoPoint {
            lon: 2.35,
            lat: 48.85,
        };
        assert_eq!(GeoPoint::parts(Some(point)), (Some(2.35), Some(48.85)));
        assert_eq!(GeoPoint::parts(None), (None, None));
    }
}
