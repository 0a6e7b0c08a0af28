use serde::{Deserialize, Serialize};

use crate::{MapError, Result};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Returns an error naming the coordinate if it is out of range or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.lat.is_finite() && self.lng.is_finite() && self.is_valid() {
            Ok(())
        } else {
            Err(MapError::InvalidCoordinates(format!(
                "({}, {}) is outside [-90, 90] x [-180, 180]",
                self.lat, self.lng
            )))
        }
    }

    /// `(0, 0)` is the "not configured" value for a fixed-location override.
    ///
    /// Only override handling uses this. A device location of `(0, 0)` is a
    /// real position.
    pub fn is_unset_sentinel(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Extent of a region in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSpan {
    pub lat_delta: f64,
    pub lng_delta: f64,
}

impl CoordinateSpan {
    pub fn new(lat_delta: f64, lng_delta: f64) -> Self {
        Self {
            lat_delta,
            lng_delta,
        }
    }

    /// Same delta on both axes
    pub fn uniform(delta: f64) -> Self {
        Self::new(delta, delta)
    }
}

/// A center plus span, the unit a map surface zooms to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRegion {
    pub center: LatLng,
    pub span: CoordinateSpan,
}

impl CoordinateRegion {
    pub fn new(center: LatLng, span: CoordinateSpan) -> Self {
        Self { center, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(48.8584, 2.2945);
        assert_eq!(coord.lat, 48.8584);
        assert_eq!(coord.lng, 2.2945);
        assert!(coord.is_valid());
        assert!(coord.validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(LatLng::new(91.0, 0.0).validate().is_err());
        assert!(LatLng::new(0.0, -181.0).validate().is_err());
        assert!(LatLng::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_unset_sentinel() {
        assert!(LatLng::default().is_unset_sentinel());
        assert!(!LatLng::new(0.0, 0.0001).is_unset_sentinel());
    }

    #[test]
    fn test_lon_alias() {
        let coord: LatLng = serde_json::from_str(r#"{"lat": 1.5, "lon": 2.5}"#).unwrap();
        assert_eq!(coord, LatLng::new(1.5, 2.5));
    }
}
