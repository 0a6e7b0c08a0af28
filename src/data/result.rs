use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::{core::geo::LatLng, MapError, Result};

/// Stable identity of a search result
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(String);

impl ResultId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResultId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ResultId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One located search result, as delivered by the host's search backend.
///
/// Read-only once received. The map keeps it behind an [`Arc`](std::sync::Arc) so the exact
/// object can be handed back when its marker is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireResult", into = "WireResult")]
pub struct SearchResult {
    pub id: ResultId,
    pub title: String,
    pub coordinate: LatLng,
    /// Meters from the search origin
    pub distance: f64,
}

/// Flat JSON shape used by search backends
#[derive(Serialize, Deserialize)]
struct WireResult {
    id: ResultId,
    title: String,
    lat: f64,
    #[serde(alias = "lng")]
    lon: f64,
    #[serde(alias = "distance")]
    dist: f64,
}

impl From<WireResult> for SearchResult {
    fn from(wire: WireResult) -> Self {
        Self::new(wire.id, wire.title, LatLng::new(wire.lat, wire.lon), wire.dist)
    }
}

impl From<SearchResult> for WireResult {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.id,
            title: result.title,
            lat: result.coordinate.lat,
            lon: result.coordinate.lng,
            dist: result.distance,
        }
    }
}

impl SearchResult {
    pub fn new(
        id: impl Into<ResultId>,
        title: impl Into<String>,
        coordinate: LatLng,
        distance: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            coordinate,
            distance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.coordinate.validate()?;
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(MapError::InvalidDistance(format!(
                "result {} has distance {}",
                self.id, self.distance
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON array of results.
    pub fn list_from_json(json: &str) -> Result<Vec<SearchResult>> {
        let results: Vec<SearchResult> = serde_json::from_str(json)?;
        for result in &results {
            result.validate()?;
        }
        Ok(results)
    }

    pub fn list_from_file(path: impl AsRef<Path>) -> Result<Vec<SearchResult>> {
        let json = std::fs::read_to_string(path)?;
        Self::list_from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_result_list() {
        let json = r#"[
            {"id": "r1", "title": "Eiffel Tower", "lat": 48.8584, "lon": 2.2945, "dist": 120},
            {"id": "r2", "title": "Louvre", "lat": 48.8606, "lng": 2.3376, "distance": 3400.5}
        ]"#;
        let results = SearchResult::list_from_json(json).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id.as_str(), "r1");
        assert_eq!(results[0].coordinate, LatLng::new(48.8584, 2.2945));
        assert_eq!(results[0].distance, 120.0);
        assert_eq!(results[1].distance, 3400.5);
    }

    #[test]
    fn test_rejects_negative_distance() {
        let json = r#"[{"id": "r1", "title": "x", "lat": 1.0, "lon": 1.0, "dist": -3}]"#;
        assert!(matches!(
            SearchResult::list_from_json(json),
            Err(MapError::InvalidDistance(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_coordinate() {
        let result = SearchResult::new("r1", "x", LatLng::new(120.0, 0.0), 1.0);
        assert!(matches!(
            result.validate(),
            Err(MapError::InvalidCoordinates(_))
        ));
    }
}
