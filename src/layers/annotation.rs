use std::sync::Arc;

use crate::{
    core::{
        constants::DISTANCE_UNIT,
        geo::LatLng,
    },
    data::result::{ResultId, SearchResult},
};

/// View-model for one map marker, derived from a [`SearchResult`]
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    title: String,
    subtitle: String,
    coordinate: LatLng,
    result: Arc<SearchResult>,
}

impl Annotation {
    pub fn from_result(result: Arc<SearchResult>) -> Self {
        Self {
            title: result.title.clone(),
            subtitle: format_distance(result.distance),
            coordinate: result.coordinate,
            result,
        }
    }

    pub fn id(&self) -> &ResultId {
        &self.result.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn coordinate(&self) -> LatLng {
        self.coordinate
    }

    /// The result this annotation was built from
    pub fn result(&self) -> &Arc<SearchResult> {
        &self.result
    }

    /// True if this annotation still displays `result` as it is now
    pub fn represents(&self, result: &SearchResult) -> bool {
        self.result.as_ref() == result
    }
}

/// Formats meters as a plain number without trailing fractional zeros,
/// followed by the unit: `120.0` → `"120m"`, `120.50` → `"120.5m"`.
///
/// The number is the shortest form that reads back as the same `f64`, so no
/// precision is dropped.
pub fn format_distance(meters: f64) -> String {
    // -0.0 displays as "-0"
    let meters = if meters == 0.0 { 0.0 } else { meters };
    format!("{}{}", meters, DISTANCE_UNIT)
}
