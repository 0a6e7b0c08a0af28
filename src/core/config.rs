//! Configuration for annotation maps
//!
//! Viewport behavior is picked through a [`ViewportProfile`] preset or custom
//! [`ViewportOptions`]. [`MapConfig`] bundles that with the fixed-location
//! override and marker reuse settings, and can be loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        constants::{
            DEFAULT_POOL_CAPACITY, DEFAULT_REUSE_KEY, FIXED_LOCATION_SPAN, FOLLOW_USER_SPAN,
            MAX_FOLLOW_USER_SPAN, MIN_FOLLOW_USER_SPAN,
        },
        geo::LatLng,
    },
    MapError, Result,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewportProfile {
    /// Street-level follow span, for walking-distance results
    Nearby,
    /// Wide follow span showing the surrounding area
    Overview,
    Custom(ViewportOptions),
}

impl ViewportProfile {
    pub fn resolve(&self) -> ViewportOptions {
        match self {
            Self::Nearby => ViewportOptions {
                follow_span: MIN_FOLLOW_USER_SPAN,
                fixed_span: FIXED_LOCATION_SPAN,
                animate_follow: true,
                lock_rotation_after_follow: true,
            },
            Self::Overview => ViewportOptions {
                follow_span: FOLLOW_USER_SPAN,
                fixed_span: FIXED_LOCATION_SPAN,
                animate_follow: true,
                lock_rotation_after_follow: true,
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for ViewportProfile {
    fn default() -> Self {
        Self::Overview
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    /// Degrees shown when first centering on the device
    pub follow_span: f64,
    /// Degrees shown around a fixed location
    pub fixed_span: f64,
    pub animate_follow: bool,
    /// Disable rotation once the viewport has centered on the device
    pub lock_rotation_after_follow: bool,
}

impl ViewportOptions {
    /// Follow span clamped to the supported zoom-out range
    pub fn clamped_follow_span(&self) -> f64 {
        self.follow_span
            .clamp(MIN_FOLLOW_USER_SPAN, MAX_FOLLOW_USER_SPAN)
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        ViewportProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Pin the viewport here instead of following the device.
    /// `(0, 0)` counts as not set.
    pub fixed_location: Option<LatLng>,
    pub viewport: ViewportOptions,
    pub reuse_key: String,
    /// Live views a [`HeadlessMap`](crate::headless::HeadlessMap) keeps before requeueing
    pub pool_capacity: usize,
}

impl MapConfig {
    pub fn with_profile(profile: ViewportProfile) -> Self {
        Self {
            viewport: profile.resolve(),
            ..Self::default()
        }
    }

    pub fn with_fixed_location(mut self, location: LatLng) -> Self {
        self.fixed_location = Some(location);
        self
    }

    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// The override, if one was supplied with a non-sentinel value
    pub fn effective_fixed_location(&self) -> Option<LatLng> {
        self.fixed_location.filter(|l| !l.is_unset_sentinel())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(location) = self.effective_fixed_location() {
            location.validate()?;
        }
        if !(self.viewport.follow_span > 0.0) || !(self.viewport.fixed_span > 0.0) {
            return Err(MapError::Config(format!(
                "spans must be positive (follow {}, fixed {})",
                self.viewport.follow_span, self.viewport.fixed_span
            )));
        }
        if self.reuse_key.is_empty() {
            return Err(MapError::Config("reuse key must not be empty".to_string()));
        }
        if self.pool_capacity == 0 {
            return Err(MapError::Config("pool capacity must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fixed_location: None,
            viewport: ViewportOptions::default(),
            reuse_key: DEFAULT_REUSE_KEY.to_string(),
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_profile_presets() {
        let nearby = ViewportProfile::Nearby.resolve();
        let overview = ViewportProfile::Overview.resolve();
        assert_eq!(nearby.follow_span, 0.01);
        assert_eq!(overview.follow_span, 0.1);
        assert_eq!(nearby.fixed_span, 0.005);

        let custom = ViewportOptions {
            follow_span: 0.05,
            ..ViewportOptions::default()
        };
        assert_eq!(ViewportProfile::Custom(custom.clone()).resolve(), custom);
    }

    #[test]
    fn test_follow_span_clamped() {
        let options = ViewportOptions {
            follow_span: 3.0,
            ..ViewportOptions::default()
        };
        assert_eq!(options.clamped_follow_span(), 0.1);
    }

    #[test]
    fn test_sentinel_fixed_location_ignored() {
        let config = MapConfig::default().with_fixed_location(LatLng::new(0.0, 0.0));
        assert_eq!(config.effective_fixed_location(), None);

        let config = MapConfig::default().with_fixed_location(LatLng::new(52.52, 13.405));
        assert_eq!(
            config.effective_fixed_location(),
            Some(LatLng::new(52.52, 13.405))
        );
    }

    #[test]
    fn test_config_from_json() {
        let config = MapConfig::from_json_str(
            r#"{"fixed_location": {"lat": 52.52, "lon": 13.405}, "pool_capacity": 4}"#,
        )
        .unwrap();
        assert_eq!(config.pool_capacity, 4);
        assert_eq!(config.reuse_key, "location");
        assert_eq!(config.viewport, ViewportOptions::default());
    }

    #[test]
    fn test_config_validation() {
        assert!(MapConfig::default().validate().is_ok());
        assert!(MapConfig::default().with_pool_capacity(0).validate().is_err());
        assert!(MapConfig::default()
            .with_fixed_location(LatLng::new(95.0, 0.0))
            .validate()
            .is_err());
        assert!(matches!(
            MapConfig::from_json_str(r#"{"viewport": {"follow_span": -1.0}}"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            MapConfig::from_json_str("not json"),
            Err(MapError::Serialization(_))
        ));
    }
}
