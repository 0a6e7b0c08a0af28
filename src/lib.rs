//! # mapmark
//!
//! Keeps a map's markers in step with a list of located search results.
//!
//! The crate does not draw anything. It drives a [`MapSurface`] (whatever map
//! component the host renders with) through a small update cycle:
//!
//! 1. reconcile the result list against the surface's annotations,
//! 2. decide and apply the viewport (follow the user, fixed location, or nothing),
//! 3. hand out recycled marker views for annotations that need one.
//!
//! Taps on a marker's detail control are routed back to the host as the
//! originating [`SearchResult`].

mod macros;

pub mod core;
pub mod data;
pub mod headless;
pub mod input;
pub mod layers;
pub mod location;
pub mod prelude;
pub mod traits;

pub use crate::core::constants;

pub use crate::core::{
    config::{MapConfig, ViewportOptions, ViewportProfile},
    geo::{CoordinateRegion, CoordinateSpan, LatLng},
    map::{AnnotationMap, CycleReport, UpdateReason},
    viewport::{InteractionToggles, ViewportCommand, ViewportController, ViewportState},
};

pub use data::result::{ResultId, SearchResult};

pub use headless::HeadlessMap;

pub use input::{
    events::{MapDelegate, MapEvent, MapEventHandler},
    selection::SelectionRouter,
};

pub use layers::{
    annotation::{format_distance, Annotation},
    marker::{ActionControl, ControlKind, MarkerView, MarkerViewPool, PoolStats, ReuseKey, ViewId},
    reconciler::{AnnotationReconciler, ReconcileReport},
};

pub use location::{ChannelLocationFeed, LocationSender, ObservableLocation, Subscription};

pub use traits::{LocationSource, MapSurface};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid distance: {0}")]
    InvalidDistance(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
