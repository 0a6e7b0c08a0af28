//! Prelude module for common mapmark types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapmark::prelude::*;`

pub use crate::core::{
    config::{MapConfig, ViewportOptions, ViewportProfile},
    geo::{CoordinateRegion, CoordinateSpan, LatLng},
    map::{AnnotationMap, CycleReport, UpdateReason},
    viewport::{InteractionToggles, ViewportState},
};

pub use crate::data::result::{ResultId, SearchResult};

pub use crate::layers::{
    annotation::{format_distance, Annotation},
    marker::{ActionControl, MarkerView, ReuseKey, ViewId},
};

pub use crate::input::{EventHandled, MapEvent, MapEventHandler};

pub use crate::location::{ChannelLocationFeed, ObservableLocation, Subscription};

pub use crate::headless::HeadlessMap;

pub use crate::traits::{LocationSource, MapSurface};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;
