//! Core constants for marker reuse and viewport spans.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Reuse key shared by every search-result marker view.
pub const DEFAULT_REUSE_KEY: &str = "location";

/// Span (degrees of latitude/longitude) used when pinned to a fixed location.
pub const FIXED_LOCATION_SPAN: f64 = 0.005;

/// Span used the first time the viewport centers on the device.
pub const FOLLOW_USER_SPAN: f64 = 0.1;

/// Tightest span allowed for the follow-user transition.
pub const MIN_FOLLOW_USER_SPAN: f64 = 0.01;

/// Widest span allowed for the follow-user transition.
pub const MAX_FOLLOW_USER_SPAN: f64 = 0.1;

/// Unit suffix appended to formatted distances.
pub const DISTANCE_UNIT: &str = "m";

/// Live marker views kept by [`HeadlessMap`](crate::headless::HeadlessMap)
/// before the oldest is requeued for reuse.
pub const DEFAULT_POOL_CAPACITY: usize = 64;
