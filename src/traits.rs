//! Trait seams between the core and its host
//!
//! [`MapSurface`] is what the core needs from the map component that actually
//! renders. [`LocationSource`] is how it observes the device location.

use std::sync::Arc;

use crate::{
    core::{
        geo::{CoordinateRegion, LatLng},
        viewport::InteractionToggles,
    },
    data::result::ResultId,
    layers::{
        annotation::Annotation,
        marker::{MarkerView, ReuseKey},
    },
    location::Subscription,
};

/// Primitives the underlying map component provides.
///
/// All calls happen on the thread that owns the map.
pub trait MapSurface {
    fn add_annotation(&mut self, annotation: Arc<Annotation>);

    /// Removes the annotation for `id`, returning it if present
    fn remove_annotation(&mut self, id: &ResultId) -> Option<Arc<Annotation>>;

    /// Annotations currently on the map
    fn annotations(&self) -> Vec<Arc<Annotation>>;

    /// Annotations that became visible and have no view yet
    fn take_view_requests(&mut self) -> Vec<Arc<Annotation>>;

    /// Pops a queued view of the given category, if one is available
    fn dequeue_reusable_view(&mut self, reuse_key: &ReuseKey) -> Option<MarkerView>;

    /// Shows a configured view for its bound annotation
    fn display_view(&mut self, view: MarkerView);

    fn set_region(&mut self, region: CoordinateRegion, animated: bool);

    fn interaction(&self) -> InteractionToggles;

    fn set_interaction(&mut self, toggles: InteractionToggles);

    fn set_shows_user_location(&mut self, shows: bool);

    /// Number of annotations currently on the map
    fn annotation_count(&self) -> usize {
        self.annotations().len()
    }
}

/// Observable device location.
///
/// `None` means the location is not known yet.
pub trait LocationSource {
    /// Last known location
    fn current(&self) -> Option<LatLng>;

    /// Registers `callback` for every change. Dropping the returned
    /// [`Subscription`] unregisters it.
    fn subscribe(&self, callback: Box<dyn FnMut(Option<LatLng>)>) -> Subscription;
}
