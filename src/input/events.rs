use std::sync::Arc;

use crate::{
    input::selection::SelectionRouter,
    layers::{
        annotation::Annotation,
        marker::{ActionControl, MarkerView, MarkerViewPool, PoolStats},
    },
    traits::MapSurface,
};

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Events a map surface raises back into the core
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// An annotation is about to be shown and has no view yet
    AnnotationNeedsView { annotation: Arc<Annotation> },
    /// The detail control in a marker's callout was tapped
    AccessoryTapped { control: ActionControl },
}

/// Callbacks a map surface makes into the core, one method per event.
pub trait MapEventHandler {
    fn view_for_annotation(
        &mut self,
        surface: &mut dyn MapSurface,
        annotation: &Arc<Annotation>,
    ) -> MarkerView;

    fn accessory_tapped(&mut self, control: &ActionControl) -> EventHandled;

    /// Routes `event` to the matching method. Requested views are displayed
    /// on `surface` right away.
    fn handle_event(&mut self, surface: &mut dyn MapSurface, event: MapEvent) -> EventHandled {
        match event {
            MapEvent::AnnotationNeedsView { annotation } => {
                let view = self.view_for_annotation(surface, &annotation);
                surface.display_view(view);
                EventHandled::Handled
            }
            MapEvent::AccessoryTapped { control } => self.accessory_tapped(&control),
        }
    }
}

/// Default handler: marker views from a [`MarkerViewPool`], taps through a
/// [`SelectionRouter`]
#[derive(Debug, Default)]
pub struct MapDelegate {
    pub pool: MarkerViewPool,
    pub router: SelectionRouter,
}

impl MapDelegate {
    pub fn new(pool: MarkerViewPool, router: SelectionRouter) -> Self {
        Self { pool, router }
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }
}

impl MapEventHandler for MapDelegate {
    fn view_for_annotation(
        &mut self,
        surface: &mut dyn MapSurface,
        annotation: &Arc<Annotation>,
    ) -> MarkerView {
        self.pool.obtain_view(surface, annotation)
    }

    fn accessory_tapped(&mut self, control: &ActionControl) -> EventHandled {
        if self.router.on_action(control) {
            EventHandled::Handled
        } else {
            EventHandled::NotHandled
        }
    }
}
