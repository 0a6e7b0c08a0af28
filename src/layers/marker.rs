use std::{fmt, sync::Arc};

use crate::{
    core::constants::DEFAULT_REUSE_KEY,
    data::result::SearchResult,
    layers::annotation::Annotation,
    macros::{map_debug, map_trace},
    traits::MapSurface,
};

/// Category of recyclable marker view. Views are only reused within a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReuseKey(String);

impl ReuseKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ReuseKey {
    fn default() -> Self {
        Self::new(DEFAULT_REUSE_KEY)
    }
}

impl fmt::Display for ReuseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a marker view object, stable across rebinding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    DetailDisclosure,
}

/// Control shown in a marker's callout, carrying the result it selects
#[derive(Debug, Clone, PartialEq)]
pub struct ActionControl {
    pub kind: ControlKind,
    payload: Option<Arc<SearchResult>>,
}

impl ActionControl {
    pub fn detail_disclosure() -> Self {
        Self {
            kind: ControlKind::DetailDisclosure,
            payload: None,
        }
    }

    pub fn with_payload(mut self, result: Arc<SearchResult>) -> Self {
        self.payload = Some(result);
        self
    }

    pub fn payload(&self) -> Option<&Arc<SearchResult>> {
        self.payload.as_ref()
    }

    pub fn bind(&mut self, result: Arc<SearchResult>) {
        self.payload = Some(result);
    }
}

/// A recyclable marker visual.
///
/// The map surface owns live and queued views; the pool only configures them.
#[derive(Debug, Clone)]
pub struct MarkerView {
    id: ViewId,
    reuse_key: ReuseKey,
    annotation: Option<Arc<Annotation>>,
    can_show_callout: bool,
    accessory: Option<ActionControl>,
}

impl MarkerView {
    fn new(id: ViewId, reuse_key: ReuseKey) -> Self {
        Self {
            id,
            reuse_key,
            annotation: None,
            can_show_callout: false,
            accessory: None,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn reuse_key(&self) -> &ReuseKey {
        &self.reuse_key
    }

    pub fn annotation(&self) -> Option<&Arc<Annotation>> {
        self.annotation.as_ref()
    }

    pub fn can_show_callout(&self) -> bool {
        self.can_show_callout
    }

    pub fn accessory(&self) -> Option<&ActionControl> {
        self.accessory.as_ref()
    }

    /// Detaches the annotation and the control's result, as a surface does when
    /// it queues the view for reuse.
    pub fn prepare_for_reuse(&mut self) {
        self.annotation = None;
        if let Some(control) = self.accessory.as_mut() {
            control.payload = None;
        }
    }

    fn bind(&mut self, annotation: &Arc<Annotation>) {
        self.annotation = Some(Arc::clone(annotation));
        let result = Arc::clone(annotation.result());
        match self.accessory.as_mut() {
            Some(control) => control.bind(result),
            None => self.accessory = Some(ActionControl::detail_disclosure().with_payload(result)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub created: usize,
    pub reused: usize,
}

/// Supplies configured marker views, recycling the surface's queued ones first.
#[derive(Debug)]
pub struct MarkerViewPool {
    reuse_key: ReuseKey,
    next_id: u64,
    stats: PoolStats,
}

impl MarkerViewPool {
    pub fn new(reuse_key: ReuseKey) -> Self {
        Self {
            reuse_key,
            next_id: 0,
            stats: PoolStats::default(),
        }
    }

    pub fn reuse_key(&self) -> &ReuseKey {
        &self.reuse_key
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Returns a view bound to `annotation`, with its detail control's payload
    /// pointing at the annotation's result.
    pub fn obtain_view<S>(&mut self, surface: &mut S, annotation: &Arc<Annotation>) -> MarkerView
    where
        S: MapSurface + ?Sized,
    {
        let mut view = match surface.dequeue_reusable_view(&self.reuse_key) {
            Some(view) => {
                self.stats.reused += 1;
                map_trace!("reusing marker view {:?} for {}", view.id(), annotation.id());
                view
            }
            None => {
                let id = ViewId(self.next_id);
                self.next_id += 1;
                self.stats.created += 1;
                map_debug!("creating marker view {:?} ({})", id, self.reuse_key);

                let mut view = MarkerView::new(id, self.reuse_key.clone());
                view.can_show_callout = true;
                view.accessory = Some(ActionControl::detail_disclosure());
                view
            }
        };
        view.bind(annotation);
        view
    }
}

impl Default for MarkerViewPool {
    fn default() -> Self {
        Self::new(ReuseKey::default())
    }
}
