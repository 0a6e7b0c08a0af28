use std::{
    cell::Cell,
    rc::Rc,
    sync::Arc,
};

use crate::{
    core::{
        config::MapConfig,
        geo::LatLng,
        viewport::{InteractionToggles, ViewportController, ViewportState},
    },
    data::result::SearchResult,
    input::{
        events::{EventHandled, MapDelegate, MapEvent, MapEventHandler},
        selection::SelectionRouter,
    },
    layers::{
        marker::{ActionControl, MarkerViewPool, PoolStats, ReuseKey},
        reconciler::{AnnotationReconciler, ReconcileReport},
    },
    location::Subscription,
    macros::{map_debug, map_trace, map_warn},
    traits::{LocationSource, MapSurface},
    Result,
};

/// Why an update cycle is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateReason {
    Initial,
    ResultsChanged,
    LocationChanged,
    Forced,
}

/// Collects update reasons between cycles
#[derive(Debug, Clone, Default)]
pub struct UpdateTrigger {
    reasons: Vec<UpdateReason>,
    cycles: u64,
}

impl UpdateTrigger {
    pub fn new() -> Self {
        Self {
            reasons: vec![UpdateReason::Initial],
            cycles: 0,
        }
    }

    pub fn mark(&mut self, reason: UpdateReason) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// Takes the pending reasons and counts a cycle, or `None` if nothing is due
    pub fn take(&mut self) -> Option<Vec<UpdateReason>> {
        if self.reasons.is_empty() {
            return None;
        }
        self.cycles += 1;
        Some(std::mem::take(&mut self.reasons))
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

/// What one update cycle did
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub reasons: Vec<UpdateReason>,
    pub reconcile: ReconcileReport,
    pub viewport: ViewportState,
    pub views_configured: usize,
}

/// Location shared between the subscription callback and the map
#[derive(Debug, Default)]
struct LocationCell {
    latest: Cell<Option<LatLng>>,
    changed: Cell<bool>,
}

/// One map view's annotation and viewport engine.
///
/// Owns the surface, the current result list and the location subscription.
/// Each cycle reconciles annotations first, then evaluates the viewport, then
/// configures views for annotations the surface asked about.
pub struct AnnotationMap<S: MapSurface> {
    surface: S,
    results: Vec<Arc<SearchResult>>,
    reconciler: AnnotationReconciler,
    viewport: ViewportController,
    delegate: MapDelegate,
    location: Rc<LocationCell>,
    subscription: Option<Subscription>,
    trigger: UpdateTrigger,
}

impl<S: MapSurface> AnnotationMap<S> {
    /// Creates the map with pitch disabled on `surface`.
    pub fn new(mut surface: S, config: MapConfig) -> Result<Self> {
        config.validate()?;

        let toggles = surface.interaction();
        surface.set_interaction(InteractionToggles {
            pitch: false,
            ..toggles
        });

        let fixed_location = config.effective_fixed_location();
        map_debug!(
            "annotation map created (fixed location: {:?}, reuse key: {})",
            fixed_location,
            config.reuse_key
        );

        Ok(Self {
            surface,
            results: Vec::new(),
            reconciler: AnnotationReconciler::new(),
            viewport: ViewportController::new(fixed_location, config.viewport),
            delegate: MapDelegate::new(
                MarkerViewPool::new(ReuseKey::new(config.reuse_key)),
                SelectionRouter::new(),
            ),
            location: Rc::new(LocationCell::default()),
            subscription: None,
            trigger: UpdateTrigger::new(),
        })
    }

    /// Observes `source`, replacing any earlier subscription.
    pub fn attach_location(&mut self, source: &dyn LocationSource) {
        self.set_location(source.current());

        let cell = Rc::clone(&self.location);
        let subscription = source.subscribe(Box::new(move |location| {
            cell.latest.set(location);
            cell.changed.set(true);
        }));
        if self.subscription.replace(subscription).is_some() {
            map_debug!("replaced location subscription");
        }
    }

    pub fn detach_location(&mut self) {
        self.subscription = None;
    }

    /// Sets the device location directly, for hosts without a [`LocationSource`].
    pub fn set_location(&mut self, location: Option<LatLng>) {
        self.location.latest.set(location);
        self.location.changed.set(true);
    }

    pub fn location(&self) -> Option<LatLng> {
        self.location.latest.get()
    }

    /// Replaces the result list; the next cycle reconciles against it.
    pub fn set_results(&mut self, results: Vec<SearchResult>) {
        self.set_shared_results(results.into_iter().map(Arc::new).collect());
    }

    pub fn set_shared_results(&mut self, results: Vec<Arc<SearchResult>>) {
        self.results = results;
        self.trigger.mark(UpdateReason::ResultsChanged);
    }

    pub fn results(&self) -> &[Arc<SearchResult>] {
        &self.results
    }

    /// Registers the selection callback, replacing any previous one.
    pub fn on_select(&mut self, callback: impl FnMut(Arc<SearchResult>) + 'static) {
        self.delegate.router.set_callback(callback);
    }

    /// Runs a cycle if results or location changed since the last one.
    pub fn process_pending(&mut self) -> Option<CycleReport> {
        if self.location.changed.replace(false) {
            self.trigger.mark(UpdateReason::LocationChanged);
        }
        let reasons = self.trigger.take()?;
        Some(self.run_cycle(reasons))
    }

    /// Runs a cycle now, whether or not anything changed.
    pub fn update(&mut self) -> CycleReport {
        self.trigger.mark(UpdateReason::Forced);
        self.location.changed.set(false);
        let reasons = self.trigger.take().unwrap_or_default();
        self.run_cycle(reasons)
    }

    fn run_cycle(&mut self, reasons: Vec<UpdateReason>) -> CycleReport {
        map_trace!("update cycle {} ({:?})", self.trigger.cycles(), reasons);

        let reconcile = self.reconciler.reconcile(&mut self.surface, &self.results);
        let viewport = self.viewport.apply(&mut self.surface, self.location.latest.get());

        let requests = self.surface.take_view_requests();
        let views_configured = requests.len();
        for annotation in requests {
            self.delegate.handle_event(
                &mut self.surface,
                MapEvent::AnnotationNeedsView { annotation },
            );
        }

        CycleReport {
            reasons,
            reconcile,
            viewport,
            views_configured,
        }
    }

    /// Delivers a tap on a marker's detail control to the selection callback.
    pub fn accessory_tapped(&mut self, control: &ActionControl) -> EventHandled {
        let handled = self.delegate.accessory_tapped(control);
        if handled == EventHandled::NotHandled {
            map_trace!("accessory tap not delivered");
        }
        handled
    }

    pub fn handle_event(&mut self, event: MapEvent) -> EventHandled {
        self.delegate.handle_event(&mut self.surface, event)
    }

    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.delegate.pool_stats()
    }

    pub fn is_pending(&self) -> bool {
        self.trigger.is_pending() || self.location.changed.get()
    }

    pub fn cycles(&self) -> u64 {
        self.trigger.cycles()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Drops the location subscription and the selection callback, returning
    /// the surface. Taps not yet delivered are lost.
    pub fn teardown(mut self) -> S {
        if self.trigger.is_pending() {
            map_warn!("tearing down map with an update still pending");
        }
        self.subscription = None;
        self.delegate.router.clear_callback();
        self.surface
    }
}
