//! In-memory map surface
//!
//! [`HeadlessMap`] implements [`MapSurface`] without drawing anything. It keeps
//! a bounded number of live marker views; when a view is needed and the limit is
//! reached, the oldest live view is requeued and handed out again, the way a
//! scrolling map recycles markers that left the screen.

use std::{collections::VecDeque, sync::Arc};

use fxhash::FxHashMap;

use crate::{
    core::{
        config::MapConfig, constants::DEFAULT_POOL_CAPACITY, geo::CoordinateRegion,
        viewport::InteractionToggles,
    },
    data::result::ResultId,
    layers::{
        annotation::Annotation,
        marker::{ActionControl, MarkerView, ReuseKey, ViewId},
    },
    traits::MapSurface,
};

#[derive(Debug)]
pub struct HeadlessMap {
    annotations: Vec<Arc<Annotation>>,
    view_requests: VecDeque<Arc<Annotation>>,
    live_views: VecDeque<MarkerView>,
    reuse_queue: FxHashMap<ReuseKey, VecDeque<MarkerView>>,
    capacity: usize,
    region: Option<CoordinateRegion>,
    region_history: Vec<(CoordinateRegion, bool)>,
    interaction: InteractionToggles,
    shows_user_location: bool,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::with_pool_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Sized by the config's `pool_capacity`
    pub fn from_config(config: &MapConfig) -> Self {
        Self::with_pool_capacity(config.pool_capacity)
    }

    /// `capacity` live views at most; clamped to at least one
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self {
            annotations: Vec::new(),
            view_requests: VecDeque::new(),
            live_views: VecDeque::new(),
            reuse_queue: FxHashMap::default(),
            capacity: capacity.max(1),
            region: None,
            region_history: Vec::new(),
            interaction: InteractionToggles::default(),
            shows_user_location: false,
        }
    }

    pub fn region(&self) -> Option<CoordinateRegion> {
        self.region
    }

    /// Every region set so far, with its animation flag
    pub fn region_history(&self) -> &[(CoordinateRegion, bool)] {
        &self.region_history
    }

    pub fn shows_user_location(&self) -> bool {
        self.shows_user_location
    }

    pub fn live_views(&self) -> impl Iterator<Item = &MarkerView> {
        self.live_views.iter()
    }

    pub fn live_view_count(&self) -> usize {
        self.live_views.len()
    }

    pub fn queued_view_count(&self) -> usize {
        self.reuse_queue.values().map(VecDeque::len).sum()
    }

    /// The live view currently showing the annotation for `id`
    pub fn view_for(&self, id: &ResultId) -> Option<&MarkerView> {
        self.live_views
            .iter()
            .find(|view| view.annotation().map(|a| a.id() == id).unwrap_or(false))
    }

    /// The detail control of a live view, as a tap on it would deliver
    pub fn accessory_of(&self, view_id: ViewId) -> Option<ActionControl> {
        self.live_views
            .iter()
            .find(|view| view.id() == view_id)
            .and_then(|view| view.accessory().cloned())
    }

    fn requeue(&mut self, mut view: MarkerView) {
        view.prepare_for_reuse();
        self.reuse_queue
            .entry(view.reuse_key().clone())
            .or_default()
            .push_back(view);
    }

    fn requeue_views_showing(&mut self, id: &ResultId) {
        let (gone, kept): (VecDeque<MarkerView>, VecDeque<MarkerView>) =
            self.live_views.drain(..).partition(|view| {
                view.annotation().map(|a| a.id() == id).unwrap_or(false)
            });
        self.live_views = kept;
        for view in gone {
            self.requeue(view);
        }
    }
}

impl Default for HeadlessMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for HeadlessMap {
    fn add_annotation(&mut self, annotation: Arc<Annotation>) {
        self.view_requests.push_back(Arc::clone(&annotation));
        self.annotations.push(annotation);
    }

    fn remove_annotation(&mut self, id: &ResultId) -> Option<Arc<Annotation>> {
        let index = self.annotations.iter().position(|a| a.id() == id)?;
        let removed = self.annotations.remove(index);
        self.view_requests.retain(|a| a.id() != id);
        self.requeue_views_showing(id);
        Some(removed)
    }

    fn annotations(&self) -> Vec<Arc<Annotation>> {
        self.annotations.clone()
    }

    fn take_view_requests(&mut self) -> Vec<Arc<Annotation>> {
        self.view_requests.drain(..).collect()
    }

    fn dequeue_reusable_view(&mut self, reuse_key: &ReuseKey) -> Option<MarkerView> {
        if let Some(view) = self
            .reuse_queue
            .get_mut(reuse_key)
            .and_then(VecDeque::pop_front)
        {
            return Some(view);
        }
        if self.live_views.len() < self.capacity {
            return None;
        }
        // At capacity: the oldest live view of this kind scrolls off and is reused.
        let index = self
            .live_views
            .iter()
            .position(|view| view.reuse_key() == reuse_key)?;
        let mut view = self.live_views.remove(index)?;
        view.prepare_for_reuse();
        Some(view)
    }

    fn display_view(&mut self, view: MarkerView) {
        self.live_views.push_back(view);
        while self.live_views.len() > self.capacity {
            if let Some(oldest) = self.live_views.pop_front() {
                self.requeue(oldest);
            }
        }
    }

    fn set_region(&mut self, region: CoordinateRegion, animated: bool) {
        self.region = Some(region);
        self.region_history.push((region, animated));
    }

    fn interaction(&self) -> InteractionToggles {
        self.interaction
    }

    fn set_interaction(&mut self, toggles: InteractionToggles) {
        self.interaction = toggles;
    }

    fn set_shows_user_location(&mut self, shows: bool) {
        self.shows_user_location = shows;
    }

    fn annotation_count(&self) -> usize {
        self.annotations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, data::result::SearchResult, layers::marker::MarkerViewPool};

    fn annotation(id: &str) -> Arc<Annotation> {
        let result = SearchResult::new(id, id, LatLng::new(1.0, 1.0), 5.0);
        Arc::new(Annotation::from_result(Arc::new(result)))
    }

    #[test]
    fn test_view_requests_follow_annotations() {
        let mut map = HeadlessMap::new();
        map.add_annotation(annotation("a"));
        map.add_annotation(annotation("b"));
        map.remove_annotation(&ResultId::from("a"));

        let requests = map.take_view_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id().as_str(), "b");
        assert!(map.take_view_requests().is_empty());
    }

    #[test]
    fn test_removed_annotation_requeues_view() {
        let mut map = HeadlessMap::new();
        let mut pool = MarkerViewPool::default();
        let a = annotation("a");
        map.add_annotation(Arc::clone(&a));
        let view = pool.obtain_view(&mut map, &a);
        map.display_view(view);
        assert_eq!(map.live_view_count(), 1);

        map.remove_annotation(&ResultId::from("a"));
        assert_eq!(map.live_view_count(), 0);
        assert_eq!(map.queued_view_count(), 1);

        let b = annotation("b");
        let view = pool.obtain_view(&mut map, &b);
        assert_eq!(view.id(), ViewId(0));
        assert_eq!(pool.stats().created, 1);
    }

    #[test]
    fn test_live_views_bounded() {
        let mut map = HeadlessMap::with_pool_capacity(2);
        let mut pool = MarkerViewPool::default();
        for id in ["a", "b", "c", "d"] {
            let annotation = annotation(id);
            map.add_annotation(Arc::clone(&annotation));
            let view = pool.obtain_view(&mut map, &annotation);
            map.display_view(view);
        }

        assert_eq!(map.live_view_count(), 2);
        assert_eq!(pool.stats().created, 2);
        assert_eq!(pool.stats().reused, 2);
        assert!(map.view_for(&ResultId::from("d")).is_some());
        assert!(map.view_for(&ResultId::from("a")).is_none());
    }

    #[test]
    fn test_from_config_uses_pool_capacity() {
        let config = MapConfig::default().with_pool_capacity(1);
        let mut map = HeadlessMap::from_config(&config);
        let mut pool = MarkerViewPool::default();
        for id in ["a", "b"] {
            let annotation = annotation(id);
            map.add_annotation(Arc::clone(&annotation));
            let view = pool.obtain_view(&mut map, &annotation);
            map.display_view(view);
        }
        assert_eq!(map.live_view_count(), 1);
        assert_eq!(pool.stats().created, 1);
    }
}
