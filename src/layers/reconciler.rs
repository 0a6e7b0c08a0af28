use std::sync::Arc;

use fxhash::{FxHashMap, FxHashSet};

use crate::{
    data::result::{ResultId, SearchResult},
    layers::annotation::Annotation,
    macros::map_debug,
    traits::MapSurface,
};

/// Outcome of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: usize,
    pub removed: usize,
    pub retained: usize,
    /// Equal results that arrived as new objects; their annotations were
    /// rebuilt so they point at the current result.
    pub rebound: usize,
}

impl ReconcileReport {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.rebound == 0
    }
}

/// Brings a surface's annotations in line with a result list.
///
/// Annotations are keyed by result id. An annotation already built from the
/// very same result object is left alone. One whose result arrived again as a
/// new, equal object is rebuilt around the new object, so taps hand back a
/// member of the current list. A changed result has its annotation replaced,
/// and results that disappeared lose theirs. The first occurrence of a
/// repeated id wins, on the surface as well as in the result list.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotationReconciler;

impl AnnotationReconciler {
    pub fn new() -> Self {
        Self
    }

    pub fn reconcile<S>(&self, surface: &mut S, results: &[Arc<SearchResult>]) -> ReconcileReport
    where
        S: MapSurface + ?Sized,
    {
        let mut report = ReconcileReport::default();
        let mut existing: FxHashMap<ResultId, Arc<Annotation>> = FxHashMap::default();
        let mut repeated: Vec<ResultId> = Vec::new();
        for annotation in surface.annotations() {
            let id = annotation.id().clone();
            if existing.contains_key(&id) {
                repeated.push(id);
            } else {
                existing.insert(id, annotation);
            }
        }
        // Clear every copy of a repeated id; it is added back once below.
        for id in repeated {
            if existing.remove(&id).is_some() {
                map_debug!("surface held repeated annotations for {}", id);
            }
            while surface.remove_annotation(&id).is_some() {
                report.removed += 1;
            }
        }

        let mut seen: FxHashSet<&ResultId> = FxHashSet::default();
        for result in results {
            if !seen.insert(&result.id) {
                continue;
            }
            match existing.remove(&result.id) {
                Some(annotation) if Arc::ptr_eq(annotation.result(), result) => {
                    report.retained += 1;
                }
                Some(annotation) => {
                    surface.remove_annotation(&result.id);
                    surface.add_annotation(Arc::new(Annotation::from_result(Arc::clone(result))));
                    if annotation.represents(result) {
                        report.rebound += 1;
                    } else {
                        report.removed += 1;
                        report.added += 1;
                    }
                }
                None => {
                    surface.add_annotation(Arc::new(Annotation::from_result(Arc::clone(result))));
                    report.added += 1;
                }
            }
        }

        for stale in existing.keys() {
            surface.remove_annotation(stale);
            report.removed += 1;
        }

        if !report.is_noop() {
            map_debug!(
                "reconciled {} results: +{} -{} ={} ~{}",
                results.len(),
                report.added,
                report.removed,
                report.retained,
                report.rebound
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, headless::HeadlessMap};

    fn result(id: &str, distance: f64) -> Arc<SearchResult> {
        Arc::new(SearchResult::new(
            id,
            format!("Result {}", id),
            LatLng::new(48.85, 2.35),
            distance,
        ))
    }

    fn ids(surface: &HeadlessMap) -> Vec<String> {
        let mut ids: Vec<String> = surface
            .annotations()
            .iter()
            .map(|a| a.id().to_string())
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_adds_one_annotation_per_result() {
        let mut surface = HeadlessMap::new();
        let results = vec![result("a", 1.0), result("b", 2.0), result("c", 3.0)];

        let report = AnnotationReconciler::new().reconcile(&mut surface, &results);
        assert_eq!(
            report,
            ReconcileReport { added: 3, ..ReconcileReport::default() }
        );
        assert_eq!(ids(&surface), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unchanged_results_do_not_grow() {
        let mut surface = HeadlessMap::new();
        let reconciler = AnnotationReconciler::new();
        let results = vec![result("a", 1.0), result("b", 2.0)];

        reconciler.reconcile(&mut surface, &results);
        let before = surface.annotations();
        let report = reconciler.reconcile(&mut surface, &results);

        assert!(report.is_noop());
        assert_eq!(report.retained, 2);
        assert_eq!(surface.annotation_count(), 2);
        let after = surface.annotations();
        for (old, new) in before.iter().zip(after.iter()) {
            assert!(Arc::ptr_eq(old, new));
        }
    }

    #[test]
    fn test_refetched_equal_results_are_rebound() {
        let mut surface = HeadlessMap::new();
        let reconciler = AnnotationReconciler::new();

        reconciler.reconcile(&mut surface, &[result("a", 1.0)]);
        let refetched = result("a", 1.0);
        let report = reconciler.reconcile(&mut surface, &[Arc::clone(&refetched)]);

        assert_eq!(
            report,
            ReconcileReport { rebound: 1, ..ReconcileReport::default() }
        );
        let annotations = surface.annotations();
        assert_eq!(annotations.len(), 1);
        assert!(Arc::ptr_eq(annotations[0].result(), &refetched));
    }

    #[test]
    fn test_repeated_surface_annotations_converge() {
        let mut surface = HeadlessMap::new();
        let stale = result("a", 1.0);
        surface.add_annotation(Arc::new(Annotation::from_result(Arc::clone(&stale))));
        surface.add_annotation(Arc::new(Annotation::from_result(stale)));
        assert_eq!(surface.annotation_count(), 2);

        let current = result("a", 1.0);
        let report = AnnotationReconciler::new().reconcile(&mut surface, &[Arc::clone(&current)]);

        assert_eq!(report.removed, 2);
        assert_eq!(report.added, 1);
        let annotations = surface.annotations();
        assert_eq!(annotations.len(), 1);
        assert!(Arc::ptr_eq(annotations[0].result(), &current));
    }

    #[test]
    fn test_removes_stale_and_replaces_changed() {
        let mut surface = HeadlessMap::new();
        let reconciler = AnnotationReconciler::new();

        reconciler.reconcile(&mut surface, &[result("a", 1.0), result("b", 2.0)]);
        let report = reconciler.reconcile(&mut surface, &[result("b", 20.5), result("c", 3.0)]);

        assert_eq!(
            report,
            ReconcileReport { added: 2, removed: 2, ..ReconcileReport::default() }
        );
        assert_eq!(ids(&surface), vec!["b", "c"]);
        let b = surface
            .annotations()
            .into_iter()
            .find(|a| a.id().as_str() == "b")
            .unwrap();
        assert_eq!(b.subtitle(), "20.5m");
    }

    #[test]
    fn test_duplicate_ids_collapse() {
        let mut surface = HeadlessMap::new();
        let results = vec![result("a", 1.0), result("a", 9.0)];

        AnnotationReconciler::new().reconcile(&mut surface, &results);
        let annotations = surface.annotations();
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].subtitle(), "1m");
    }

    #[test]
    fn test_empty_results_clear_map() {
        let mut surface = HeadlessMap::new();
        let reconciler = AnnotationReconciler::new();

        reconciler.reconcile(&mut surface, &[result("a", 1.0), result("b", 2.0)]);
        let report = reconciler.reconcile(&mut surface, &[]);
        assert_eq!(report.removed, 2);
        assert_eq!(surface.annotation_count(), 0);
    }
}
