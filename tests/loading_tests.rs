use std::path::PathBuf;

use mapmark::prelude::*;

/// Loading results and configuration from disk
#[cfg(test)]
mod loading_tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mapmark-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_results_and_config_from_files() {
        let results = temp_file(
            "results.json",
            r#"[{"id": "r1", "title": "Eiffel Tower", "lat": 48.8584, "lon": 2.2945, "dist": 120.50}]"#,
        );
        let config = temp_file(
            "config.json",
            r#"{"fixed_location": {"lat": 48.8584, "lon": 2.2945}, "pool_capacity": 1}"#,
        );

        let results = SearchResult::list_from_file(&results).unwrap();
        let config = MapConfig::from_file(&config).unwrap();
        let mut map = AnnotationMap::new(HeadlessMap::from_config(&config), config)
            .unwrap();
        map.set_results(results);
        let report = map.process_pending().unwrap();

        assert_eq!(report.viewport, ViewportState::FixedLocation);
        assert_eq!(map.surface().annotations()[0].subtitle(), "120.5m");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let missing = std::env::temp_dir().join("mapmark-does-not-exist.json");
        assert!(matches!(
            MapConfig::from_file(&missing),
            Err(MapError::Io(_))
        ));
    }
}
