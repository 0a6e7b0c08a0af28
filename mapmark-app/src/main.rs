use std::time::Duration;

use anyhow::Context;
use mapmark::prelude::*;

const SAMPLE_RESULTS: &str = r#"[
    {"id": "eiffel", "title": "Eiffel Tower", "lat": 48.8584, "lon": 2.2945, "dist": 120},
    {"id": "invalides", "title": "Les Invalides", "lat": 48.8556, "lon": 2.3125, "dist": 1450.5},
    {"id": "trocadero", "title": "Trocadéro", "lat": 48.8616, "lon": 2.2893, "dist": 430.25}
]"#;

/// Drives an annotation map against an in-memory surface.
///
/// Usage: `mapmark-app [results.json] [config.json]`
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let results = match args.next() {
        Some(path) => SearchResult::list_from_file(&path)
            .with_context(|| format!("loading results from {}", path))?,
        None => SearchResult::list_from_json(SAMPLE_RESULTS)?,
    };
    let config = match args.next() {
        Some(path) => {
            MapConfig::from_file(&path).with_context(|| format!("loading config from {}", path))?
        }
        None => MapConfig::default(),
    };

    let surface = HeadlessMap::from_config(&config);
    let mut map = AnnotationMap::new(surface, config)?;
    map.on_select(|result| {
        println!(
            "selected {} ({}) at {:.4}, {:.4}",
            result.title, result.id, result.coordinate.lat, result.coordinate.lng
        );
    });

    let (sender, feed) = ChannelLocationFeed::new();
    map.attach_location(&feed);
    map.set_results(results);

    // Location fixes arrive from another task, as a platform location service would deliver them.
    let fixes = tokio::spawn(async move {
        let track = [
            None,
            Some(LatLng::new(48.8570, 2.2950)),
            Some(LatLng::new(48.8575, 2.2960)),
        ];
        for fix in track {
            tokio::time::sleep(Duration::from_millis(50)).await;
            if !sender.send(fix) {
                break;
            }
        }
    });

    let mut ticker = tokio::time::interval(Duration::from_millis(20));
    for _ in 0..10 {
        ticker.tick().await;
        feed.pump();
        if let Some(report) = map.process_pending() {
            println!(
                "cycle {}: {:?} +{} -{} ={} ~{} viewport={:?} views={}",
                map.cycles(),
                report.reasons,
                report.reconcile.added,
                report.reconcile.removed,
                report.reconcile.retained,
                report.reconcile.rebound,
                report.viewport,
                report.views_configured
            );
        }
    }
    fixes.await?;

    for annotation in map.surface().annotations() {
        println!("  {} [{}]", annotation.title(), annotation.subtitle());
    }
    if let Some((region, animated)) = map.surface().region_history().last() {
        println!(
            "viewport: ({:.4}, {:.4}) span {} animated={}",
            region.center.lat, region.center.lng, region.span.lat_delta, animated
        );
    }

    let first = map.surface().annotations().first().map(|a| a.id().clone());
    let control = first.and_then(|id| map.surface().view_for(&id).and_then(|v| v.accessory().cloned()));
    match control {
        Some(control) => {
            map.accessory_tapped(&control);
        }
        None => log::warn!("no marker view to tap"),
    }

    let stats = map.pool_stats();
    println!("marker views: {} created, {} reused", stats.created, stats.reused);
    map.teardown();
    Ok(())
}
