use mapmark::prelude::*;

/// Example of driving mapmark without any rendering backend
fn main() -> mapmark::Result<()> {
    println!("mapmark headless example");

    let results = vec![
        SearchResult::new("louvre", "Louvre", LatLng::new(48.8606, 2.3376), 250.0),
        SearchResult::new("orsay", "Musée d'Orsay", LatLng::new(48.86, 2.3266), 910.5),
    ];

    let location = ObservableLocation::new();
    let mut map = AnnotationMap::new(HeadlessMap::new(), MapConfig::default())?;
    map.attach_location(&location);
    map.on_select(|result| println!("   selected {}", result.title));

    map.set_results(results);
    map.process_pending();
    println!("   annotations: {}", map.surface().annotation_count());
    println!("   viewport: {:?}", map.viewport_state());

    location.publish(Some(LatLng::new(48.8611, 2.3364)));
    map.process_pending();
    println!("   viewport after first fix: {:?}", map.viewport_state());

    location.publish(Some(LatLng::new(48.8650, 2.3400)));
    map.process_pending();
    println!(
        "   regions applied: {}",
        map.surface().region_history().len()
    );

    let tapped = map
        .surface()
        .view_for(&ResultId::from("orsay"))
        .and_then(|view| view.accessory().cloned());
    if let Some(control) = tapped {
        map.accessory_tapped(&control);
    }

    map.teardown();
    Ok(())
}
