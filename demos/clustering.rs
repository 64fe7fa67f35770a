//! Cluster a handful of geotags and print the ranked table.

use geoclump::{collect_valid, GeoClusters, Strategy};

fn main() {
    // Raw (lat, lon) pairs as they might come out of a chat export; the
    // out-of-range pair is dropped.
    let raw = vec![
        // Berlin, around Alexanderplatz
        (52.5219, 13.4132),
        (52.5225, 13.4110),
        (52.5200, 13.4050),
        // Paris, Eiffel Tower and Trocadéro
        (48.8584, 2.2945),
        (48.8620, 2.2876),
        // Berlin again, Brandenburg Gate (~3 km from Alexanderplatz)
        (52.5163, 13.3777),
        // Invalid
        (123.0, 45.0),
        // Tokyo
        (35.6762, 139.6503),
    ];
    let points = collect_valid(raw);

    for strategy in [Strategy::Auto, Strategy::Fallback] {
        let run = GeoClusters::new(2.0).with_decimals(4).with_strategy(strategy);
        let report = run.run(&points).unwrap();

        println!("=== {} ===", report.title("demo"));
        println!("  {:>2}  {:>5}  {:>10}  {:>10}", "#", "count", "lat", "lon");
        for row in run.table(&report) {
            println!(
                "  {:>2}  {:>5}  {:>10.4}  {:>10.4}",
                row.rank, row.count, row.center_lat, row.center_lon
            );
        }
        println!();
    }
}
