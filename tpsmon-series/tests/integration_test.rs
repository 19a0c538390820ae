//! End-to-end pipeline tests: catalog lookup, aggregation, and storage

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use tpsmon_common::Period;
use tpsmon_series::{aggregate, PeriodCatalog, SeriesStore};

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn collect_path_aggregates_and_persists() {
    let catalog = PeriodCatalog::new(vec![Period {
        phase: "Regular Season".to_string(),
        season: "2024".to_string(),
        start_date: date("2024-09-05"),
        end_date: date("2025-02-10"),
    }]);

    let target = date("2024-09-10");
    let period = catalog.find_period(target).expect("date is in season");

    let events = vec![
        ts("2024-09-10 10:00:00"),
        ts("2024-09-10 10:00:05"),
        ts("2024-09-10 10:00:05"),
        ts("2024-09-10 10:00:59"),
        ts("2024-09-10 14:30:12"),
    ];
    let series = aggregate(events, ts("2024-09-10 00:00:00"), ts("2024-09-10 23:59:59"));
    assert_eq!(series.len(), 2);

    let temp_dir = TempDir::new().unwrap();
    let store = SeriesStore::new(temp_dir.path());
    store.save(&series, &period.season, target).unwrap();

    let loaded = store
        .load(&period.season, target)
        .unwrap()
        .expect("series was saved");
    assert_eq!(loaded, series);

    // Field-for-field check of the busiest minute
    let first = &loaded.buckets[0];
    assert_eq!(first.minute, ts("2024-09-10 10:00:00"));
    assert_eq!(first.count, 4);
    assert_eq!(first.mean_tps, 0.1);
    assert_eq!(first.peak_tps, 2);
}

#[test]
fn reporting_path_distinguishes_missing_from_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = SeriesStore::new(temp_dir.path());
    let target = date("2024-09-10");

    // Nothing collected yet
    assert!(store.load("2024", target).unwrap().is_none());

    // A zero-activity day still leaves a record file behind
    let empty = aggregate(
        Vec::new(),
        ts("2024-09-10 00:00:00"),
        ts("2024-09-10 23:59:59"),
    );
    store.save(&empty, "2024", target).unwrap();

    let loaded = store.load("2024", target).unwrap();
    assert_eq!(loaded.map(|s| s.len()), Some(0));
}

#[test]
fn round_trip_preserves_one_decimal_means() {
    let temp_dir = TempDir::new().unwrap();
    let store = SeriesStore::new(temp_dir.path());
    let target = date("2024-09-10");

    // Counts chosen to exercise rounding: 4 -> 0.1, 9 -> 0.2, 93 -> 1.6
    let events: Vec<NaiveDateTime> = (0..4)
        .map(|i| ts(&format!("2024-09-10 08:00:{:02}", i)))
        .chain((0..9).map(|i| ts(&format!("2024-09-10 08:01:{:02}", i))))
        .chain((0..93).map(|i| ts(&format!("2024-09-10 08:02:{:02}", i % 60))))
        .collect();

    let series = aggregate(events, ts("2024-09-10 00:00:00"), ts("2024-09-10 23:59:59"));
    let means: Vec<f64> = series.iter().map(|b| b.mean_tps).collect();
    assert_eq!(means, vec![0.1, 0.2, 1.6]);

    store.save(&series, "2024", target).unwrap();
    let loaded = store.load("2024", target).unwrap().unwrap();
    assert_eq!(loaded, series);
}
