//! Integration tests: load CSV files from disk, run every phase and check the
//! counts and the metrics file.

use std::io::Write;
use std::time::Duration;
use tempfile::{tempdir, NamedTempFile};
use tripbench::loader::{load_csv, try_load_csv};
use tripbench::query::{hourly_volume, is_hourly_volume_candidate, is_short_trip, location_ranking, top_distances};
use tripbench::report::{append_metrics, METRICS_FILE, METRICS_HEADER};
use tripbench::runner::{run_phases, run_suite};
use tripbench::sandbox::Sandbox;
use tripbench::synthetic::{generate_synthetic, DEFAULT_SEED};
use tripbench::txn::{run_update, TxView, UpdateScenario};
use tripbench::Row;

const HEADER: &str = "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,RatecodeID,store_and_fwd_flag,PULocationID,DOLocationID,payment_type,fare_amount,extra,mta_tax,tip_amount,tolls_amount,improvement_surcharge,total_amount,congestion_surcharge";

fn csv_line(pickup: &str, passengers: i32, distance: f64, location: i32, tip: f64, total: f64) -> String {
    format!("1,{pickup},{pickup},{passengers},{distance},1,N,{location},100,1,0,0,0.5,{tip},0,0.3,{total},2.5")
}

fn write_csv(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    writeln!(file, "{HEADER}").unwrap();
    for l in lines {
        writeln!(file, "{l}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// The three-row dataset: two July 10 trips and one June trip.
fn example_file() -> NamedTempFile {
    write_csv(&[
        csv_line("2019-07-10 08:00:00", 2, 2.0, 5, 1.0, 10.0),
        csv_line("2019-07-10 09:00:00", 1, 4.0, 5, 0.0, 5.0),
        csv_line("2019-06-01 08:00:00", 3, 2.0, 5, 0.0, 8.0),
    ])
}

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn loads_example_rows() {
    let file = example_file();
    let rows = try_load_csv(file.path(), 0).unwrap();
    assert_eq!(rows.len(), 3);

    let first = rows[0];
    assert_eq!((first.year, first.month, first.day, first.hour), (2019, 7, 10, 8));
    assert_eq!(first.passenger_count, 2);
    assert_eq!(first.trip_distance, 2.0);
    assert_eq!(first.pickup_location_id, 5);
    assert_eq!(first.tip_amount, 1.0);
    assert_eq!(first.improvement_surcharge, 0.3);
    assert_eq!(first.total_amount, 10.0);
}

#[test]
fn limit_rows_keeps_file_order() {
    let lines: Vec<String> = (0..10)
        .map(|h| csv_line(&format!("2019-07-10 {h:02}:00:00"), 1, 1.0, h, 0.0, 1.0))
        .collect();
    let file = write_csv(&lines);

    let rows = load_csv(file.path(), 4);
    let hours: Vec<i32> = rows.iter().map(|r| r.hour).collect();
    assert_eq!(hours, vec![0, 1, 2, 3]);

    assert_eq!(load_csv(file.path(), 0).len(), 10);
    assert_eq!(load_csv(file.path(), 50).len(), 10);
}

#[test]
fn malformed_lines_are_skipped_or_zeroed() {
    let file = write_csv(&[
        csv_line("2019-07-10 08:00:00", 2, 2.0, 5, 1.0, 10.0),
        "   ".to_string(),
        "1,2019-07,x".to_string(),
        "1,2019-07-10 10:00:00,x,,abc".to_string(),
    ]);
    let rows = load_csv(file.path(), 0);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].hour, 10);
    assert_eq!(rows[1].passenger_count, 0);
    assert_eq!(rows[1].trip_distance, 0.0);
    assert_eq!(rows[1].total_amount, 0.0);
}

#[test]
fn unopenable_file_is_an_empty_dataset() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.csv");
    assert!(try_load_csv(&missing, 0).is_err());

    let rows = load_csv(&missing, 0);
    assert!(rows.is_empty());

    let r = run_phases(&rows, 1, Duration::ZERO);
    assert_eq!(r.dataset_rows, 0);
    assert_eq!((r.q1_groups, r.q3_groups), (0, 0));
    assert_eq!((r.u1.target, r.u1.updated), (0, 0));
    assert_eq!(r.sandbox.rows, 0);
}

// ── End to end ──────────────────────────────────────────────────────

#[test]
fn example_dataset_end_to_end() {
    let file = example_file();
    let rows = load_csv(file.path(), 0);
    let r = run_phases(&rows, 1, Duration::ZERO);

    assert_eq!(r.dataset_rows, 3);
    // Only the first row is July 2019 with 2+ passengers.
    assert_eq!(r.q1_groups, 1);
    // Rows 1 and 3 are short trips, both from location 5.
    assert_eq!(r.q3_groups, 1);
    assert_eq!(location_ranking(&rows, 20).entries, vec![(5, 2)]);

    assert_eq!((r.u1.target, r.u1.updated), (1, 1));
    assert_eq!((r.u2.target, r.u2.updated), (2, 2));
    assert_eq!((r.sandbox.rows, r.sandbox.updated), (2, 2));
    assert!(r.divergent_updates().is_empty());
}

// ── Properties over synthetic data ──────────────────────────────────

#[test]
fn query_filters_hold_for_every_counted_row() {
    let rows = generate_synthetic(20_000, DEFAULT_SEED);

    let q1 = hourly_volume(&rows);
    let counted: u64 = q1.counts.values().sum();
    let expected = rows.iter().filter(|r| is_hourly_volume_candidate(r)).count() as u64;
    assert_eq!(counted, expected);
    for r in rows.iter().filter(|r| is_hourly_volume_candidate(r)) {
        assert!(r.year == 2019 && r.month == 7 && r.passenger_count >= 2);
        assert!(q1.counts.contains_key(&r.pickup_hour_key()));
    }

    let q3 = location_ranking(&rows, usize::MAX);
    let counted: u64 = q3.entries.iter().map(|(_, n)| n).sum();
    let expected = rows.iter().filter(|r| is_short_trip(r)).count() as u64;
    assert_eq!(counted, expected);
    assert!(q3.entries.windows(2).all(|w| w[0].1 >= w[1].1));
    assert!(location_ranking(&rows, 20).groups_retained() <= 20);
}

#[test]
fn top_distances_are_non_increasing() {
    let rows = generate_synthetic(5_000, DEFAULT_SEED);
    let top = top_distances(&rows, 100);
    assert_eq!(top.len(), 100);
    assert!(top.windows(2).all(|w| w[0] >= w[1]));

    let max = rows.iter().map(|r| r.trip_distance).fold(f64::MIN, f64::max);
    assert_eq!(top[0], max);

    let few = &rows[..42];
    assert_eq!(top_distances(few, 100).len(), 42);
}

#[test]
fn updates_match_targets_and_leave_base_untouched() {
    let rows = generate_synthetic(20_000, DEFAULT_SEED);
    let snapshot = rows.clone();

    for scenario in UpdateScenario::ALL {
        let out = run_update(&rows, scenario);
        assert!(out.target > 0, "{} matched nothing", scenario.label());
        assert_eq!(out.target, out.updated, "{}", scenario.label());
    }
    assert_eq!(rows, snapshot);
}

#[test]
fn rollback_after_stacked_updates_restores_base() {
    let rows = generate_synthetic(5_000, DEFAULT_SEED);
    let mut tx = TxView::new(&rows);

    let u1 = tx.update(|r| UpdateScenario::NarrowTip.matches(r), |r| UpdateScenario::NarrowTip.apply(r));
    let u2 = tx.update(|r| UpdateScenario::MediumTotal.matches(r), |r| UpdateScenario::MediumTotal.apply(r));
    assert!(tx.overlay_len() <= u1 + u2);
    assert!(tx.overlay_len() >= u1.max(u2));

    tx.rollback();
    assert_eq!(tx.overlay_len(), 0);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(tx.read(i), row);
    }
}

#[test]
fn sandbox_never_leaks_into_views() {
    let rows = generate_synthetic(5_000, DEFAULT_SEED);
    let tx = TxView::new(&rows);

    let mut sandbox = Sandbox::materialize(&rows, Row::on_bench_day);
    let expected = rows.iter().filter(|r| r.on_bench_day()).count();
    assert_eq!(sandbox.len(), expected);
    assert_eq!(sandbox.update_all(|r| r.improvement_surcharge += 100.0), expected);

    assert!(rows.iter().all(|r| r.improvement_surcharge < 100.0));
    for i in 0..tx.len() {
        assert!(tx.read(i).improvement_surcharge < 100.0);
    }
    sandbox.discard();
}

// ── Metrics ─────────────────────────────────────────────────────────

#[test]
fn metrics_header_written_once() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested").join("results");
    let rows = generate_synthetic(1_000, DEFAULT_SEED);

    let results = run_suite(&rows, 2, Duration::from_millis(5));
    assert_eq!(results.iter().map(|r| r.run).collect::<Vec<_>>(), vec![1, 2]);

    let path = append_metrics(&out, &results).unwrap();
    assert_eq!(path, out.join(METRICS_FILE));
    append_metrics(&out, &results[..1]).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], METRICS_HEADER);
    assert_eq!(lines.iter().filter(|l| **l == METRICS_HEADER).count(), 1);
    for line in &lines[1..] {
        assert!(line.starts_with("tripbench,default,na,"));
        assert_eq!(line.split(',').nth(6), Some("1000"));
    }
}
