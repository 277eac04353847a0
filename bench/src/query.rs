//! Read-only analytic queries over the base collection.
//!
//! | Query | Filter                                 | Shape                     |
//! |-------|----------------------------------------|---------------------------|
//! | Q1    | July 2019, passenger_count >= 2        | group by pickup hour      |
//! | Q2    | none                                   | top-100 trip distances    |
//! | Q3    | 1.0 <= trip_distance <= 3.0            | top-20 pickup locations   |
//!
//! None of them mutate their input. The `q*` wrappers time the query.

use crate::timing::Timed;
use std::cmp::Ordering;
use std::collections::HashMap;
use trip_core::constants::{
    MIN_GROUP_PASSENGERS, SHORT_TRIP_MAX, SHORT_TRIP_MIN, TOP_DISTANCES, TOP_LOCATIONS,
};
use trip_core::types::Row;

/// Q1 result: trip count per pickup hour key (`YYYYMMDDHH`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HourlyVolume {
    pub counts: HashMap<i64, u64>,
}

impl HourlyVolume {
    pub fn group_count(&self) -> usize {
        self.counts.len()
    }
}

/// Q3 result: `(pickup_location_id, trips)` ordered by trips descending,
/// ties broken by ascending location id.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocationRanking {
    pub entries: Vec<(i32, u64)>,
}

impl LocationRanking {
    pub fn groups_retained(&self) -> usize {
        self.entries.len()
    }
}

pub fn is_hourly_volume_candidate(row: &Row) -> bool {
    row.passenger_count >= MIN_GROUP_PASSENGERS && row.in_bench_month()
}

pub fn is_short_trip(row: &Row) -> bool {
    row.distance_between(SHORT_TRIP_MIN, SHORT_TRIP_MAX)
}

/// Q1: hourly trip volume for multi-passenger July 2019 trips.
pub fn hourly_volume(rows: &[Row]) -> HourlyVolume {
    let mut counts: HashMap<i64, u64> = HashMap::with_capacity(10_000);
    for row in rows.iter().filter(|r| is_hourly_volume_candidate(r)) {
        *counts.entry(row.pickup_hour_key()).or_insert(0) += 1;
    }
    HourlyVolume { counts }
}

fn descending(a: &f64, b: &f64) -> Ordering {
    b.total_cmp(a)
}

/// Q2: the `k` largest trip distances, largest first.
///
/// Isolates the top `k` with a selection pass and only sorts that slice.
/// With `k` or fewer rows the whole column is sorted.
pub fn top_distances(rows: &[Row], k: usize) -> Vec<f64> {
    let mut dist: Vec<f64> = rows.iter().map(|r| r.trip_distance).collect();
    if k == 0 {
        return Vec::new();
    }
    if dist.len() > k {
        dist.select_nth_unstable_by(k - 1, descending);
        dist.truncate(k);
    }
    dist.sort_unstable_by(descending);
    dist
}

/// Q3: pickup locations ranked by number of short trips, top `limit`.
pub fn location_ranking(rows: &[Row], limit: usize) -> LocationRanking {
    let mut counts: HashMap<i32, u64> = HashMap::with_capacity(2_000);
    for row in rows.iter().filter(|r| is_short_trip(r)) {
        *counts.entry(row.pickup_location_id).or_insert(0) += 1;
    }

    let mut entries: Vec<(i32, u64)> = counts.into_iter().collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    entries.truncate(limit);
    LocationRanking { entries }
}

pub fn q1_hourly_volume(rows: &[Row]) -> Timed<HourlyVolume> {
    Timed::measure(|| hourly_volume(rows))
}

pub fn q2_top_distances(rows: &[Row]) -> Timed<Vec<f64>> {
    Timed::measure(|| top_distances(rows, TOP_DISTANCES))
}

pub fn q3_location_ranking(rows: &[Row]) -> Timed<LocationRanking> {
    Timed::measure(|| location_ranking(rows, TOP_LOCATIONS))
}
