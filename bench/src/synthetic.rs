//! Synthetic trip data for benches and runs without a CSV at hand.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trip_core::types::Row;

/// Seed used by the binary and the criterion benches.
pub const DEFAULT_SEED: u64 = 0x7A41_2019_0710_CAB5;

/// Generate `rows` trip records.
///
/// Uses a fixed seed for deterministic, reproducible benchmarks. Most
/// pickups fall in July 2019 with an extra slice on 2019-07-10 so every
/// query and update has something to match; the rest are June 2019.
pub fn generate_synthetic(rows: usize, seed: u64) -> Vec<Row> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(rows);

    for _ in 0..rows {
        let (month, day) = if rng.gen_bool(0.8) {
            let day = if rng.gen_bool(0.1) {
                10
            } else {
                rng.gen_range(1..=31)
            };
            (7, day)
        } else {
            (6, rng.gen_range(1..=30))
        };

        // Mostly short trips with a long tail.
        let trip_distance: f64 = if rng.gen_bool(0.9) {
            rng.gen_range(0.0..6.0)
        } else {
            rng.gen_range(6.0..30.0)
        };
        let fare = 2.5 + trip_distance * 2.5;
        let tip_amount = if rng.gen_bool(0.6) {
            (fare * rng.gen_range(0.1f64..0.3) * 100.0).round() / 100.0
        } else {
            0.0
        };
        let improvement_surcharge = 0.3;

        out.push(Row {
            year: 2019,
            month,
            day,
            hour: rng.gen_range(0..24),
            passenger_count: rng.gen_range(0..=6),
            trip_distance: (trip_distance * 100.0).round() / 100.0,
            pickup_location_id: rng.gen_range(1..=265),
            total_amount: ((fare + tip_amount + improvement_surcharge) * 100.0).round() / 100.0,
            tip_amount,
            improvement_surcharge,
        });
    }

    out
}
