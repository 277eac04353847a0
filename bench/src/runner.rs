//! Phase runner: Q1, Q2, Q3, U1, U2 and the sandbox cycle, strictly in that
//! order against one shared, read-only base collection.

use crate::query::{q1_hourly_volume, q2_top_distances, q3_location_ranking};
use crate::report::BenchResults;
use crate::sandbox::run_sandbox;
use crate::txn::{run_update, UpdateScenario};
use std::time::Duration;
use trip_core::types::Row;

/// Run every phase once. `load` is the time it took to build `base` and is
/// only carried into the results.
pub fn run_phases(base: &[Row], run: u32, load: Duration) -> BenchResults {
    let q1 = q1_hourly_volume(base);
    log::debug!("Q1 done: {} groups in {:.3}ms", q1.value.group_count(), q1.elapsed_ms());

    let q2 = q2_top_distances(base);
    log::debug!("Q2 done: {} distances in {:.3}ms", q2.value.len(), q2.elapsed_ms());

    let q3 = q3_location_ranking(base);
    log::debug!(
        "Q3 done: {} locations in {:.3}ms",
        q3.value.groups_retained(),
        q3.elapsed_ms()
    );

    let u1 = run_update(base, UpdateScenario::NarrowTip);
    let u2 = run_update(base, UpdateScenario::MediumTotal);
    for u in [&u1, &u2] {
        log::debug!(
            "{} done: target {} updated {} in {:?}",
            u.scenario.label(),
            u.target,
            u.updated,
            u.elapsed
        );
    }

    let sandbox = run_sandbox(base);
    log::debug!("Sandbox done: {} rows in {:?}", sandbox.rows, sandbox.total);

    BenchResults {
        run,
        dataset_rows: base.len(),
        load,
        q1: q1.elapsed,
        q1_groups: q1.value.group_count(),
        q2: q2.elapsed,
        q3: q3.elapsed,
        q3_groups: q3.value.groups_retained(),
        u1,
        u2,
        sandbox,
    }
}

/// Run every phase `runs` times over the same base collection.
pub fn run_suite(base: &[Row], runs: u32, load: Duration) -> Vec<BenchResults> {
    (1..=runs).map(|run| run_phases(base, run, load)).collect()
}
