//! Sandbox materializer: copy a slice of the base collection into an owned
//! scratch set, update it in place, then drop it.
//!
//! The sandbox owns its rows outright. Nothing it does is visible through
//! the base collection or any transaction view.

use crate::timing::Timed;
use std::time::Duration;
use trip_core::constants::UPDATE_DELTA;
use trip_core::types::Row;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sandbox {
    rows: Vec<Row>,
}

impl Sandbox {
    /// Copy every base row matching `predicate`, preserving order.
    pub fn materialize<P>(base: &[Row], predicate: P) -> Self
    where
        P: Fn(&Row) -> bool,
    {
        let rows = base.iter().filter(|&r| predicate(r)).copied().collect();
        Self { rows }
    }

    /// Apply `mutate` to every sandbox row. Returns the number of rows touched.
    pub fn update_all<M>(&mut self, mutate: M) -> usize
    where
        M: Fn(&mut Row),
    {
        self.rows.iter_mut().for_each(|r| mutate(r));
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Release the sandbox and its allocation.
    pub fn discard(self) {
        drop(self.rows);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxOutcome {
    pub rows: usize,
    pub materialize: Duration,
    pub updated: usize,
    pub update: Duration,
    /// Materialize, update and discard together.
    pub total: Duration,
}

/// Sandbox cycle over the 2019-07-10 slice: copy, `improvement_surcharge
/// += 0.01`, discard.
pub fn run_sandbox(base: &[Row]) -> SandboxOutcome {
    let total = Timed::measure(|| {
        let materialized = Timed::measure(|| Sandbox::materialize(base, Row::on_bench_day));
        let mut sandbox = materialized.value;
        let rows = sandbox.len();

        let updated =
            Timed::measure(|| sandbox.update_all(|r| r.improvement_surcharge += UPDATE_DELTA));

        sandbox.discard();
        (rows, materialized.elapsed, updated.value, updated.elapsed)
    });
    let (rows, materialize, updated, update) = total.value;

    SandboxOutcome {
        rows,
        materialize,
        updated,
        update,
        total: total.elapsed,
    }
}
