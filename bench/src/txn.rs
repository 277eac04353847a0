//! Copy-on-write transaction view over the base collection.
//!
//! Writes never touch the base slice. Each modified position gets a full
//! replacement row in a sparse overlay keyed by position; reads consult the
//! overlay first. There is no commit: a transaction ends in [`TxView::rollback`],
//! which drops the whole overlay.

use crate::timing::Timed;
use std::collections::HashMap;
use std::time::Duration;
use trip_core::constants::{SHORT_TRIP_MAX, SHORT_TRIP_MIN, TIP_CEILING, UPDATE_DELTA};
use trip_core::types::Row;

const OVERLAY_CAPACITY: usize = 1024;

pub struct TxView<'a> {
    base: &'a [Row],
    overlay: HashMap<usize, Row>,
}

impl<'a> TxView<'a> {
    pub fn new(base: &'a [Row]) -> Self {
        Self {
            base,
            overlay: HashMap::with_capacity(OVERLAY_CAPACITY),
        }
    }

    /// Visible value at `pos`: the staged row if any, else the base row.
    ///
    /// Panics if `pos` is out of range of the base collection.
    pub fn read(&self, pos: usize) -> &Row {
        self.overlay.get(&pos).unwrap_or(&self.base[pos])
    }

    /// Stage `mutate` on every position whose visible row satisfies
    /// `predicate`, scanning positions in order. Returns the number of
    /// positions touched.
    pub fn update<P, M>(&mut self, predicate: P, mutate: M) -> usize
    where
        P: Fn(&Row) -> bool,
        M: Fn(&mut Row),
    {
        let mut touched = 0;
        for pos in 0..self.base.len() {
            let current = self.read(pos);
            if predicate(current) {
                let mut copy = *current;
                mutate(&mut copy);
                self.overlay.insert(pos, copy);
                touched += 1;
            }
        }
        touched
    }

    /// Discard every staged write.
    pub fn rollback(&mut self) {
        self.overlay.clear();
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Number of positions with a staged replacement.
    pub fn overlay_len(&self) -> usize {
        self.overlay.len()
    }
}

/// The two simulated transactional updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScenario {
    /// U1: trips on 2019-07-10 with 2+ passengers and tip under 20 get
    /// `tip_amount += 0.01`.
    NarrowTip,
    /// U2: trips of 1.0 to 3.0 miles get `total_amount += 0.01`.
    MediumTotal,
}

impl UpdateScenario {
    pub const ALL: [UpdateScenario; 2] = [UpdateScenario::NarrowTip, UpdateScenario::MediumTotal];

    pub fn label(self) -> &'static str {
        match self {
            UpdateScenario::NarrowTip => "u1",
            UpdateScenario::MediumTotal => "u2",
        }
    }

    pub fn matches(self, row: &Row) -> bool {
        match self {
            UpdateScenario::NarrowTip => {
                row.on_bench_day() && row.passenger_count >= 2 && row.tip_amount < TIP_CEILING
            }
            UpdateScenario::MediumTotal => row.distance_between(SHORT_TRIP_MIN, SHORT_TRIP_MAX),
        }
    }

    pub fn apply(self, row: &mut Row) {
        match self {
            UpdateScenario::NarrowTip => row.tip_amount += UPDATE_DELTA,
            UpdateScenario::MediumTotal => row.total_amount += UPDATE_DELTA,
        }
    }

    /// Rows of `base` the update is expected to touch, counted directly.
    pub fn target_count(self, base: &[Row]) -> usize {
        base.iter().filter(|r| self.matches(r)).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub scenario: UpdateScenario,
    pub target: usize,
    pub updated: usize,
    pub elapsed: Duration,
}

impl UpdateOutcome {
    /// Target and updated counts agree. A mismatch points at the parser,
    /// the storage or the overlay isolation.
    pub fn is_consistent(&self) -> bool {
        self.target == self.updated
    }
}

/// Count the target, apply the update through a fresh [`TxView`], roll back.
/// The whole sequence is timed.
pub fn run_update(base: &[Row], scenario: UpdateScenario) -> UpdateOutcome {
    let timed = Timed::measure(|| {
        let mut tx = TxView::new(base);
        let target = scenario.target_count(base);
        let updated = tx.update(|r| scenario.matches(r), |r| scenario.apply(r));
        tx.rollback();
        (target, updated)
    });
    let (target, updated) = timed.value;

    UpdateOutcome {
        scenario,
        target,
        updated,
        elapsed: timed.elapsed,
    }
}
