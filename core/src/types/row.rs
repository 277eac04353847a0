use crate::constants::{BENCH_DAY, BENCH_MONTH, BENCH_YEAR};

/// One trip record.
///
/// Every field is always populated; fields whose text failed to parse hold
/// zero. A row has no identity beyond its position in the loaded collection.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Row {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub hour: i32,
    pub passenger_count: i32,
    pub trip_distance: f64,
    pub pickup_location_id: i32,
    pub total_amount: f64,
    pub tip_amount: f64,
    pub improvement_surcharge: f64,
}

impl Row {
    /// Pickup hour packed as `YYYYMMDDHH`, used as a grouping key.
    pub fn pickup_hour_key(&self) -> i64 {
        self.year as i64 * 1_000_000
            + self.month as i64 * 10_000
            + self.day as i64 * 100
            + self.hour as i64
    }

    pub fn picked_up_in(&self, year: i32, month: i32) -> bool {
        self.year == year && self.month == month
    }

    pub fn picked_up_on(&self, year: i32, month: i32, day: i32) -> bool {
        self.picked_up_in(year, month) && self.day == day
    }

    /// Pickup in July 2019.
    pub fn in_bench_month(&self) -> bool {
        self.picked_up_in(BENCH_YEAR, BENCH_MONTH)
    }

    /// Pickup on 2019-07-10.
    pub fn on_bench_day(&self) -> bool {
        self.picked_up_on(BENCH_YEAR, BENCH_MONTH, BENCH_DAY)
    }

    /// Trip distance inside `[min, max]`, both ends inclusive.
    pub fn distance_between(&self, min: f64, max: f64) -> bool {
        self.trip_distance >= min && self.trip_distance <= max
    }
}
