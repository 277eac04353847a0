//! Fixed layout of the yellow-taxi trip CSV (2019 schema) and the literal
//! values the benchmark queries filter on.

/// Number of fields a data line is padded to before columns are read.
pub const SCHEMA_WIDTH: usize = 19;

pub const FIELD_DELIMITER: u8 = b',';
pub const QUOTE: u8 = b'"';

// Column indices
pub const COL_PICKUP: usize = 1;
pub const COL_PASSENGER: usize = 3;
pub const COL_TRIP_DISTANCE: usize = 4;
pub const COL_PICKUP_LOCATION: usize = 7;
pub const COL_TIP: usize = 13;
pub const COL_IMPROVEMENT: usize = 15;
pub const COL_TOTAL: usize = 16;

/// Shortest pickup timestamp, in raw bytes, that still carries `YYYY-MM-DD HH`.
pub const MIN_TIMESTAMP_LEN: usize = 13;

/// Byte ranges of the timestamp parts inside `YYYY-MM-DD HH:MM:SS`.
pub const TS_YEAR: std::ops::Range<usize> = 0..4;
pub const TS_MONTH: std::ops::Range<usize> = 5..7;
pub const TS_DAY: std::ops::Range<usize> = 8..10;
pub const TS_HOUR: std::ops::Range<usize> = 11..13;

// Query literals
pub const BENCH_YEAR: i32 = 2019;
pub const BENCH_MONTH: i32 = 7;
pub const BENCH_DAY: i32 = 10;
pub const MIN_GROUP_PASSENGERS: i32 = 2;
pub const SHORT_TRIP_MIN: f64 = 1.0;
pub const SHORT_TRIP_MAX: f64 = 3.0;
pub const TIP_CEILING: f64 = 20.0;
pub const TOP_DISTANCES: usize = 100;
pub const TOP_LOCATIONS: usize = 20;

/// Amount added by every simulated update.
pub const UPDATE_DELTA: f64 = 0.01;
