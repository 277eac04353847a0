//! Record parser: one CSV line in, one [`Row`] (or nothing) out.

use crate::constants::*;
use crate::string_operations::{is_blank_line, leading_float, leading_int, split_delimited};
use crate::types::Row;

/// Parse one data line into a [`Row`].
pub fn parse_row(line: &str) -> Option<Row> {
    parse_row_bytes(line.as_bytes())
}

/// Parse one raw data line into a [`Row`].
///
/// Returns `None` for blank lines and for lines whose pickup timestamp is
/// shorter than `YYYY-MM-DD HH`, measured in raw bytes. Short lines are
/// padded with empty fields and every numeric field that fails to parse
/// (including fields that are not valid UTF-8) becomes zero, so any other
/// line yields a fully populated row.
pub fn parse_row_bytes(line: &[u8]) -> Option<Row> {
    if is_blank_line(line) {
        return None;
    }
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\r' | b'\n') {
        end -= 1;
    }

    let mut cols = split_delimited(&line[..end], FIELD_DELIMITER, QUOTE);
    if cols.len() < SCHEMA_WIDTH {
        cols.resize(SCHEMA_WIDTH, Vec::new());
    }

    let ts = cols[COL_PICKUP].as_slice();
    if ts.len() < MIN_TIMESTAMP_LEN {
        return None;
    }

    Some(Row {
        year: int_field(&ts[TS_YEAR]),
        month: int_field(&ts[TS_MONTH]),
        day: int_field(&ts[TS_DAY]),
        hour: int_field(&ts[TS_HOUR]),
        passenger_count: int_field(&cols[COL_PASSENGER]),
        trip_distance: float_field(&cols[COL_TRIP_DISTANCE]),
        pickup_location_id: int_field(&cols[COL_PICKUP_LOCATION]),
        total_amount: float_field(&cols[COL_TOTAL]),
        tip_amount: float_field(&cols[COL_TIP]),
        improvement_surcharge: float_field(&cols[COL_IMPROVEMENT]),
    })
}

fn int_field(raw: &[u8]) -> i32 {
    std::str::from_utf8(raw).map(leading_int).unwrap_or(0)
}

fn float_field(raw: &[u8]) -> f64 {
    std::str::from_utf8(raw).map(leading_float).unwrap_or(0.0)
}
