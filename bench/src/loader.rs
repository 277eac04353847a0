//! Dataset loading: reads a trip CSV into the base collection.
//!
//! The first line is always treated as a header and discarded. Every other
//! line goes through [`trip_core::record::parse_row_bytes`]; rejected lines are
//! skipped without being reported as errors.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use trip_core::record::parse_row_bytes;
use trip_core::types::Row;

const INITIAL_CAPACITY: usize = 1 << 20;

/// Outcome of reading one source, kept for diagnostics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Data lines read after the header.
    pub lines_read: usize,
    /// Lines the parser rejected (blank or short timestamp).
    pub lines_skipped: usize,
    /// True when reading stopped because the row cap was reached.
    pub capped: bool,
}

/// Read rows from any buffered source.
///
/// `limit_rows == 0` reads the whole input; otherwise reading stops as soon
/// as that many rows were produced. Lines are parsed as raw bytes, so invalid
/// UTF-8 only ever zeroes a field or fails the timestamp length check. A
/// read error ends the load at that point and keeps what was read so far.
pub fn read_rows<R: BufRead>(mut reader: R, limit_rows: usize) -> (Vec<Row>, LoadStats) {
    let capacity = if limit_rows > 0 {
        limit_rows.min(INITIAL_CAPACITY)
    } else {
        INITIAL_CAPACITY
    };
    let mut rows = Vec::with_capacity(capacity);
    let mut stats = LoadStats::default();
    let mut buf = Vec::with_capacity(256);

    // Header
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => return (rows, stats),
        Ok(_) => {}
        Err(e) => {
            log::warn!("Failed to read header line: {e}");
            return (rows, stats);
        }
    }

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::warn!("Read error after {} lines, stopping load: {e}", stats.lines_read);
                break;
            }
        }
        stats.lines_read += 1;

        match parse_row_bytes(&buf) {
            Some(row) => {
                rows.push(row);
                if limit_rows > 0 && rows.len() >= limit_rows {
                    stats.capped = true;
                    break;
                }
            }
            None => stats.lines_skipped += 1,
        }
    }

    (rows, stats)
}

/// Load the CSV at `path`, failing only when the file cannot be opened.
pub fn try_load_csv(path: &Path, limit_rows: usize) -> Result<Vec<Row>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let (rows, stats) = read_rows(BufReader::new(file), limit_rows);

    log::debug!(
        "Read {} data lines from {} ({} skipped, capped: {})",
        stats.lines_read,
        path.display(),
        stats.lines_skipped,
        stats.capped
    );
    Ok(rows)
}

/// Load the CSV at `path`, degrading to an empty collection.
///
/// An unopenable source is logged and treated as a dataset with zero rows.
pub fn load_csv(path: &Path, limit_rows: usize) -> Vec<Row> {
    match try_load_csv(path, limit_rows) {
        Ok(rows) => rows,
        Err(e) => {
            log::error!("{e:#}");
            Vec::new()
        }
    }
}
