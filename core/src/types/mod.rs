//! Data types shared across the harness.

mod row;

pub use row::Row;
