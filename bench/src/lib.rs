//! Taxi Trip In-Memory Latency Benchmark
//!
//! Loads the yellow-taxi trip CSV into a flat `Vec<Row>` and measures a small
//! database-like workload against it:
//! - **Queries**: hourly volume, top-100 trip distances, short-trip pickup
//!   location ranking
//! - **Updates**: predicate-scoped updates through a copy-on-write overlay,
//!   always rolled back
//! - **Sandbox**: copy a slice of rows, update it, drop it
//!
//! Run benchmarks: `cargo bench`
//! Run the harness: `cargo run --release -- --csv <path>`

pub mod config;
pub mod loader;
pub mod query;
pub mod report;
pub mod runner;
pub mod sandbox;
pub mod synthetic;
pub mod timing;
pub mod txn;

pub use trip_core::types::Row;
