//! Standalone benchmark runner that prints the formatted report and appends
//! the results to the metrics CSV.
//!
//! Usage:
//!   cargo run --release -- --csv yellow_tripdata_2019-07.csv
//!   TRIPBENCH_CSV=/path/to/trips.csv cargo run --release -- --runs 5
//!   cargo run --release -- --synthetic 1000000

use std::process;
use std::time::Duration;
use trip_core::types::Row;
use tripbench::config::{parse_args, usage, BenchConfig, Command, DataSource, CSV_ENV_VAR};
use tripbench::loader::load_csv;
use tripbench::report::{append_metrics, print_report};
use tripbench::runner::run_suite;
use tripbench::synthetic::{generate_synthetic, DEFAULT_SEED};
use tripbench::timing::Timed;

fn load_dataset(config: &BenchConfig) -> (Vec<Row>, Duration) {
    let loaded = Timed::measure(|| match &config.source {
        DataSource::Csv(path) => load_csv(path, config.limit_rows),
        DataSource::Synthetic(rows) => {
            let rows = if config.limit_rows > 0 {
                (*rows).min(config.limit_rows)
            } else {
                *rows
            };
            generate_synthetic(rows, DEFAULT_SEED)
        }
    });

    log::info!(
        "Loaded rows: {} in {:.2}ms",
        loaded.value.len(),
        loaded.elapsed_ms()
    );
    (loaded.value, loaded.elapsed)
}

fn main() {
    let command = parse_args(std::env::args_os().skip(1), std::env::var_os(CSV_ENV_VAR))
        .unwrap_or_else(|e| {
            eprintln!("{e:#}\n\n{}", usage());
            process::exit(2);
        });
    let config = match command {
        Command::Help => {
            println!("{}", usage());
            return;
        }
        Command::Run(config) => config,
    };

    if let Err(e) = trip_core::initialize_logger(config.log_level, config.log_file.as_deref()) {
        eprintln!("Failed to initialize logger: {e:#}. Exiting.");
        process::exit(1);
    }

    match &config.source {
        DataSource::Csv(path) => log::info!("Dataset: {}", path.display()),
        DataSource::Synthetic(rows) => log::info!("Dataset: {rows} synthetic rows"),
    }
    let (rows, load) = load_dataset(&config);
    if rows.is_empty() {
        log::warn!("Dataset is empty; every phase will report zero rows");
    }

    let results = run_suite(&rows, config.runs, load);
    for r in &results {
        for scenario in r.divergent_updates() {
            log::error!(
                "Run {}: {} target and updated counts differ",
                r.run,
                scenario.label()
            );
        }
    }

    print_report(&results);

    match append_metrics(&config.out_dir, &results) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            log::error!("{e:#}");
            process::exit(3);
        }
    }
}
