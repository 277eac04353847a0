//! Command-line configuration for the benchmark binary.

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable consulted when `--csv` is not given.
pub const CSV_ENV_VAR: &str = "TRIPBENCH_CSV";
pub const DEFAULT_OUT_DIR: &str = "results/tripbench";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Csv(PathBuf),
    /// Generate this many rows instead of reading a file.
    Synthetic(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub source: DataSource,
    pub out_dir: PathBuf,
    /// 0 means no cap.
    pub limit_rows: usize,
    pub runs: u32,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(BenchConfig),
    Help,
}

pub fn usage() -> &'static str {
    "Usage: tripbench (--csv <path> | --synthetic <rows>) [--out <dir>] [--limit-rows N]\n\
     \x20                [--runs N] [--log-level <level>] [--log-file <path>]\n\
     \n\
     \x20 --csv <path>         trip CSV to load (default: $TRIPBENCH_CSV)\n\
     \x20 --synthetic <rows>   generate rows instead of loading a file\n\
     \x20 --out <dir>          metrics output directory (default: results/tripbench)\n\
     \x20 --limit-rows N       stop loading after N rows, 0 = all (default: 0)\n\
     \x20 --runs N             repeat the query/update phases N times (default: 1)\n\
     \x20 --log-level <level>  off, error, warn, info, debug, trace (default: info)\n\
     \x20 --log-file <path>    also write log records to this file"
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("missing value for {flag}"))?;
    value
        .into_string()
        .map_err(|v| anyhow!("value for {flag} is not valid UTF-8: {v:?}"))
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("invalid number for {flag}: {value}"))
}

/// Parse the arguments following the program name.
///
/// `csv_env` is the value of [`CSV_ENV_VAR`], used when `--csv` is absent.
pub fn parse_args<I>(args: I, csv_env: Option<OsString>) -> Result<Command>
where
    I: IntoIterator<Item = OsString>,
{
    let mut csv: Option<PathBuf> = None;
    let mut synthetic: Option<usize> = None;
    let mut out_dir = PathBuf::from(DEFAULT_OUT_DIR);
    let mut limit_rows = 0usize;
    let mut runs = 1u32;
    let mut log_level = LevelFilter::Info;
    let mut log_file: Option<PathBuf> = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let Some(flag) = arg.to_str() else {
            return Err(anyhow!("unknown argument: {:?}", arg));
        };
        match flag {
            "--help" | "-h" => return Ok(Command::Help),
            "--csv" => csv = Some(PathBuf::from(next_value(&mut args, flag)?)),
            "--out" => out_dir = PathBuf::from(next_value(&mut args, flag)?),
            "--limit-rows" => limit_rows = parse_number(&next_value(&mut args, flag)?, flag)?,
            "--synthetic" => synthetic = Some(parse_number(&next_value(&mut args, flag)?, flag)?),
            "--runs" => runs = parse_number(&next_value(&mut args, flag)?, flag)?,
            "--log-level" => {
                let value = next_value(&mut args, flag)?;
                log_level = value
                    .parse()
                    .map_err(|_| anyhow!("invalid log level: {value}"))?;
            }
            "--log-file" => log_file = Some(PathBuf::from(next_value(&mut args, flag)?)),
            _ => return Err(anyhow!("unknown argument: {flag}")),
        }
    }

    if runs == 0 {
        return Err(anyhow!("--runs must be at least 1"));
    }

    let source = match (csv, synthetic) {
        (Some(_), Some(_)) => return Err(anyhow!("--csv and --synthetic are mutually exclusive")),
        (Some(path), None) => DataSource::Csv(path),
        (None, Some(rows)) => DataSource::Synthetic(rows),
        (None, None) => match csv_env.filter(|v| !v.is_empty()) {
            Some(path) => DataSource::Csv(PathBuf::from(path)),
            None => return Err(anyhow!("no dataset given; pass --csv <path> or --synthetic <rows>")),
        },
    };

    Ok(Command::Run(BenchConfig {
        source,
        out_dir,
        limit_rows,
        runs,
        log_level,
        log_file,
    }))
}
