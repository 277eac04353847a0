//! Shared building blocks for the tripbench harness: the trip [`types::Row`],
//! the fixed CSV schema, the record parser and the logger setup used by the
//! benchmark binary.

use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::{pattern::PatternEncoder, Encode},
    filter::threshold::ThresholdFilter,
};
use std::{backtrace, env, path::Path};

pub mod constants;
pub mod record;
pub mod string_operations;
pub mod types;

/// Pattern encoder that appends a captured backtrace to error records.
#[derive(Debug)]
struct ErrorBacktraceEncoder {
    inner: PatternEncoder,
    backtraces: bool,
}

impl ErrorBacktraceEncoder {
    /// Backtraces follow `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`.
    fn from_env(pattern: &str) -> Self {
        let backtraces =
            env::var_os("RUST_BACKTRACE").is_some() || env::var_os("RUST_LIB_BACKTRACE").is_some();
        Self::with_backtraces(pattern, backtraces)
    }

    fn with_backtraces(pattern: &str, backtraces: bool) -> Self {
        Self {
            inner: PatternEncoder::new(pattern),
            backtraces,
        }
    }
}

impl Encode for ErrorBacktraceEncoder {
    fn encode(
        &self,
        w: &mut dyn log4rs::encode::Write,
        record: &log::Record<'_>,
    ) -> anyhow::Result<()> {
        if !self.backtraces || record.level() != log::Level::Error {
            return self.inner.encode(w, record);
        }
        let trace = backtrace::Backtrace::capture();
        self.inner.encode(
            w,
            &record
                .to_builder()
                .args(format_args!("{}\nBacktrace:\n{}", record.args(), trace))
                .build(),
        )
    }
}

/// Install the process-wide logger.
///
/// Records at `log_level` and above go to stderr. When `file_path` is given
/// the same records are also appended to that file.
pub fn initialize_logger(log_level: LevelFilter, file_path: Option<&Path>) -> anyhow::Result<()> {
    const LOGGING_PATTERN: &str = "{d} {l} {f}:{L} - {m}\n";

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(ErrorBacktraceEncoder::from_env(LOGGING_PATTERN)))
        .build();

    let mut config_builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(log_level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let Some(path) = file_path {
        let logfile = FileAppender::builder()
            .encoder(Box::new(ErrorBacktraceEncoder::from_env(LOGGING_PATTERN)))
            .build(path)?;

        config_builder =
            config_builder.appender(Appender::builder().build("logfile", Box::new(logfile)));
        root = root.appender("logfile");
    }

    let config = config_builder.build(root.build(log_level))?;
    let _handle = log4rs::init_config(config)?;

    Ok(())
}
