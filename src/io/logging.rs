//! `log` backend that prints through the progress display
//!
//! Lines go through `MultiProgress::println`, which suspends the bars while printing,
//! so log output and progress output never interleave mid-line.

use indicatif::MultiProgress;
use log::{LevelFilter, Log, Metadata, Record};

use crate::io::error::{Result, invalid_parameter};

/// Logger forwarding this crate's records above the progress bars
pub struct ProgressLogger {
    level: LevelFilter,
    output: MultiProgress,
}

impl ProgressLogger {
    /// Create a logger that prints records at or above `level`
    pub const fn new(level: LevelFilter, output: MultiProgress) -> Self {
        Self { level, output }
    }

    /// Line printed for a record
    pub fn format(record: &Record<'_>) -> String {
        format!("[{:<5}] {}", record.level(), record.args())
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_PKG_NAME"))
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            // Write failures on a closed terminal are ignored
            let _ = self.output.println(Self::format(record));
        }
    }

    fn flush(&self) {}
}

/// Map command-line verbosity to a level filter
///
/// `quiet` keeps only errors; otherwise each `-v` raises the level one step from warnings.
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger process-wide
///
/// # Errors
///
/// Returns an error if another logger is already installed
pub fn init(level: LevelFilter, output: MultiProgress) -> Result<()> {
    log::set_boxed_logger(Box::new(ProgressLogger::new(level, output))).map_err(|error| {
        invalid_parameter("logger", &error, &"a logger is already installed")
    })?;
    log::set_max_level(level);
    Ok(())
}
