use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Filter used when neither `--log-level` nor `SHELFMARK_LOG` is given
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Which presentation layer drives the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Interactive terminal window
    #[default]
    Tui,
    /// Line-oriented commands on stdin
    Shell,
}

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Append to a file
    File(PathBuf),
    /// Drop all log output
    Discard,
}

/// Command-line configuration for the library inventory
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Presentation layer to run
    #[arg(long, value_enum, env = "SHELFMARK_MODE", default_value_t = Mode::Tui)]
    pub mode: Mode,

    /// Start without the seed books
    #[arg(long)]
    pub empty: bool,

    /// Log filter directive, e.g. `debug` or `shelfmark=trace`
    #[arg(long, env = "SHELFMARK_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,

    /// Write logs to this file instead of the default target
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolve the log destination for the chosen mode
    ///
    /// The terminal UI owns the screen, so without an explicit file its logs
    /// are discarded rather than written over the interface.
    #[must_use]
    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, self.mode) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Mode::Tui) => LogTarget::Discard,
            (None, Mode::Shell) => LogTarget::Stderr,
        }
    }
}
