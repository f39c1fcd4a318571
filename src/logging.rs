use std::{fs::OpenOptions, io, sync::Mutex};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, LogTarget};

/// Install the global `tracing` subscriber described by `config`
///
/// # Errors
///
/// Fails if the filter directive is invalid, the log file cannot be opened,
/// or a subscriber has already been installed.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log filter {:?}", config.log_level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match config.log_target() {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        LogTarget::Discard => builder.with_writer(io::sink).try_init(),
    };

    installed.map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
