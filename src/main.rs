use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use shelfmark::{
    config::{Config, Mode},
    logging,
    observers::ActivityLogger,
    shell::Shell,
    store::LibraryStore,
    tui,
};
use tracing::{debug, info};

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config)?;
    debug!(?config, "starting");

    let mut store = if config.empty { LibraryStore::new() } else { LibraryStore::with_seed_books() };
    store.register_observer(Box::new(ActivityLogger));
    info!(books = store.len(), mode = ?config.mode, "library ready");

    match config.mode {
        Mode::Tui => tui::run(store)?,
        Mode::Shell => {
            let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
            let mut shell = Shell::new(store, interactive);
            shell.run(io::stdin().lock(), io::stdout().lock())?;
        }
    }

    info!("library closed");
    Ok(())
}
