//! Binary entry point: resolve settings, start logging, open the record store
//! and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use clap::Parser;
use farm_records::cli::Cli;
use farm_records::config::Settings;
use farm_records::{logging, open_store, run_app, App};

/// Returning a `Result` bubbles fatal start-up problems (an unreadable config,
/// a database path that cannot be created) to the terminal instead of
/// crashing silently.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;
    logging::init(&settings.log_file, settings.log_level.as_deref())?;
    log::info!("starting farm-records with database {}", settings.db_path.display());

    let conn = open_store(&settings.db_path).context("failed to open crop record database")?;
    let mut app = App::new(conn)?;
    let result = run_app(&mut app);
    drop(app);

    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    } else {
        log::info!("shutting down");
    }
    result
}
