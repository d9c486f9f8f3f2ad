//! Logger setup. The terminal belongs to the form while the app runs, so log
//! lines go to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::config::parse_level;

/// Initialise `env_logger` appending to `log_file`. An explicit `level` wins
/// over `RUST_LOG`, which wins over `info`.
pub fn init(log_file: &Path, level: Option<&str>) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create log directory")?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        let filter: LevelFilter =
            parse_level(level).ok_or_else(|| anyhow!("unknown log level '{level}'"))?;
        builder.filter_level(filter);
    }
    builder
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .context("failed to initialise logger")?;
    Ok(())
}
