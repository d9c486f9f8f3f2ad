//! Runtime settings. Values come from three places, highest priority first:
//! command-line flags, `~/.farm-records/config.toml`, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::Deserialize;

use crate::cli::Cli;
use crate::db::{data_dir, DB_FILE_NAME};

/// Name of the optional config file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Name of the log file inside the data directory.
pub const LOG_FILE_NAME: &str = "farm-records.log";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// `env_logger` filter directive, e.g. `debug` or `farm_records=trace`.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

/// Fully resolved settings handed to `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_file: PathBuf,
    /// `None` defers to `RUST_LOG`, then to `info`.
    pub log_level: Option<String>,
}

impl Settings {
    /// Resolve settings for a normal run, reading the config file from the
    /// path given on the command line or from the data directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let base = data_dir()?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| base.join(CONFIG_FILE_NAME));
        let file = read_config(&config_path)?.unwrap_or_default();
        Ok(Self::resolve(cli, file, &base))
    }

    /// Merge CLI flags over the file config over defaults rooted at `base`.
    pub fn resolve(cli: &Cli, file: FileConfig, base: &Path) -> Self {
        let db_path = cli
            .db
            .clone()
            .or(file.database.path)
            .unwrap_or_else(|| base.join(DB_FILE_NAME));
        let log_file = file
            .logging
            .file
            .unwrap_or_else(|| base.join(LOG_FILE_NAME));
        let log_level = cli.log_level.clone().or(file.logging.level);

        Self {
            db_path,
            log_file,
            log_level,
        }
    }
}

/// Read and parse a config file. A missing file is not an error and yields
/// `None`; an unreadable or malformed one is.
pub fn read_config(path: &Path) -> Result<Option<FileConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(Some(config))
}

/// Parse a level name into a filter. Used to validate `--log-level` before the
/// logger is built so a typo fails loudly instead of silently logging nothing.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    level.trim().parse::<LevelFilter>().ok()
}
