use std::path::PathBuf;

use clap::Parser;

/// Record crop plantings, harvests and finances in a local SQLite database.
#[derive(Debug, Parser)]
#[command(name = "farm-records", version, about)]
pub struct Cli {
    /// Database file to open (default: ~/.farm-records/farm_management.db).
    #[arg(long, value_name = "PATH", env = "FARM_RECORDS_DB")]
    pub db: Option<PathBuf>,

    /// Config file to read (default: ~/.farm-records/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level written to the log file (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}
