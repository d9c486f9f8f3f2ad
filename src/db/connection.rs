use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;
use log::{debug, info};
use rusqlite::Connection;

use crate::error::{StoreError, StoreResult};

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".farm-records";
/// SQLite file name stored inside the application data directory. Matches the
/// file name older installs used so existing databases keep working.
pub const DB_FILE_NAME: &str = "farm_management.db";

/// Open (or create) the database file at `path`, create its parent directory
/// if needed, and make sure the `CropRecords` table exists.
pub fn open_store(path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    info!("opened record store at {}", path.display());
    Ok(conn)
}

/// Same schema on a throwaway in-memory database.
pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the `CropRecords` table when it is missing. The table is never
/// dropped or migrated.
///
/// `AUTOINCREMENT` keeps SQLite from handing out the id of a deleted row
/// again. The numeric columns carry `REAL` affinity without any `CHECK`, so
/// numeric-looking input is stored as a number and anything else is kept as
/// text.
pub fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS CropRecords (
            RecordID INTEGER PRIMARY KEY AUTOINCREMENT,
            CropName TEXT,
            PlantingDate TEXT,
            HarvestDate TEXT,
            Yield REAL,
            FixedCost REAL,
            VariableCost REAL,
            Revenue REAL,
            Profit REAL
        )",
        [],
    )?;
    debug!("CropRecords schema ready");
    Ok(())
}

/// Resolve `~/.farm-records`, which holds the database, config and log file.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
