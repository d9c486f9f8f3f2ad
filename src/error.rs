//! Error types for the record store.
//!
//! Running off either end of the table is not an error: lookups return
//! `Ok(None)` and deleting a missing id returns `Ok(false)`. Only genuine
//! storage faults end up here.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the persistence layer.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, schema or query failure reported by SQLite.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The directory holding the database file could not be created.
    #[error("failed to prepare {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
