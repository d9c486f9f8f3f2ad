//! Core library surface for the Farm Records terminal application.
//!
//! The record store (`db`) and the navigation cursor (`cursor`) have no
//! terminal dependency, so the `bin` target and tests drive the same pieces.
pub mod cli;
pub mod config;
pub mod cursor;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Convenience re-exports for the persistence layer.
pub use db::{
    count_records, delete_record, insert_record, next_after, open_in_memory, open_store,
    prev_before,
};

pub use cursor::{MessageKind, RecordCursor, RecordView};
pub use error::{StoreError, StoreResult};
pub use models::{CropRecord, NewCropRecord, RecordId};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
