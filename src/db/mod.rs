//! Persistence module split across logical submodules.

mod connection;
mod records;

pub use connection::{
    data_dir, ensure_schema, open_in_memory, open_store, DATA_DIR_NAME, DB_FILE_NAME,
};
pub use records::{count_records, delete_record, insert_record, next_after, prev_before};
