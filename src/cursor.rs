//! The "current record" pointer and the four user actions built on top of it.
//!
//! Nothing in here knows about terminals. Every action reports back through
//! the [`RecordView`] trait, which is the only thing a front-end has to
//! implement: show a record, clear the form, show a short message. Storage
//! faults are turned into error messages on the view and logged; they never
//! bubble out as panics.

use log::{debug, error, warn};
use rusqlite::Connection;

use crate::db::{delete_record, insert_record, next_after, prev_before};
use crate::error::StoreResult;
use crate::models::{CropRecord, NewCropRecord, RecordId};

/// Message shown when paging runs off either end of the table.
pub const NO_MORE_RECORDS: &str = "No more records.";

/// Severity of a message handed to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
}

/// What the record actions need from whatever is drawing the form.
pub trait RecordView {
    /// Fill every field with the values of `record`.
    fn display_record(&mut self, record: &CropRecord);
    /// Blank out every field.
    fn clear_fields(&mut self);
    /// Show a short human-readable message.
    fn show_message(&mut self, kind: MessageKind, text: &str);
}

/// Tracks which record is currently displayed, if any.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecordCursor {
    current: Option<RecordId>,
}

impl RecordCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<RecordId> {
        self.current
    }

    /// Move to the record after the current one (or the first record). The
    /// cursor stays put when there is nothing further.
    pub fn next(&mut self, conn: &Connection) -> StoreResult<Option<CropRecord>> {
        let record = next_after(conn, self.current)?;
        if let Some(found) = &record {
            self.current = Some(found.id);
        }
        Ok(record)
    }

    /// Move to the record before the current one (or the last record).
    pub fn previous(&mut self, conn: &Connection) -> StoreResult<Option<CropRecord>> {
        let record = prev_before(conn, self.current)?;
        if let Some(found) = &record {
            self.current = Some(found.id);
        }
        Ok(record)
    }

    /// Drop the current selection.
    pub fn forget(&mut self) {
        self.current = None;
    }
}

/// Store the form contents as a new record. The cursor is not moved to the
/// new row. Returns the new id when the insert went through.
pub fn add_record<V: RecordView + ?Sized>(
    conn: &Connection,
    view: &mut V,
    fields: &NewCropRecord,
) -> Option<RecordId> {
    match insert_record(conn, fields) {
        Ok(id) => {
            view.show_message(MessageKind::Info, "Record added successfully");
            Some(id)
        }
        Err(err) => {
            error!("failed to add crop record: {err}");
            view.show_message(MessageKind::Error, &format!("Error adding record: {err}"));
            None
        }
    }
}

/// Load the next record into the view.
pub fn next_record<V: RecordView + ?Sized>(
    conn: &Connection,
    cursor: &mut RecordCursor,
    view: &mut V,
) {
    let result = cursor.next(conn);
    show_lookup(view, result);
}

/// Load the previous record into the view.
pub fn prev_record<V: RecordView + ?Sized>(
    conn: &Connection,
    cursor: &mut RecordCursor,
    view: &mut V,
) {
    let result = cursor.previous(conn);
    show_lookup(view, result);
}

/// Delete the record the cursor points at, then clear the form and forget
/// the selection. A record that vanished in the meantime is treated the same
/// way, with a warning instead of a success message.
pub fn delete_current<V: RecordView + ?Sized>(
    conn: &Connection,
    cursor: &mut RecordCursor,
    view: &mut V,
) {
    let Some(id) = cursor.current() else {
        view.show_message(MessageKind::Warning, "No record selected to delete.");
        return;
    };

    match delete_record(conn, id) {
        Ok(true) => {
            view.show_message(MessageKind::Info, "Record deleted successfully");
            view.clear_fields();
            cursor.forget();
        }
        Ok(false) => {
            warn!("crop record {id} was already gone when deleting");
            view.show_message(
                MessageKind::Warning,
                &format!("Record {id} no longer exists."),
            );
            view.clear_fields();
            cursor.forget();
        }
        Err(err) => {
            error!("failed to delete crop record {id}: {err}");
            view.show_message(MessageKind::Error, &format!("Error deleting record: {err}"));
        }
    }
}

fn show_lookup<V: RecordView + ?Sized>(
    view: &mut V,
    result: StoreResult<Option<CropRecord>>,
) {
    match result {
        Ok(Some(record)) => {
            debug!("showing {record}");
            view.display_record(&record);
        }
        Ok(None) => view.show_message(MessageKind::Info, NO_MORE_RECORDS),
        Err(err) => {
            error!("failed to fetch crop record: {err}");
            view.show_message(MessageKind::Error, &format!("Error fetching record: {err}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[derive(Default)]
    struct RecordingView {
        shown: Option<CropRecord>,
        cleared: usize,
        messages: Vec<(MessageKind, String)>,
    }

    impl RecordView for RecordingView {
        fn display_record(&mut self, record: &CropRecord) {
            self.shown = Some(record.clone());
        }

        fn clear_fields(&mut self) {
            self.shown = None;
            self.cleared += 1;
        }

        fn show_message(&mut self, kind: MessageKind, text: &str) {
            self.messages.push((kind, text.to_string()));
        }
    }

    impl RecordingView {
        fn last_message(&self) -> Option<&(MessageKind, String)> {
            self.messages.last()
        }
    }

    #[test]
    fn cursor_stays_put_when_running_off_the_end() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &NewCropRecord::named("Wheat", "10")).unwrap();
        let mut cursor = RecordCursor::new();

        let first = cursor.next(&conn).unwrap().unwrap();
        assert_eq!(cursor.current(), Some(first.id));
        assert!(cursor.next(&conn).unwrap().is_none());
        assert_eq!(cursor.current(), Some(first.id));
        assert!(cursor.previous(&conn).unwrap().is_none());
        assert_eq!(cursor.current(), Some(first.id));
    }

    #[test]
    fn add_does_not_move_the_cursor() {
        let conn = open_in_memory().unwrap();
        let mut cursor = RecordCursor::new();
        let mut view = RecordingView::default();

        let id = add_record(&conn, &mut view, &NewCropRecord::named("Corn", "20"));
        assert_eq!(id, Some(1));
        assert_eq!(cursor.current(), None);
        assert_eq!(
            view.last_message(),
            Some(&(MessageKind::Info, "Record added successfully".to_string()))
        );

        next_record(&conn, &mut cursor, &mut view);
        assert_eq!(cursor.current(), Some(1));
        assert_eq!(view.shown.as_ref().map(|r| r.fields.crop_name.as_str()), Some("Corn"));
    }

    #[test]
    fn paging_past_the_end_reports_no_more_records() {
        let conn = open_in_memory().unwrap();
        let mut cursor = RecordCursor::new();
        let mut view = RecordingView::default();

        prev_record(&conn, &mut cursor, &mut view);
        assert_eq!(
            view.last_message(),
            Some(&(MessageKind::Info, NO_MORE_RECORDS.to_string()))
        );
        assert!(view.shown.is_none());
    }

    #[test]
    fn delete_without_selection_only_warns() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &NewCropRecord::named("Wheat", "10")).unwrap();
        let mut cursor = RecordCursor::new();
        let mut view = RecordingView::default();

        delete_current(&conn, &mut cursor, &mut view);

        assert_eq!(
            view.last_message(),
            Some(&(MessageKind::Warning, "No record selected to delete.".to_string()))
        );
        assert_eq!(view.cleared, 0);
        assert!(next_after(&conn, None).unwrap().is_some());
    }

    #[test]
    fn delete_clears_view_and_resets_cursor() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &NewCropRecord::named("Wheat", "10")).unwrap();
        insert_record(&conn, &NewCropRecord::named("Corn", "20")).unwrap();
        let mut cursor = RecordCursor::new();
        let mut view = RecordingView::default();

        next_record(&conn, &mut cursor, &mut view);
        delete_current(&conn, &mut cursor, &mut view);

        assert_eq!(cursor.current(), None);
        assert_eq!(view.cleared, 1);
        assert!(view.shown.is_none());

        next_record(&conn, &mut cursor, &mut view);
        assert_eq!(cursor.current(), Some(2));
    }

    #[test]
    fn delete_of_vanished_record_warns_and_resets() {
        let conn = open_in_memory().unwrap();
        insert_record(&conn, &NewCropRecord::named("Wheat", "10")).unwrap();
        let mut cursor = RecordCursor::new();
        let mut view = RecordingView::default();

        next_record(&conn, &mut cursor, &mut view);
        delete_record(&conn, 1).unwrap();
        delete_current(&conn, &mut cursor, &mut view);

        assert_eq!(
            view.last_message(),
            Some(&(MessageKind::Warning, "Record 1 no longer exists.".to_string()))
        );
        assert_eq!(cursor.current(), None);
        assert_eq!(view.cleared, 1);
    }

    #[test]
    fn storage_faults_become_error_messages() {
        let conn = open_in_memory().unwrap();
        conn.execute("DROP TABLE CropRecords", []).unwrap();
        let mut cursor = RecordCursor::new();
        let mut view = RecordingView::default();

        next_record(&conn, &mut cursor, &mut view);
        let (kind, text) = view.last_message().unwrap();
        assert_eq!(*kind, MessageKind::Error);
        assert!(text.starts_with("Error fetching record:"));

        assert_eq!(add_record(&conn, &mut view, &NewCropRecord::default()), None);
        let (kind, text) = view.last_message().unwrap();
        assert_eq!(*kind, MessageKind::Error);
        assert!(text.starts_with("Error adding record:"));
    }
}
