//! Domain models that mirror the `CropRecords` table. They stay plain data
//! holders so the cursor and the terminal form can pass them around freely
//! without knowing anything about SQL.

use std::fmt;

/// Primary key assigned by SQLite. Ids only ever grow and are never reused.
pub type RecordId = i64;

/// The eight user-entered fields of a crop record, without an id. This is
/// what the form produces and what `insert_record` consumes.
///
/// Every field is kept as text. The numeric columns accept whatever the user
/// typed; nothing here checks that a cost parses as a number or that profit
/// matches revenue minus costs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCropRecord {
    pub crop_name: String,
    pub planting_date: String,
    pub harvest_date: String,
    pub yield_amount: String,
    pub fixed_cost: String,
    pub variable_cost: String,
    pub revenue: String,
    pub profit: String,
}

/// A persisted row: the fields as they came back from the database plus the
/// id SQLite assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropRecord {
    pub id: RecordId,
    pub fields: NewCropRecord,
}

#[cfg(test)]
impl NewCropRecord {
    /// Shorthand for tests where only the crop name and yield matter.
    pub(crate) fn named(crop_name: &str, yield_amount: &str) -> Self {
        Self {
            crop_name: crop_name.to_string(),
            yield_amount: yield_amount.to_string(),
            ..Self::default()
        }
    }
}

impl fmt::Display for CropRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.fields.crop_name.trim();
        if name.is_empty() {
            write!(f, "Record #{}", self.id)
        } else {
            write!(f, "Record #{} ({})", self.id, name)
        }
    }
}
