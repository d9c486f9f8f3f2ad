use log::{debug, info};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreResult;
use crate::models::{CropRecord, NewCropRecord, RecordId};

/// Column list shared by every query so `record_from_row` can read by index.
const RECORD_COLUMNS: &str = "RecordID, CropName, PlantingDate, HarvestDate, Yield, \
     FixedCost, VariableCost, Revenue, Profit";

/// Append a new row and return the id SQLite assigned. Field values are
/// stored as given, without validation.
pub fn insert_record(conn: &Connection, record: &NewCropRecord) -> StoreResult<RecordId> {
    conn.execute(
        "INSERT INTO CropRecords (CropName, PlantingDate, HarvestDate, Yield, FixedCost,
                                  VariableCost, Revenue, Profit)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.crop_name,
            record.planting_date,
            record.harvest_date,
            record.yield_amount,
            record.fixed_cost,
            record.variable_cost,
            record.revenue,
            record.profit,
        ],
    )?;

    let id = conn.last_insert_rowid();
    info!("inserted crop record {id}");
    Ok(id)
}

/// Return the record that follows `current` in id order. Without a current id
/// this is the first record in the table.
pub fn next_after(conn: &Connection, current: Option<RecordId>) -> StoreResult<Option<CropRecord>> {
    let record = match current {
        None => query_one(
            conn,
            &format!("SELECT {RECORD_COLUMNS} FROM CropRecords ORDER BY RecordID ASC LIMIT 1"),
            [],
        )?,
        Some(id) => query_one(
            conn,
            &format!(
                "SELECT {RECORD_COLUMNS} FROM CropRecords
                 WHERE RecordID > ?1 ORDER BY RecordID ASC LIMIT 1"
            ),
            [id],
        )?,
    };
    debug!(
        "next_after({current:?}) -> {:?}",
        record.as_ref().map(|r| r.id)
    );
    Ok(record)
}

/// Return the record that precedes `current` in id order. Without a current id
/// this is the last record in the table.
pub fn prev_before(
    conn: &Connection,
    current: Option<RecordId>,
) -> StoreResult<Option<CropRecord>> {
    let record = match current {
        None => query_one(
            conn,
            &format!("SELECT {RECORD_COLUMNS} FROM CropRecords ORDER BY RecordID DESC LIMIT 1"),
            [],
        )?,
        Some(id) => query_one(
            conn,
            &format!(
                "SELECT {RECORD_COLUMNS} FROM CropRecords
                 WHERE RecordID < ?1 ORDER BY RecordID DESC LIMIT 1"
            ),
            [id],
        )?,
    };
    debug!(
        "prev_before({current:?}) -> {:?}",
        record.as_ref().map(|r| r.id)
    );
    Ok(record)
}

/// Remove the row with `id`. Returns whether a row was actually deleted; a
/// missing id is not an error.
pub fn delete_record(conn: &Connection, id: RecordId) -> StoreResult<bool> {
    let deleted = conn.execute("DELETE FROM CropRecords WHERE RecordID = ?1", params![id])?;
    if deleted > 0 {
        info!("deleted crop record {id}");
    } else {
        debug!("delete of crop record {id} matched nothing");
    }
    Ok(deleted > 0)
}

/// Number of stored records, shown in the footer.
pub fn count_records(conn: &Connection) -> StoreResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM CropRecords", [], |row| row.get(0))?;
    Ok(count)
}

fn query_one<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> StoreResult<Option<CropRecord>> {
    let record = conn
        .query_row(sql, params, record_from_row)
        .optional()?;
    Ok(record)
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CropRecord> {
    Ok(CropRecord {
        id: row.get(0)?,
        fields: NewCropRecord {
            crop_name: column_text(row, 1)?,
            planting_date: column_text(row, 2)?,
            harvest_date: column_text(row, 3)?,
            yield_amount: column_text(row, 4)?,
            fixed_cost: column_text(row, 5)?,
            variable_cost: column_text(row, 6)?,
            revenue: column_text(row, 7)?,
            profit: column_text(row, 8)?,
        },
    })
}

/// Render a column as text whatever storage class SQLite picked for it. The
/// numeric columns hold a `REAL` when the input looked like a number and the
/// raw text otherwise; older databases may also hold `NULL`. Reals always keep
/// a fractional part, so a stored `10` reads back as `10.0`.
fn column_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => format!("{value:?}"),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    })
}
