use chrono::{DateTime, Utc};
use habitlog_core::time::format_sql_timestamp;
use habitlog_core::{DoseEvent, MedicineEntry, MedicineUpdate, NewMedicine};
use rusqlite::{OptionalExtension as _, Row, params};

use super::{Storage, get_conn, parse_stored_ts};
use crate::error::StorageError;

const MEDICINE_COLUMNS: &str = "id, name, dose, created_at";

fn row_to_medicine(row: &Row<'_>) -> rusqlite::Result<MedicineEntry> {
    Ok(MedicineEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        dose: row.get(2)?,
        created_at: parse_stored_ts(3, row.get(3)?)?,
    })
}

impl Storage {
    /// Insert a dose and return its row id.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn insert_medicine(&self, new: &NewMedicine) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO medicine (name, dose, created_at) VALUES (?1, ?2, ?3)",
            params![new.name, new.dose, format_sql_timestamp(new.created_at)],
        )?;
        let id = conn.last_insert_rowid();
        tracing::debug!(id, name = %new.name, dose = new.dose, "Inserted medicine entry");
        Ok(id)
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn get_medicine(&self, id: i64) -> Result<Option<MedicineEntry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {MEDICINE_COLUMNS} FROM medicine WHERE id = ?1");
        Ok(conn.query_row(&sql, params![id], row_to_medicine).optional()?)
    }

    /// Doses with `start <= created_at < end`, oldest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn medicine_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MedicineEntry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!(
            "SELECT {MEDICINE_COLUMNS} FROM medicine
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY created_at ASC, id ASC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let results = stmt
            .query_map(
                params![format_sql_timestamp(start), format_sql_timestamp(end)],
                row_to_medicine,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// Replace every mutable column of an existing dose.
    ///
    /// # Errors
    /// Returns [`StorageError::NotFound`] if no row has `update.id`.
    pub fn update_medicine(&self, update: &MedicineUpdate) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let changed = conn.execute(
            "UPDATE medicine SET name = ?1, dose = ?2, created_at = ?3 WHERE id = ?4",
            params![
                update.name,
                update.dose,
                format_sql_timestamp(update.created_at),
                update.id
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::not_found("medicine entry", update.id));
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`StorageError::NotFound`] if no row has `id`.
    pub fn delete_medicine(&self, id: i64) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let changed = conn.execute("DELETE FROM medicine WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StorageError::not_found("medicine entry", id));
        }
        tracing::debug!(id, "Deleted medicine entry");
        Ok(())
    }

    /// Every distinct substance name ever recorded, alphabetically.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn substances(&self) -> Result<Vec<String>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare("SELECT DISTINCT name FROM medicine ORDER BY name")?;
        let results =
            stmt.query_map([], |row| row.get(0))?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// (time, dose) pairs for one already-normalized name inside `[start, end)`.
    pub(crate) fn dose_events(
        &self,
        name: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DoseEvent>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT created_at, dose FROM medicine
             WHERE name = ?1 AND created_at >= ?2 AND created_at < ?3
             ORDER BY created_at",
        )?;
        let results = stmt
            .query_map(
                params![name, format_sql_timestamp(start), format_sql_timestamp(end)],
                |row| Ok(DoseEvent { at: parse_stored_ts(0, row.get(0)?)?, dose: row.get(1)? }),
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }
}
