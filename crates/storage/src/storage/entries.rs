use chrono::{DateTime, Utc};
use habitlog_core::time::format_sql_timestamp;
use habitlog_core::{Entry, EntryUpdate, NewEntry};
use rusqlite::{OptionalExtension as _, Row, params};

use super::{Storage, get_conn, parse_stored_opt_ts, parse_stored_ts};
use crate::error::StorageError;

const ENTRY_COLUMNS: &str = "id, text, completed, completed_at, created_at";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get(2)?,
        completed_at: parse_stored_opt_ts(3, row.get(3)?)?,
        created_at: parse_stored_ts(4, row.get(4)?)?,
    })
}

impl Storage {
    /// # Errors
    /// Returns error if database query fails.
    pub fn insert_entry(&self, new: &NewEntry) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO entries (text, completed, completed_at, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                new.text,
                new.completed,
                new.completed_at.map(format_sql_timestamp),
                format_sql_timestamp(new.created_at)
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// # Errors
    /// Returns error if database query fails.
    pub fn get_entry(&self, id: i64) -> Result<Option<Entry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1");
        Ok(conn.query_row(&sql, params![id], row_to_entry).optional()?)
    }

    /// Entries created in `[start, end)`, oldest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Entry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM entries
             WHERE created_at >= ?1 AND created_at < ?2
             ORDER BY created_at ASC, id ASC"
        );
        let mut stmt = conn.prepare(&sql)?;
        let results = stmt
            .query_map(
                params![format_sql_timestamp(start), format_sql_timestamp(end)],
                row_to_entry,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// Entries with the given completion flag, newest first, optionally
    /// limited to those created inside `window`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn entries_by_status(
        &self,
        completed: bool,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<Entry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let results = match window {
            Some((start, end)) => {
                let sql = format!(
                    "SELECT {ENTRY_COLUMNS} FROM entries
                     WHERE completed = ?1 AND created_at >= ?2 AND created_at < ?3
                     ORDER BY created_at DESC, id DESC"
                );
                let mut stmt = conn.prepare(&sql)?;
                stmt.query_map(
                    params![completed, format_sql_timestamp(start), format_sql_timestamp(end)],
                    row_to_entry,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?
            },
            None => {
                let sql = format!(
                    "SELECT {ENTRY_COLUMNS} FROM entries
                     WHERE completed = ?1
                     ORDER BY created_at DESC, id DESC"
                );
                let mut stmt = conn.prepare(&sql)?;
                stmt.query_map(params![completed], row_to_entry)?
                    .collect::<rusqlite::Result<Vec<_>>>()?
            },
        };
        Ok(results)
    }

    /// The `limit` most recently created entries, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn recent_entries(&self, limit: usize) -> Result<Vec<Entry>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY created_at DESC, id DESC LIMIT ?1"
        );
        let mut stmt = conn.prepare(&sql)?;
        let results = stmt
            .query_map(params![limit as i64], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// # Errors
    /// Returns [`StorageError::NotFound`] if no row has `update.id`.
    pub fn update_entry(&self, update: &EntryUpdate) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let changed = conn.execute(
            "UPDATE entries SET text = ?1, completed = ?2, completed_at = ?3 WHERE id = ?4",
            params![
                update.text,
                update.completed,
                update.completed_at.map(format_sql_timestamp),
                update.id
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::not_found("entry", update.id));
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`StorageError::NotFound`] if no row has `id`.
    pub fn delete_entry(&self, id: i64) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let changed = conn.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StorageError::not_found("entry", id));
        }
        Ok(())
    }
}
