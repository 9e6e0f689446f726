use serde::Serialize;

use super::{Storage, get_conn};
use crate::error::StorageError;

/// Row counts across the live tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub medicine_count: u64,
    pub substance_count: u64,
    pub entry_count: u64,
    pub completed_entry_count: u64,
}

impl Storage {
    /// # Errors
    /// Returns error if database query fails.
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        let medicine_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM medicine", [], |row| row.get(0))?;
        let substance_count: i64 =
            conn.query_row("SELECT COUNT(DISTINCT name) FROM medicine", [], |row| row.get(0))?;
        let entry_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        let completed_entry_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM entries WHERE completed = 1", [], |row| {
                row.get(0)
            })?;
        Ok(StorageStats {
            medicine_count: medicine_count as u64,
            substance_count: substance_count as u64,
            entry_count: entry_count as u64,
            completed_entry_count: completed_entry_count as u64,
        })
    }
}
