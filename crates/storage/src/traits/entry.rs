use async_trait::async_trait;
use chrono::{DateTime, Utc};
use habitlog_core::{Entry, EntryUpdate, NewEntry};

use crate::error::StorageError;

/// CRUD operations on free-text entries.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Insert an entry. Returns the new row id.
    async fn insert_entry(&self, new: &NewEntry) -> Result<i64, StorageError>;

    /// Get an entry by id.
    async fn get_entry(&self, id: i64) -> Result<Option<Entry>, StorageError>;

    /// Entries created in `[start, end)`, oldest first.
    async fn entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Entry>, StorageError>;

    /// Entries by completion flag, newest first, optionally inside a window.
    async fn entries_by_status(
        &self,
        completed: bool,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<Entry>, StorageError>;

    /// Most recently created entries, newest first.
    async fn recent_entries(&self, limit: usize) -> Result<Vec<Entry>, StorageError>;

    /// Replace text and completion state of an existing entry.
    async fn update_entry(&self, update: &EntryUpdate) -> Result<(), StorageError>;

    /// Delete an entry.
    async fn delete_entry(&self, id: i64) -> Result<(), StorageError>;
}
