//! Async trait implementations for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use habitlog_core::{
    BucketZone, Entry, EntryUpdate, MedicineEntry, MedicineUpdate, NewEntry, NewMedicine,
    PivotPoint,
};

use crate::error::StorageError;
use crate::storage::StorageStats;
use crate::traits::{EntryStore, MedicineStore, PivotStore, StatsStore};
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Join(e.to_string()))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg` clones a `&T` and passes `&arg`
/// - `@str arg` copies a `&str` into a `String` and passes `&arg`
/// - `@val arg` moves the value (Copy types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

// ── MedicineStore ────────────────────────────────────────────────

#[async_trait]
impl MedicineStore for Storage {
    async fn insert_medicine(&self, new: &NewMedicine) -> Result<i64, StorageError> {
        delegate!(self, insert_medicine, @ref new)
    }
    async fn get_medicine(&self, id: i64) -> Result<Option<MedicineEntry>, StorageError> {
        delegate!(self, get_medicine, @val id)
    }
    async fn medicine_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MedicineEntry>, StorageError> {
        delegate!(self, medicine_between, @val start, @val end)
    }
    async fn update_medicine(&self, update: &MedicineUpdate) -> Result<(), StorageError> {
        delegate!(self, update_medicine, @ref update)
    }
    async fn delete_medicine(&self, id: i64) -> Result<(), StorageError> {
        delegate!(self, delete_medicine, @val id)
    }
    async fn substances(&self) -> Result<Vec<String>, StorageError> {
        delegate!(self, substances)
    }
}

// ── PivotStore ───────────────────────────────────────────────────

#[async_trait]
impl PivotStore for Storage {
    async fn daily_totals(
        &self,
        name: &str,
        days: u32,
        now: DateTime<Utc>,
        zone: BucketZone,
    ) -> Result<Vec<PivotPoint>, StorageError> {
        delegate!(self, daily_totals, @str name, @val days, @val now, @val zone)
    }
    async fn hourly_histogram(
        &self,
        name: &str,
        hours: u32,
        now: DateTime<Utc>,
        zone: BucketZone,
    ) -> Result<Vec<PivotPoint>, StorageError> {
        delegate!(self, hourly_histogram, @str name, @val hours, @val now, @val zone)
    }
}

// ── StatsStore ───────────────────────────────────────────────────

#[async_trait]
impl StatsStore for Storage {
    async fn stats(&self) -> Result<StorageStats, StorageError> {
        delegate!(self, stats)
    }
}

// ── EntryStore ───────────────────────────────────────────────────

#[async_trait]
impl EntryStore for Storage {
    async fn insert_entry(&self, new: &NewEntry) -> Result<i64, StorageError> {
        delegate!(self, insert_entry, @ref new)
    }
    async fn get_entry(&self, id: i64) -> Result<Option<Entry>, StorageError> {
        delegate!(self, get_entry, @val id)
    }
    async fn entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Entry>, StorageError> {
        delegate!(self, entries_between, @val start, @val end)
    }
    async fn entries_by_status(
        &self,
        completed: bool,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<Vec<Entry>, StorageError> {
        delegate!(self, entries_by_status, @val completed, @val window)
    }
    async fn recent_entries(&self, limit: usize) -> Result<Vec<Entry>, StorageError> {
        delegate!(self, recent_entries, @val limit)
    }
    async fn update_entry(&self, update: &EntryUpdate) -> Result<(), StorageError> {
        delegate!(self, update_entry, @ref update)
    }
    async fn delete_entry(&self, id: i64) -> Result<(), StorageError> {
        delegate!(self, delete_entry, @val id)
    }
}
