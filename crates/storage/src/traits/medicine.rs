use async_trait::async_trait;
use chrono::{DateTime, Utc};
use habitlog_core::{BucketZone, MedicineEntry, MedicineUpdate, NewMedicine, PivotPoint};

use crate::error::StorageError;
use crate::storage::StorageStats;

/// CRUD operations on dose rows.
#[async_trait]
pub trait MedicineStore: Send + Sync {
    /// Insert a dose. Returns the new row id.
    async fn insert_medicine(&self, new: &NewMedicine) -> Result<i64, StorageError>;

    /// Get a dose by id.
    async fn get_medicine(&self, id: i64) -> Result<Option<MedicineEntry>, StorageError>;

    /// Doses created in `[start, end)`, oldest first.
    async fn medicine_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MedicineEntry>, StorageError>;

    /// Replace name, dose and time of an existing dose.
    async fn update_medicine(&self, update: &MedicineUpdate) -> Result<(), StorageError>;

    /// Delete a dose.
    async fn delete_medicine(&self, id: i64) -> Result<(), StorageError>;

    /// Distinct substance names, alphabetically.
    async fn substances(&self) -> Result<Vec<String>, StorageError>;
}

/// Zero-filled time series over dose rows.
#[async_trait]
pub trait PivotStore: Send + Sync {
    /// Per-day dose totals, `days + 1` points.
    async fn daily_totals(
        &self,
        name: &str,
        days: u32,
        now: DateTime<Utc>,
        zone: BucketZone,
    ) -> Result<Vec<PivotPoint>, StorageError>;

    /// Per-hour dose counts, `hours + 1` points.
    async fn hourly_histogram(
        &self,
        name: &str,
        hours: u32,
        now: DateTime<Utc>,
        zone: BucketZone,
    ) -> Result<Vec<PivotPoint>, StorageError>;
}

#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn stats(&self) -> Result<StorageStats, StorageError>;
}
