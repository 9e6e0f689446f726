use std::sync::Arc;

use chrono::Utc;
use habitlog_core::{
    BucketZone, DEFAULT_HISTOGRAM_HOURS, DEFAULT_PIVOT_DAYS, MAX_HISTOGRAM_HOURS, MAX_NAME_LEN,
    MAX_PIVOT_DAYS, MedicineEntry, MedicineUpdate, NewMedicine, PivotPoint, ValidationError,
    Validator, normalize_substance_name,
};
use habitlog_storage::StorageStats;
use habitlog_storage::traits::HabitStore;

use crate::{ServiceError, require_date};

pub struct MedicineService {
    storage: Arc<dyn HabitStore>,
    zone: BucketZone,
}

impl MedicineService {
    #[must_use]
    pub fn new(storage: Arc<dyn HabitStore>, zone: BucketZone) -> Self {
        Self { storage, zone }
    }

    /// Doses recorded on local calendar `date`, oldest first.
    pub async fn list_for_date(&self, date: &str) -> Result<Vec<MedicineEntry>, ServiceError> {
        let day = require_date("date", date)?;
        let (start, end) = self.zone.day_bounds(day);
        let entries = self.storage.medicine_between(start, end).await?;
        tracing::debug!(%date, count = entries.len(), "Listed medicine for date");
        Ok(entries)
    }

    /// Record a dose on `date` at the current local time of day.
    pub async fn create_on_date(
        &self,
        date: &str,
        raw_name: &str,
        dose: f64,
    ) -> Result<i64, ServiceError> {
        let day = require_date("date", date)?;
        let created_at = self.zone.at_current_time(day, Utc::now());
        let new = NewMedicine::parse(raw_name, dose, created_at)?;
        let id = self.storage.insert_medicine(&new).await?;
        tracing::info!(id, name = %new.name, %date, "Recorded dose");
        Ok(id)
    }

    pub async fn update(
        &self,
        id: i64,
        raw_name: &str,
        dose: f64,
        created_at: &str,
    ) -> Result<(), ServiceError> {
        let update = MedicineUpdate::parse(id, raw_name, dose, created_at)?;
        self.storage.update_medicine(&update).await?;
        tracing::info!(id, name = %update.name, "Updated dose");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut v = Validator::new();
        v.positive_id("id", id);
        v.finish()?;
        self.storage.delete_medicine(id).await?;
        tracing::info!(id, "Deleted dose");
        Ok(())
    }

    pub async fn substances(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.storage.substances().await?)
    }

    /// Zero-filled per-day totals, `days + 1` points ending today.
    pub async fn daily_pivot(
        &self,
        name: &str,
        days: Option<u32>,
    ) -> Result<Vec<PivotPoint>, ServiceError> {
        let days = days.unwrap_or(DEFAULT_PIVOT_DAYS);
        check_report_args(name, "days", days, MAX_PIVOT_DAYS)?;
        let points = self.storage.daily_totals(name, days, Utc::now(), self.zone).await?;
        tracing::debug!(name = %normalize_substance_name(name), days, "Computed daily pivot");
        Ok(points)
    }

    /// Per-hour dose counts, `hours + 1` points ending with the current hour.
    pub async fn hourly_histogram(
        &self,
        name: &str,
        hours: Option<u32>,
    ) -> Result<Vec<PivotPoint>, ServiceError> {
        let hours = hours.unwrap_or(DEFAULT_HISTOGRAM_HOURS);
        check_report_args(name, "hours", hours, MAX_HISTOGRAM_HOURS)?;
        Ok(self.storage.hourly_histogram(name, hours, Utc::now(), self.zone).await?)
    }

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.storage.stats().await?)
    }
}

fn check_report_args(
    name: &str,
    window_field: &str,
    window: u32,
    max: u32,
) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.text("name", name, MAX_NAME_LEN, "Medicine name");
    v.range(window_field, window, 1, max);
    v.finish()
}
