use chrono::{DateTime, Utc};
use habitlog_core::{BucketZone, PivotPoint, normalize_substance_name};

use super::Storage;
use crate::error::StorageError;

impl Storage {
    /// Zero-filled per-day dose totals for one substance: `days + 1` points
    /// ending with today in `zone`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn daily_totals(
        &self,
        name: &str,
        days: u32,
        now: DateTime<Utc>,
        zone: BucketZone,
    ) -> Result<Vec<PivotPoint>, StorageError> {
        let name = normalize_substance_name(name);
        let (start, end) = zone.daily_window(days, now);
        let events = self.dose_events(&name, start, end)?;
        tracing::debug!(%name, days, %zone, events = events.len(), "Daily pivot");
        Ok(zone.daily_totals(&events, days, now))
    }

    /// Dose counts per clock hour for one substance: `hours + 1` points
    /// ending with the current hour in `zone`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn hourly_histogram(
        &self,
        name: &str,
        hours: u32,
        now: DateTime<Utc>,
        zone: BucketZone,
    ) -> Result<Vec<PivotPoint>, StorageError> {
        let name = normalize_substance_name(name);
        let (start, end) = zone.hourly_window(hours, now);
        let times: Vec<DateTime<Utc>> =
            self.dose_events(&name, start, end)?.into_iter().map(|e| e.at).collect();
        tracing::debug!(%name, hours, %zone, events = times.len(), "Hourly histogram");
        Ok(zone.hourly_histogram(&times, hours, now))
    }
}
