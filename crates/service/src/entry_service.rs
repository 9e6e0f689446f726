use std::sync::Arc;

use chrono::Utc;
use habitlog_core::{
    BucketZone, DEFAULT_RECENT_LIMIT, Entry, EntryUpdate, MAX_RECENT_LIMIT, NewEntry, Validator,
};
use habitlog_storage::traits::HabitStore;

use crate::{ServiceError, require_date};

pub struct EntryService {
    storage: Arc<dyn HabitStore>,
    zone: BucketZone,
}

impl EntryService {
    #[must_use]
    pub fn new(storage: Arc<dyn HabitStore>, zone: BucketZone) -> Self {
        Self { storage, zone }
    }

    /// Entries created on local calendar `date`, oldest first.
    pub async fn list_for_date(&self, date: &str) -> Result<Vec<Entry>, ServiceError> {
        let day = require_date("date", date)?;
        let (start, end) = self.zone.day_bounds(day);
        Ok(self.storage.entries_between(start, end).await?)
    }

    pub async fn create(&self, text: &str, completed: bool) -> Result<i64, ServiceError> {
        let new = NewEntry::parse(text, completed, Utc::now())?;
        let id = self.storage.insert_entry(&new).await?;
        tracing::info!(id, completed, "Created entry");
        Ok(id)
    }

    pub async fn update(
        &self,
        id: i64,
        text: &str,
        completed: bool,
        completed_at: Option<&str>,
    ) -> Result<(), ServiceError> {
        let update = EntryUpdate::parse(id, text, completed, completed_at)?;
        self.storage.update_entry(&update).await?;
        tracing::info!(id, completed, "Updated entry");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut v = Validator::new();
        v.positive_id("id", id);
        v.finish()?;
        self.storage.delete_entry(id).await?;
        tracing::info!(id, "Deleted entry");
        Ok(())
    }

    /// Entries by completion flag, newest first; `date` narrows to one local day.
    pub async fn by_status(
        &self,
        completed: bool,
        date: Option<&str>,
    ) -> Result<Vec<Entry>, ServiceError> {
        let window = match date.filter(|d| !d.is_empty()) {
            Some(raw) => Some(self.zone.day_bounds(require_date("date", raw)?)),
            None => None,
        };
        Ok(self.storage.entries_by_status(completed, window).await?)
    }

    pub async fn recent(&self, limit: Option<usize>) -> Result<Vec<Entry>, ServiceError> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        if !(1..=MAX_RECENT_LIMIT).contains(&limit) {
            let mut v = Validator::new();
            v.fail("limit", format!("must be between 1 and {MAX_RECENT_LIMIT}"));
            v.finish()?;
        }
        Ok(self.storage.recent_entries(limit).await?)
    }
}
