use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_TEXT_LEN;
use crate::error::{ValidationError, Validator};
use crate::time::parse_timestamp;

/// A free-text habit entry with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewEntry {
    /// An entry created as already completed is stamped as completed `now`.
    pub fn parse(text: &str, completed: bool, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.text("text", text, MAX_TEXT_LEN, "Entry text");
        v.finish()?;
        Ok(Self {
            text: text.to_owned(),
            completed,
            completed_at: completed.then_some(now),
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryUpdate {
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl EntryUpdate {
    /// Empty or absent `completed_at` clears the completion time.
    pub fn parse(
        id: i64,
        text: &str,
        completed: bool,
        completed_at: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.positive_id("id", id);
        v.text("text", text, MAX_TEXT_LEN, "Entry text");
        let completed_at = match completed_at.filter(|s| !s.is_empty()) {
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    v.fail("completed_at", "Invalid date format");
                }
                parsed
            },
            None => None,
        };
        v.finish()?;
        Ok(Self { id, text: text.to_owned(), completed, completed_at })
    }
}
