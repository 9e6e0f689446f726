use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DOSE, MAX_NAME_LEN};
use crate::error::{ValidationError, Validator};
use crate::time::parse_timestamp;

/// A recorded dose of a substance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineEntry {
    pub id: i64,
    /// Normalized substance name, see [`normalize_substance_name`].
    pub name: String,
    pub dose: f64,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new dose.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub dose: f64,
    pub created_at: DateTime<Utc>,
}

impl NewMedicine {
    /// Validate raw input and normalize the substance name.
    pub fn parse(
        raw_name: &str,
        dose: f64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.text("habit_name", raw_name, MAX_NAME_LEN, "Medicine name");
        v.dose("dose", dose, MAX_DOSE);
        v.finish()?;
        Ok(Self { name: normalize_substance_name(raw_name), dose, created_at })
    }
}

/// Validated full replacement of an existing dose row.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicineUpdate {
    pub id: i64,
    pub name: String,
    pub dose: f64,
    pub created_at: DateTime<Utc>,
}

impl MedicineUpdate {
    pub fn parse(
        id: i64,
        raw_name: &str,
        dose: f64,
        created_at: &str,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new();
        v.positive_id("id", id);
        v.text("name", raw_name, MAX_NAME_LEN, "Medicine name");
        v.dose("dose", dose, MAX_DOSE);
        let parsed = parse_timestamp(created_at);
        if parsed.is_none() {
            v.fail("created_at", "Invalid date format");
        }
        v.finish()?;
        let Some(created_at) = parsed else {
            return Err(ValidationError::single("created_at", "Invalid date format"));
        };
        Ok(Self { id, name: normalize_substance_name(raw_name), dose, created_at })
    }
}

/// Canonical form of a substance name: lower-case, every space-separated
/// word capitalized, surrounding whitespace removed.
///
/// `"caffeine"`, `"CAFFEINE"` and `" Caffeine"` all become `"Caffeine"`.
#[must_use]
pub fn normalize_substance_name(name: &str) -> String {
    name.to_lowercase()
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
