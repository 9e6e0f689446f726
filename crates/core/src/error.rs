use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use thiserror::Error;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl Display for FieldIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input rejected before touching storage. Carries every failing field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl ValidationError {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self { issues: vec![FieldIssue { field: field.to_owned(), message: message.into() }] }
    }
}

/// Accumulates field issues so a request reports all problems at once.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<FieldIssue>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(FieldIssue { field: field.to_owned(), message: message.into() });
    }

    /// Non-empty (after trimming) and at most `max` characters.
    pub fn text(&mut self, field: &str, value: &str, max: usize, label: &str) {
        if value.trim().is_empty() {
            self.fail(field, format!("{label} is required"));
        } else if value.chars().count() > max {
            self.fail(field, format!("{label} too long"));
        }
    }

    pub fn positive_id(&mut self, field: &str, id: i64) {
        if id < 1 {
            self.fail(field, "ID must be a positive integer");
        }
    }

    pub fn dose(&mut self, field: &str, dose: f64, max: f64) {
        if !dose.is_finite() || dose <= 0.0 {
            self.fail(field, "Dose must be positive");
        } else if dose > max {
            self.fail(field, "Dose too high");
        }
    }

    pub fn range(&mut self, field: &str, value: u32, min: u32, max: u32) {
        if value < min || value > max {
            self.fail(field, format!("must be between {min} and {max}"));
        }
    }

    /// Returns `Err` if any check failed.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() { Ok(()) } else { Err(ValidationError { issues: self.issues }) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_issue() {
        let mut v = Validator::new();
        v.text("name", "   ", 10, "Name");
        v.positive_id("id", 0);
        v.dose("dose", -1.0, 100.0);
        let err = v.finish().unwrap_err();
        let fields: Vec<&str> = err.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "id", "dose"]);
        assert!(err.to_string().contains("name: Name is required"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut v = Validator::new();
        v.text("name", "ééééé", 5, "Name");
        assert!(v.finish().is_ok());
    }

    #[test]
    fn rejects_non_finite_dose() {
        let mut v = Validator::new();
        v.dose("dose", f64::NAN, 100.0);
        assert!(v.finish().is_err());
    }
}
