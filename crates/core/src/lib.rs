//! Core types and helpers for habitlog
//!
//! Domain records, input validation, the rolling-window pivot math and the
//! runtime configuration shared by every other crate.

pub mod config;
mod constants;
mod entry;
mod env_config;
mod error;
mod medicine;
pub mod pivot;
pub mod time;
mod zone;

pub use config::{AppConfig, ConfigError};
pub use constants::*;
pub use entry::{Entry, EntryUpdate, NewEntry};
pub use env_config::{env_flag, env_parse_with_default};
pub use error::{FieldIssue, ValidationError, Validator};
pub use medicine::{MedicineEntry, MedicineUpdate, NewMedicine, normalize_substance_name};
pub use pivot::{DoseEvent, PivotPoint};
pub use zone::BucketZone;
