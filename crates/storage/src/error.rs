//! Typed error enum for the storage layer.
//!
//! Lets callers match on specific failure modes (not found, busy database,
//! corrupt row) instead of downcasting opaque boxes.

use thiserror::Error;

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Row not found for expected-present entity.
    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// SQL failure reported by SQLite.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Could not check out a pooled connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Row data could not be converted into a domain type.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Migration failure.
    #[error("migration error: {0}")]
    Migration(String),

    /// The blocking task running the query panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id: id.to_string() }
    }
}

/// Custom `From<rusqlite::Error>`, not a blanket `#[from]`.
///
/// - `QueryReturnedNoRows` → `NotFound` (generic; callers remap with entity context)
/// - `FromSqlConversionFailure` → `DataCorruption`
/// - Everything else → `Database`
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => {
                Self::NotFound { entity: "row", id: "unknown".into() }
            },
            rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
                Self::DataCorruption { context: format!("column {column}"), source }
            },
            other => Self::Database(other),
        }
    }
}

/// Stored timestamp text that no longer parses.
#[derive(Debug, Error)]
#[error("invalid stored timestamp '{0}'")]
pub(crate) struct BadTimestamp(pub String);
