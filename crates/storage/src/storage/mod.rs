//! `SQLite` storage implementation
//!
//! All methods are synchronous and check a connection out of the pool per
//! call. Async callers go through the traits in [`crate::traits`].

// SQLite uses i64 for counts/limits, Rust uses usize - safe conversions within DB context
#![allow(
    clippy::as_conversions,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "SQLite i64 <-> Rust usize conversions are safe within DB row counts"
)]
#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod entries;
mod medicine;
mod pivot;
mod stats;

pub use stats::StorageStats;

use std::path::Path;

use chrono::{DateTime, Utc};
use habitlog_core::DEFAULT_DB_POOL_SIZE;
use habitlog_core::time::parse_timestamp;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::types::Type;

use crate::error::{BadTimestamp, StorageError};
use crate::migrations;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StorageError> {
    Ok(pool.get()?)
}

/// Read a stored timestamp column, surfacing unparseable text as a
/// conversion failure on that column.
pub(crate) fn parse_stored_ts(column: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(BadTimestamp(raw)))
    })
}

/// Nullable variant of [`parse_stored_ts`].
pub(crate) fn parse_stored_opt_ts(
    column: usize,
    raw: Option<String>,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    raw.map(|raw| parse_stored_ts(column, raw)).transpose()
}

/// Per-connection pragmas for concurrency and referential integrity
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;",
    )?;
    Ok(())
}

impl Storage {
    /// Open (or create) the database with the default pool size.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or migrations fail.
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        Self::with_pool_size(db_path, DEFAULT_DB_POOL_SIZE)
    }

    /// Open (or create) the database with an explicit pool size.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or migrations fail.
    pub fn with_pool_size(db_path: &Path, pool_size: u32) -> Result<Self, StorageError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Migration(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool_size = pool_size.max(1);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = get_conn(&pool)?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(
            pool_size = pool_size,
            path = %db_path.display(),
            "Storage initialized with connection pool"
        );

        Ok(Self { pool })
    }

    /// Schema version recorded in the database file.
    ///
    /// # Errors
    /// Returns error if the pragma cannot be read.
    pub fn schema_version(&self) -> Result<i32, StorageError> {
        let conn = get_conn(&self.pool)?;
        Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
    }
}
