#![allow(
    clippy::redundant_pub_crate,
    reason = "migrations module is private, pub(crate) is intentional"
)]

mod column_helpers;
mod v1;
mod v2;
mod v3;
mod v4;
mod v5;
mod v6;

use column_helpers::add_column_if_not_exists;
use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 6;

/// Bring the schema up to [`SCHEMA_VERSION`], tracked in `PRAGMA user_version`.
///
/// Every step is idempotent, so a database created by an older deployment
/// that never recorded a version is upgraded in place.
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: days table");
        conn.execute_batch(v1::SQL)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: habit_entries table");
        conn.execute_batch(v2::SQL)?;
    }

    if current_version < 3i32 {
        tracing::info!("Running migration v3: medicine table with habit_entries backfill");
        add_column_if_not_exists(conn, "habit_entries", "dose", "REAL NOT NULL DEFAULT 0")?;
        conn.execute_batch(v3::SQL)?;
        let copied = conn.execute(v3::BACKFILL_SQL, [])?;
        if copied > 0 {
            tracing::info!(copied, "Backfilled legacy habit entries into medicine");
        }
    }

    if current_version < 4i32 {
        tracing::info!("Running migration v4: entries table");
        conn.execute_batch(v4::SQL)?;
    }

    if current_version < 5i32 {
        tracing::info!("Running migration v5: created_at indexes");
        conn.execute_batch(v5::SQL)?;
    }

    if current_version < 6i32 {
        tracing::info!("Running migration v6: normalize substance names");
        let renamed = v6::normalize_names(conn)?;
        if renamed > 0 {
            tracing::info!(renamed, "Normalized stored substance names");
        }
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);

    Ok(())
}
