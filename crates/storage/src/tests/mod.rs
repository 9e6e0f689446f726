//! Test utilities and module declarations for storage tests.

use crate::Storage;
use chrono::{DateTime, TimeZone as _, Utc};
use habitlog_core::{NewEntry, NewMedicine};
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn dose(storage: &Storage, name: &str, amount: f64, when: DateTime<Utc>) -> i64 {
    storage.insert_medicine(&NewMedicine::parse(name, amount, when).unwrap()).unwrap()
}

/// Bypasses validation so a row can carry a timestamp the parser rejects.
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn raw_dose(storage: &Storage, name: &str, amount: f64, created_at: &str) -> i64 {
    let conn = storage.pool.get().unwrap();
    conn.execute(
        "INSERT INTO medicine (name, dose, created_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, amount, created_at],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn entry(storage: &Storage, text: &str, completed: bool, when: DateTime<Utc>) -> i64 {
    storage.insert_entry(&NewEntry::parse(text, completed, when).unwrap()).unwrap()
}
