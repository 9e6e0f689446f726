use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn habitlog(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("habitlog").unwrap();
    cmd.env("HABITLOG_DB_PATH", db)
        .env("HABITLOG_UTC_OFFSET", "utc")
        .env_remove("JWT_SECRET")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("habitlog").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal habit and medicine tracker"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("habitlog").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_migrate_reports_schema_version() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("nested").join("habits.db");
    habitlog(&db)
        .arg("migrate")
        .assert()
        .success()
        .stdout(predicate::str::contains("schema version 6"));
    assert!(db.exists());
}

#[test]
fn test_db_flag_overrides_env() {
    let dir = tempfile::tempdir().unwrap();
    let env_db = dir.path().join("env.db");
    let flag_db = dir.path().join("flag.db");
    habitlog(&env_db).arg("migrate").arg("--db").arg(&flag_db).assert().success();
    assert!(flag_db.exists());
    assert!(!env_db.exists());
}

#[test]
fn test_substances_on_empty_db() {
    let dir = tempfile::tempdir().unwrap();
    let value = stdout_json(habitlog(&dir.path().join("h.db")).arg("substances"));
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn test_pivot_is_zero_filled() {
    let dir = tempfile::tempdir().unwrap();
    let value =
        stdout_json(habitlog(&dir.path().join("h.db")).args(["pivot", "caffeine", "--days", "3"]));
    let points = value.as_array().unwrap();
    assert_eq!(points.len(), 4);
    assert!(points.iter().all(|p| p["total"] == 0.0));
}

#[test]
fn test_histogram_default_window() {
    let dir = tempfile::tempdir().unwrap();
    let value = stdout_json(habitlog(&dir.path().join("h.db")).args(["histogram", "caffeine"]));
    assert_eq!(value.as_array().unwrap().len(), 24);
}

#[test]
fn test_pivot_rejects_out_of_range_days() {
    let dir = tempfile::tempdir().unwrap();
    habitlog(&dir.path().join("h.db"))
        .args(["pivot", "caffeine", "--days", "400"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation failed"));
}

#[test]
fn test_stats_on_empty_db() {
    let dir = tempfile::tempdir().unwrap();
    let value = stdout_json(habitlog(&dir.path().join("h.db")).arg("stats"));
    assert_eq!(value["medicine_count"], 0);
    assert_eq!(value["entry_count"], 0);
}

#[test]
fn test_tokens_require_secret() {
    let dir = tempfile::tempdir().unwrap();
    habitlog(&dir.path().join("h.db"))
        .arg("tokens")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JWT_SECRET"));
}

#[test]
fn test_tokens_print_pair() {
    let dir = tempfile::tempdir().unwrap();
    habitlog(&dir.path().join("h.db"))
        .env("JWT_SECRET", "a-test-secret-that-is-long-enough-to-pass")
        .arg("tokens")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ACCESS_TOKEN=")
                .and(predicate::str::contains("REFRESH_TOKEN=")),
        );
}
