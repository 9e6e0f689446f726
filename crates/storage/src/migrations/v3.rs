//! Migration v3: medicine table, backfilled from habit_entries

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS medicine (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    dose REAL NOT NULL CHECK (dose > 0),
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
";

/// Copies legacy rows that are not already present. Zero doses were never
/// valid medicine rows and are left behind.
pub(super) const BACKFILL_SQL: &str = "
INSERT INTO medicine (name, dose, created_at)
SELECT he.habit_name, he.dose, he.created_at
FROM habit_entries he
WHERE he.dose > 0
  AND NOT EXISTS (
    SELECT 1 FROM medicine m
    WHERE m.name = he.habit_name
      AND m.dose = he.dose
      AND m.created_at = he.created_at
  );
";
