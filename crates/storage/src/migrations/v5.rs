//! Migration v5: created_at indexes for date-scoped listings and pivots

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS entries_created_at_idx ON entries(created_at);
CREATE INDEX IF NOT EXISTS medicine_created_at_idx ON medicine(created_at);
CREATE INDEX IF NOT EXISTS medicine_name_created_at_idx ON medicine(name, created_at);
";
