//! Migration v6: rewrite stored substance names into canonical form

use habitlog_core::normalize_substance_name;
use rusqlite::{params, Connection};

/// Returns the number of distinct names that changed.
pub(super) fn normalize_names(conn: &Connection) -> Result<usize, rusqlite::Error> {
    let names: Vec<String> = {
        let mut stmt = conn.prepare("SELECT DISTINCT name FROM medicine")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<_, _>>()?
    };

    let mut changed = 0;
    for name in names {
        let normalized = normalize_substance_name(&name);
        if normalized != name {
            conn.execute(
                "UPDATE medicine SET name = ?1 WHERE name = ?2",
                params![normalized, name],
            )?;
            changed += 1;
        }
    }
    Ok(changed)
}
