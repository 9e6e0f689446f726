//! Opening the store applies every pending migration; this command just
//! does that and reports where the file ended up.

use std::path::Path;

use anyhow::Result;
use habitlog_storage::{SCHEMA_VERSION, Storage};

pub(crate) fn run(db_path: &Path) -> Result<()> {
    let storage = Storage::new(db_path)?;
    let version = storage.schema_version()?;
    println!("{}: schema version {version} (latest {SCHEMA_VERSION})", db_path.display());
    Ok(())
}
