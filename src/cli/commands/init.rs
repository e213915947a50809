//! `opsdesk init` - create the database.

use super::print_json;
use crate::config;
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Handle `init`.
///
/// Creates the database file and schema. With `--force`, an existing
/// database is deleted first (its WAL sidecar files too).
///
/// # Errors
///
/// Returns `AlreadyInitialized` if the database exists and `--force`
/// was not given.
pub fn run(db: Option<&PathBuf>, json: bool, force: bool) -> Result<()> {
    let path = config::resolve_db_path(db)?;

    if path.exists() {
        if !force {
            return Err(Error::AlreadyInitialized { path });
        }
        std::fs::remove_file(&path)?;
        for ext in ["db-wal", "db-shm"] {
            let sidecar = path.with_extension(ext);
            if sidecar.exists() {
                std::fs::remove_file(&sidecar)?;
            }
        }
        info!(path = %path.display(), "removed existing database");
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    SqliteStorage::open(&path)?;

    if json {
        print_json(&serde_json::json!({
            "initialized": path.display().to_string(),
            "forced": force,
        }))?;
    } else {
        println!("{} database at {}", "Initialized".green(), path.display());
        println!("Next: opsdesk register <username> --password <password>");
    }
    Ok(())
}
