//! Command handlers.

pub mod ask;
pub mod auth;
pub mod completions;
pub mod dashboard;
pub mod dataset;
pub mod import;
pub mod incident;
pub mod init;
pub mod ticket;
pub mod version;

use crate::config;
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use std::path::PathBuf;

/// Resolve the database path and open the store.
///
/// Fails with `NotInitialized` when the database file does not exist,
/// so every command except `init` points the user at `opsdesk init`
/// instead of silently creating an empty database somewhere.
pub(crate) fn open_storage(db: Option<&PathBuf>) -> Result<SqliteStorage> {
    let path = config::resolve_db_path(db)?;
    if !path.exists() {
        return Err(Error::NotInitialized);
    }
    SqliteStorage::open(&path)
}

/// Print a serializable value as pretty JSON.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
