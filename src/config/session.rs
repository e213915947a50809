//! Login session file.
//!
//! A successful login writes a small JSON file recording who is logged
//! in; authenticated commands read it back. The file is written
//! atomically (temp file + rename) with owner-only permissions, and
//! entries expire after a fixed TTL so a stale session never outlives
//! the working day by much.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the session file location.
pub const ENV_SESSION_FILE: &str = "OPSDESK_SESSION_FILE";

/// Session lifetime in seconds (12 hours).
const SESSION_TTL_SECS: i64 = 12 * 60 * 60;

/// A recorded login session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    pub username: String,
    pub token: String,
    /// Unix timestamp of login.
    pub timestamp: i64,
}

impl SessionEntry {
    /// Create a fresh entry for a user, stamped now.
    #[must_use]
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            token: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Whether the entry is past its TTL.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() - self.timestamp > SESSION_TTL_SECS
    }
}

/// Resolve the session file path.
///
/// `OPSDESK_SESSION_FILE` overrides; otherwise `~/.opsdesk/session.json`.
///
/// # Errors
///
/// Returns `ConfigError` if no home directory can be determined.
pub fn session_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(ENV_SESSION_FILE) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let base = directories::BaseDirs::new().ok_or_else(|| {
        crate::error::Error::Config("could not determine home directory".to_string())
    })?;
    Ok(base.home_dir().join(".opsdesk").join("session.json"))
}

/// Read the current session, if one exists and has not expired.
///
/// An unreadable or expired file is removed and treated as no session;
/// a corrupt session must never block the CLI.
#[must_use]
pub fn read_session() -> Option<SessionEntry> {
    let path = session_path().ok()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    let entry: SessionEntry = serde_json::from_str(&contents).ok()?;

    if entry.is_expired() {
        let _ = std::fs::remove_file(&path);
        return None;
    }

    Some(entry)
}

/// Persist a session entry atomically.
///
/// Writes to a sibling temp file then renames into place, so a crash
/// mid-write never leaves a truncated session. On Unix the file is
/// owner-readable only.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_session(entry: &SessionEntry) -> Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(entry)?;
    std::fs::write(&tmp, json)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp, &path)?;
    Ok(())
}

/// Remove the session file (logout). Missing file is fine.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn clear_session() -> Result<()> {
    let path = session_path()?;
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_round_trip() {
        let entry = SessionEntry::new("alice");
        let json = serde_json::to_string(&entry).unwrap();
        let back: SessionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.username, "alice");
        assert_eq!(back.token, entry.token);
        assert!(!back.is_expired());
    }

    #[test]
    fn test_expiry() {
        let mut entry = SessionEntry::new("alice");
        entry.timestamp -= SESSION_TTL_SECS + 1;
        assert!(entry.is_expired());
    }
}
