//! Configuration management.
//!
//! Resolution order for every setting: explicit CLI flag, environment
//! variable, then the built-in default. Nothing is persisted to a
//! config file; the database path and session file location are the
//! only stateful pieces.

pub mod session;

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Environment variable overriding the database path.
pub const ENV_DB: &str = "OPSDESK_DB";

/// Environment variable holding the chat-completion API key.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable overriding the chat-completion endpoint base URL.
pub const ENV_AI_ENDPOINT: &str = "OPSDESK_AI_ENDPOINT";

/// Environment variable overriding the chat-completion model name.
pub const ENV_AI_MODEL: &str = "OPSDESK_AI_MODEL";

/// Default chat-completion endpoint base URL.
pub const DEFAULT_AI_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat-completion model.
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// Resolve the database path.
///
/// Order: `--db` flag, `OPSDESK_DB` env var, then
/// `~/.opsdesk/data/opsdesk.db` (directories created on demand).
///
/// # Errors
///
/// Returns `ConfigError` if no home directory can be determined, or an
/// I/O error if the data directory cannot be created.
pub fn resolve_db_path(flag: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.clone());
    }

    if let Ok(env_path) = std::env::var(ENV_DB) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }

    let base = directories::BaseDirs::new()
        .ok_or_else(|| Error::Config("could not determine home directory".to_string()))?;
    let data_dir = base.home_dir().join(".opsdesk").join("data");
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir.join("opsdesk.db"))
}

/// Resolve the assistant API key from the environment.
///
/// Returns `None` when unset or blank; callers decide whether that is
/// an error (the assistant does, before any network activity).
#[must_use]
pub fn resolve_api_key() -> Option<String> {
    std::env::var(ENV_API_KEY)
        .ok()
        .filter(|k| !k.trim().is_empty())
}

/// Resolve the chat-completion endpoint base URL.
#[must_use]
pub fn resolve_ai_endpoint() -> String {
    std::env::var(ENV_AI_ENDPOINT)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AI_ENDPOINT.to_string())
}

/// Resolve the chat-completion model name.
#[must_use]
pub fn resolve_ai_model() -> String {
    std::env::var(ENV_AI_MODEL)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())
}
