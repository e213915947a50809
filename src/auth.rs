//! Registration, login, and the authentication gate.
//!
//! Passwords are hashed with argon2id (PHC string format, random salt
//! per user). Login verifies the stored hash and records a session
//! entry on disk; mutating commands call [`require_auth`] before
//! touching the store.
//!
//! Registration and login are deliberately asymmetric in their error
//! detail: registration names the duplicate username, but login
//! returns the same `InvalidCredentials` for an unknown user and a
//! wrong password so the CLI never confirms which usernames exist.

use crate::config::session::{self, SessionEntry};
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use tracing::{debug, info};

/// Hash a password into a PHC-format argon2id string.
///
/// # Errors
///
/// Returns an error if hashing fails (effectively never for valid input).
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Other(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
///
/// A malformed stored hash counts as a failed verification.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Register a new user.
///
/// # Errors
///
/// Returns `RequiredField` for a blank username or password, and
/// `DuplicateUser` if the username is taken.
pub fn register(storage: &SqliteStorage, username: &str, password: &str) -> Result<i64> {
    validate_credentials_shape(username, password)?;

    let hash = hash_password(password)?;
    let id = storage.create_user(username.trim(), &hash)?;
    info!(username = username.trim(), "registered user");
    Ok(id)
}

/// Log a user in and record the session.
///
/// # Errors
///
/// Returns `InvalidCredentials` for an unknown username or a wrong
/// password (never distinguishing the two).
pub fn login(storage: &SqliteStorage, username: &str, password: &str) -> Result<SessionEntry> {
    validate_credentials_shape(username, password)?;
    let username = username.trim();

    let user = match storage.get_user(username) {
        Ok(user) => user,
        Err(Error::UserNotFound { .. }) => {
            debug!(username, "login attempt for unknown user");
            return Err(Error::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if !verify_password(password, &user.password_hash) {
        debug!(username, "login attempt with wrong password");
        return Err(Error::InvalidCredentials);
    }

    let entry = SessionEntry::new(username);
    session::write_session(&entry)?;
    info!(username, "logged in");
    Ok(entry)
}

/// End the current session. Idempotent.
///
/// # Errors
///
/// Returns an error only if an existing session file cannot be removed.
pub fn logout() -> Result<()> {
    session::clear_session()
}

/// The currently logged-in session, if any.
#[must_use]
pub fn current_session() -> Option<SessionEntry> {
    session::read_session()
}

/// Authentication gate for protected commands.
///
/// # Errors
///
/// Returns `AuthRequired` when no valid session exists.
pub fn require_auth() -> Result<SessionEntry> {
    current_session().ok_or(Error::AuthRequired)
}

fn validate_credentials_shape(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::RequiredField {
            field: "username".to_string(),
        });
    }
    if password.is_empty() {
        return Err(Error::RequiredField {
            field: "password".to_string(),
        });
    }
    Ok(())
}
