//! `opsdesk register|login|logout|whoami` - account and session management.

use super::{open_storage, print_json};
use crate::auth;
use crate::error::Result;
use crate::is_silent;
use colored::Colorize;
use std::path::PathBuf;

/// Handle `register`.
///
/// # Errors
///
/// Returns `DuplicateUser` for a taken username, or a validation error
/// for blank credentials.
pub fn register(db: Option<&PathBuf>, json: bool, username: &str, password: &str) -> Result<()> {
    let storage = open_storage(db)?;
    let id = auth::register(&storage, username, password)?;

    if is_silent() {
        println!("{id}");
    } else if json {
        print_json(&serde_json::json!({ "registered": username.trim(), "id": id }))?;
    } else {
        println!("{} user '{}'", "Registered".green(), username.trim());
        println!("Log in with: opsdesk login {} --password <password>", username.trim());
    }
    Ok(())
}

/// Handle `login`.
///
/// # Errors
///
/// Returns `InvalidCredentials` for a bad username or password.
pub fn login(db: Option<&PathBuf>, json: bool, username: &str, password: &str) -> Result<()> {
    let storage = open_storage(db)?;
    let session = auth::login(&storage, username, password)?;

    if json {
        print_json(&serde_json::json!({ "logged_in": session.username }))?;
    } else {
        println!("{} as '{}'", "Logged in".green(), session.username);
    }
    Ok(())
}

/// Handle `logout`. Idempotent.
///
/// # Errors
///
/// Returns an error only if an existing session file cannot be removed.
pub fn logout(json: bool) -> Result<()> {
    let was_logged_in = auth::current_session().map(|s| s.username);
    auth::logout()?;

    if json {
        print_json(&serde_json::json!({ "logged_out": was_logged_in }))?;
    } else {
        match was_logged_in {
            Some(username) => println!("{} '{}'", "Logged out".green(), username),
            None => println!("No active session."),
        }
    }
    Ok(())
}

/// Handle `whoami`.
///
/// # Errors
///
/// Returns `AuthRequired` when no session exists, so scripts can gate
/// on the exit code.
pub fn whoami(json: bool) -> Result<()> {
    let session = auth::require_auth()?;

    if json {
        print_json(&serde_json::json!({ "username": session.username }))?;
    } else {
        println!("{}", session.username);
    }
    Ok(())
}
