//! `opsdesk version` - version information.

use super::print_json;
use crate::error::Result;

/// Handle `version`.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn run(json: bool) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    if json {
        print_json(&serde_json::json!({ "name": name, "version": version }))?;
    } else {
        println!("{name} {version}");
    }
    Ok(())
}
