//! `opsdesk import` - CSV fixture import.

use super::{open_storage, print_json};
use crate::cli::ImportTarget;
use crate::error::Result;
use crate::{auth, fixtures, is_silent};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Handle `import`.
///
/// # Errors
///
/// Returns an error if not logged in, the file is unreadable, or any
/// row fails validation.
pub fn run(db: Option<&PathBuf>, json: bool, target: ImportTarget, file: &Path) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;

    let (label, count) = match target {
        ImportTarget::Incidents => ("incidents", fixtures::import_incidents(&storage, file)?),
        ImportTarget::Datasets => ("datasets", fixtures::import_datasets(&storage, file)?),
    };

    if is_silent() {
        println!("{count}");
    } else if json {
        print_json(&serde_json::json!({
            "imported": count,
            "target": label,
            "file": file.display().to_string(),
        }))?;
    } else {
        println!(
            "{} {count} {label} from {}",
            "Imported".green(),
            file.display()
        );
    }
    Ok(())
}
