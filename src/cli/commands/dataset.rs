//! `opsdesk dataset` - dataset metadata CRUD.

use super::{open_storage, print_json};
use crate::error::Result;
use crate::model::Dataset;
use crate::storage::NewDataset;
use crate::{auth, csv_escape, is_csv, is_silent, validate};
use colored::Colorize;
use std::path::PathBuf;

/// Handle `dataset create`.
///
/// # Errors
///
/// Returns an error if not logged in, the fields are invalid, or the
/// insert fails.
pub fn create(
    db: Option<&PathBuf>,
    json: bool,
    name: &str,
    department: &str,
    size_mb: f64,
    rows: i64,
    sensitivity: &str,
) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;

    let new = NewDataset {
        name: name.to_string(),
        department: department.to_string(),
        size_mb,
        row_count: rows,
        sensitivity: validate::normalize_sensitivity(sensitivity)?,
        active: true,
    };
    let dataset = storage.create_dataset(&new)?;

    if is_silent() {
        println!("{}", dataset.id);
    } else if json {
        print_json(&dataset)?;
    } else {
        println!(
            "{} dataset #{}: {} ({})",
            "Registered".green(),
            dataset.id,
            dataset.name,
            dataset.sensitivity
        );
    }
    Ok(())
}

/// Handle `dataset list`.
///
/// # Errors
///
/// Returns an error if not logged in or the query fails.
pub fn list(db: Option<&PathBuf>, json: bool) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let datasets = storage.list_datasets()?;

    if json {
        return print_json(&datasets);
    }

    if is_csv() {
        println!("id,name,department,size_mb,row_count,sensitivity,active");
        for d in &datasets {
            println!(
                "{},{},{},{},{},{},{}",
                d.id,
                csv_escape(&d.name),
                csv_escape(&d.department),
                d.size_mb,
                d.row_count,
                d.sensitivity,
                i64::from(d.active)
            );
        }
        return Ok(());
    }

    if datasets.is_empty() {
        println!("No datasets.");
        return Ok(());
    }

    println!(
        "{:<6} {:<14} {:<10} {:<10} {:<8} {}",
        "ID".bold(),
        "SENSITIVITY".bold(),
        "SIZE(MB)".bold(),
        "ROWS".bold(),
        "ACTIVE".bold(),
        "NAME".bold()
    );
    for d in &datasets {
        println!(
            "{:<6} {:<14} {:<10.1} {:<10} {:<8} {}",
            d.id,
            d.sensitivity.to_string(),
            d.size_mb,
            d.row_count,
            if d.active { "yes" } else { "no" },
            d.name
        );
    }
    Ok(())
}

/// Handle `dataset show`.
///
/// # Errors
///
/// Returns `DatasetNotFound` for a missing id.
pub fn show(db: Option<&PathBuf>, json: bool, id: i64) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let dataset = storage.get_dataset(id)?;

    if json {
        return print_json(&dataset);
    }
    print_dataset(&dataset);
    Ok(())
}

/// Handle `dataset update`.
///
/// Unspecified flags keep the current values.
///
/// # Errors
///
/// Returns `DatasetNotFound` for a missing id, or a validation error.
#[allow(clippy::too_many_arguments)]
pub fn update(
    db: Option<&PathBuf>,
    json: bool,
    id: i64,
    name: Option<&str>,
    department: Option<&str>,
    size_mb: Option<f64>,
    rows: Option<i64>,
    sensitivity: Option<&str>,
    active: Option<bool>,
) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let current = storage.get_dataset(id)?;

    let fields = NewDataset {
        name: name.map_or(current.name, ToString::to_string),
        department: department.map_or(current.department, ToString::to_string),
        size_mb: size_mb.unwrap_or(current.size_mb),
        row_count: rows.unwrap_or(current.row_count),
        sensitivity: match sensitivity {
            Some(s) => validate::normalize_sensitivity(s)?,
            None => current.sensitivity,
        },
        active: active.unwrap_or(current.active),
    };
    storage.update_dataset(id, &fields)?;
    let updated = storage.get_dataset(id)?;

    if is_silent() {
        println!("{id}");
    } else if json {
        print_json(&updated)?;
    } else {
        println!("{} dataset #{id}", "Updated".green());
        print_dataset(&updated);
    }
    Ok(())
}

/// Handle `dataset delete`.
///
/// # Errors
///
/// Returns `DatasetNotFound` for a missing id.
pub fn delete(db: Option<&PathBuf>, json: bool, id: i64) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    storage.delete_dataset(id)?;

    if is_silent() {
        println!("{id}");
    } else if json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("{} dataset #{id}", "Deleted".green());
    }
    Ok(())
}

fn print_dataset(d: &Dataset) {
    println!("{}          {}", "ID:".bold(), d.id);
    println!("{}        {}", "Name:".bold(), d.name);
    println!("{}  {}", "Department:".bold(), d.department);
    println!("{}        {:.1} MB", "Size:".bold(), d.size_mb);
    println!("{}        {}", "Rows:".bold(), d.row_count);
    println!("{} {}", "Sensitivity:".bold(), d.sensitivity);
    println!("{}      {}", "Active:".bold(), if d.active { "yes" } else { "no" });
    println!("{}     {}", "Created:".bold(), d.created_date);
}
