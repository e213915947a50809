//! `opsdesk incident` - security incident CRUD.

use super::{open_storage, print_json};
use crate::error::Result;
use crate::model::Incident;
use crate::storage::NewIncident;
use crate::{auth, csv_escape, is_csv, is_silent, validate};
use colored::Colorize;
use std::path::PathBuf;

/// Handle `incident create`.
///
/// # Errors
///
/// Returns an error if not logged in, the fields are invalid, or the
/// insert fails.
pub fn create(
    db: Option<&PathBuf>,
    json: bool,
    incident_type: &str,
    severity: &str,
    status: &str,
    response_time: Option<f64>,
) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;

    let new = NewIncident {
        incident_type: incident_type.to_string(),
        severity: validate::normalize_severity(severity)?,
        status: validate::normalize_incident_status(status)?,
        response_time_hours: response_time,
    };
    let incident = storage.create_incident(&new)?;

    if is_silent() {
        println!("{}", incident.id);
    } else if json {
        print_json(&incident)?;
    } else {
        println!(
            "{} incident #{}: {} ({})",
            "Recorded".green(),
            incident.id,
            incident.incident_type,
            incident.severity
        );
    }
    Ok(())
}

/// Handle `incident list`.
///
/// # Errors
///
/// Returns an error if not logged in or the query fails.
pub fn list(db: Option<&PathBuf>, json: bool) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let incidents = storage.list_incidents()?;

    if json {
        return print_json(&incidents);
    }

    if is_csv() {
        println!("id,incident_type,severity,status,detected_date,response_time_hours");
        for i in &incidents {
            println!(
                "{},{},{},{},{},{}",
                i.id,
                csv_escape(&i.incident_type),
                i.severity,
                i.status,
                i.detected_date,
                i.response_time_hours
                    .map(|h| h.to_string())
                    .unwrap_or_default()
            );
        }
        return Ok(());
    }

    if incidents.is_empty() {
        println!("No incidents.");
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<14} {:<10} {}",
        "ID".bold(),
        "SEVERITY".bold(),
        "STATUS".bold(),
        "RESP(H)".bold(),
        "TYPE".bold()
    );
    for i in &incidents {
        println!(
            "{:<6} {:<10} {:<14} {:<10} {}",
            i.id,
            i.severity.to_string(),
            i.status.to_string(),
            i.response_time_hours
                .map_or_else(|| "-".to_string(), |h| format!("{h:.1}")),
            i.incident_type
        );
    }
    Ok(())
}

/// Handle `incident show`.
///
/// # Errors
///
/// Returns `IncidentNotFound` for a missing id.
pub fn show(db: Option<&PathBuf>, json: bool, id: i64) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let incident = storage.get_incident(id)?;

    if json {
        return print_json(&incident);
    }
    print_incident(&incident);
    Ok(())
}

/// Handle `incident update`.
///
/// Unspecified flags keep the current values; `--response-time` can
/// only set a value, never clear one.
///
/// # Errors
///
/// Returns `IncidentNotFound` for a missing id, or a validation error.
#[allow(clippy::too_many_arguments)]
pub fn update(
    db: Option<&PathBuf>,
    json: bool,
    id: i64,
    incident_type: Option<&str>,
    severity: Option<&str>,
    status: Option<&str>,
    response_time: Option<f64>,
) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let current = storage.get_incident(id)?;

    let fields = NewIncident {
        incident_type: incident_type.map_or(current.incident_type, ToString::to_string),
        severity: match severity {
            Some(s) => validate::normalize_severity(s)?,
            None => current.severity,
        },
        status: match status {
            Some(s) => validate::normalize_incident_status(s)?,
            None => current.status,
        },
        response_time_hours: response_time.or(current.response_time_hours),
    };
    storage.update_incident(id, &fields)?;
    let updated = storage.get_incident(id)?;

    if is_silent() {
        println!("{id}");
    } else if json {
        print_json(&updated)?;
    } else {
        println!("{} incident #{id}", "Updated".green());
        print_incident(&updated);
    }
    Ok(())
}

/// Handle `incident delete`.
///
/// # Errors
///
/// Returns `IncidentNotFound` for a missing id.
pub fn delete(db: Option<&PathBuf>, json: bool, id: i64) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    storage.delete_incident(id)?;

    if is_silent() {
        println!("{id}");
    } else if json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("{} incident #{id}", "Deleted".green());
    }
    Ok(())
}

fn print_incident(i: &Incident) {
    println!("{}       {}", "ID:".bold(), i.id);
    println!("{}     {}", "Type:".bold(), i.incident_type);
    println!("{} {}", "Severity:".bold(), i.severity);
    println!("{}   {}", "Status:".bold(), i.status);
    println!("{} {}", "Detected:".bold(), i.detected_date);
    match i.response_time_hours {
        Some(h) => println!("{} {h:.1}h", "Response:".bold()),
        None => println!("{} -", "Response:".bold()),
    }
}
