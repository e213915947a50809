//! `opsdesk ticket` - IT ticket CRUD.

use super::{open_storage, print_json};
use crate::error::Result;
use crate::model::Ticket;
use crate::storage::NewTicket;
use crate::{auth, csv_escape, is_csv, is_silent, validate};
use colored::Colorize;
use std::path::PathBuf;

/// Handle `ticket create`.
///
/// # Errors
///
/// Returns an error if not logged in, the fields are invalid, or the
/// insert fails.
pub fn create(
    db: Option<&PathBuf>,
    json: bool,
    title: &str,
    priority: &str,
    status: &str,
) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;

    let new = NewTicket {
        title: title.to_string(),
        priority: validate::normalize_priority(priority)?,
        status: validate::normalize_ticket_status(status)?,
    };
    let ticket = storage.create_ticket(&new)?;

    if is_silent() {
        println!("{}", ticket.id);
    } else if json {
        print_json(&ticket)?;
    } else {
        println!("{} ticket #{}: {}", "Created".green(), ticket.id, ticket.title);
    }
    Ok(())
}

/// Handle `ticket list`.
///
/// # Errors
///
/// Returns an error if not logged in or the query fails.
pub fn list(db: Option<&PathBuf>, json: bool) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let tickets = storage.list_tickets()?;

    if json {
        return print_json(&tickets);
    }

    if is_csv() {
        println!("id,title,priority,status,created_date");
        for t in &tickets {
            println!(
                "{},{},{},{},{}",
                t.id,
                csv_escape(&t.title),
                t.priority,
                t.status,
                t.created_date
            );
        }
        return Ok(());
    }

    if tickets.is_empty() {
        println!("No tickets.");
        return Ok(());
    }

    println!(
        "{:<6} {:<10} {:<12} {}",
        "ID".bold(),
        "PRIORITY".bold(),
        "STATUS".bold(),
        "TITLE".bold()
    );
    for t in &tickets {
        println!(
            "{:<6} {:<10} {:<12} {}",
            t.id,
            t.priority.to_string(),
            t.status.to_string(),
            t.title
        );
    }
    Ok(())
}

/// Handle `ticket show`.
///
/// # Errors
///
/// Returns `TicketNotFound` for a missing id.
pub fn show(db: Option<&PathBuf>, json: bool, id: i64) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let ticket = storage.get_ticket(id)?;

    if json {
        return print_json(&ticket);
    }
    print_ticket(&ticket);
    Ok(())
}

/// Handle `ticket update`.
///
/// Unspecified flags keep the current values.
///
/// # Errors
///
/// Returns `TicketNotFound` for a missing id, or a validation error.
pub fn update(
    db: Option<&PathBuf>,
    json: bool,
    id: i64,
    title: Option<&str>,
    priority: Option<&str>,
    status: Option<&str>,
) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    let current = storage.get_ticket(id)?;

    let fields = NewTicket {
        title: title.map_or(current.title, ToString::to_string),
        priority: match priority {
            Some(p) => validate::normalize_priority(p)?,
            None => current.priority,
        },
        status: match status {
            Some(s) => validate::normalize_ticket_status(s)?,
            None => current.status,
        },
    };
    storage.update_ticket(id, &fields)?;
    let updated = storage.get_ticket(id)?;

    if is_silent() {
        println!("{id}");
    } else if json {
        print_json(&updated)?;
    } else {
        println!("{} ticket #{id}", "Updated".green());
        print_ticket(&updated);
    }
    Ok(())
}

/// Handle `ticket delete`.
///
/// # Errors
///
/// Returns `TicketNotFound` for a missing id.
pub fn delete(db: Option<&PathBuf>, json: bool, id: i64) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;
    storage.delete_ticket(id)?;

    if is_silent() {
        println!("{id}");
    } else if json {
        print_json(&serde_json::json!({ "deleted": id }))?;
    } else {
        println!("{} ticket #{id}", "Deleted".green());
    }
    Ok(())
}

fn print_ticket(t: &Ticket) {
    println!("{}      {}", "ID:".bold(), t.id);
    println!("{}   {}", "Title:".bold(), t.title);
    println!("{} {}", "Priority:".bold(), t.priority);
    println!("{}  {}", "Status:".bold(), t.status);
    println!("{} {}", "Created:".bold(), t.created_date);
}
