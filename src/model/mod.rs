//! Data models for OpsDesk.
//!
//! One flat record type per table, plus the enums constraining their
//! categorical fields. Records are constructed through validating
//! constructors so a bad field never reaches the database.

mod dataset;
mod incident;
mod ticket;
mod user;

pub use dataset::{Dataset, Sensitivity};
pub use incident::{Incident, IncidentStatus, Severity};
pub use ticket::{Priority, Ticket, TicketStatus};
pub use user::User;

/// Current UTC timestamp in the stored text form (`YYYY-MM-DDTHH:MM:SS`).
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}
