//! Storage layer for OpsDesk.
//!
//! Provides the SQLite-backed persistence for users, tickets,
//! incidents, and dataset metadata.

pub mod schema;
pub mod sqlite;

pub use sqlite::{NewDataset, NewIncident, NewTicket, SqliteStorage};
