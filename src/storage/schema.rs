//! Database schema definition.
//!
//! Four independent tables, no cross-table foreign keys: every record
//! belongs to exactly one table and is owned by one access method set.

use rusqlite::{Connection, Result};

/// The complete SQL schema for the OpsDesk database.
///
/// Timestamps are stored as TEXT (`YYYY-MM-DDTHH:MM:SS`, UTC) so rows
/// stay readable in any SQLite shell.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);

CREATE TABLE IF NOT EXISTS it_tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT NOT NULL,
    created_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tickets_status ON it_tickets(status);
CREATE INDEX IF NOT EXISTS idx_tickets_priority ON it_tickets(priority);

CREATE TABLE IF NOT EXISTS security_incidents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    incident_type TEXT NOT NULL,
    severity TEXT NOT NULL,
    status TEXT NOT NULL,
    detected_date TEXT NOT NULL,
    response_time_hours REAL
);

CREATE INDEX IF NOT EXISTS idx_incidents_severity ON security_incidents(severity);
CREATE INDEX IF NOT EXISTS idx_incidents_status ON security_incidents(status);

CREATE TABLE IF NOT EXISTS dataset_metadata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    department TEXT,
    size_mb REAL,
    row_count INTEGER,
    sensitivity TEXT,
    active INTEGER DEFAULT 1,
    created_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_datasets_sensitivity ON dataset_metadata(sensitivity);
CREATE INDEX IF NOT EXISTS idx_datasets_department ON dataset_metadata(department);
";

/// Apply the schema to the database.
///
/// Uses `execute_batch` to run the entire DDL script. Idempotent
/// because all statements use `IF NOT EXISTS`.
///
/// # Errors
///
/// Returns an error if the SQL execution fails or pragmas cannot be set.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    conn.execute_batch(SCHEMA_SQL)?;

    Ok(())
}
