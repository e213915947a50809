//! SQLite storage implementation.
//!
//! One access-method family per table. Every operation is a single
//! statement against the store; SQLite's default auto-commit provides
//! the only transaction discipline, per the last-write-wins model.

use crate::error::{Error, Result};
use crate::model::{
    now_timestamp, Dataset, Incident, IncidentStatus, Priority, Sensitivity, Severity, Ticket,
    TicketStatus, User,
};
use crate::storage::schema::apply_schema;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

/// Mutable fields of a ticket, used for create and update.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub priority: Priority,
    pub status: TicketStatus,
}

/// Mutable fields of an incident, used for create and update.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub incident_type: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub response_time_hours: Option<f64>,
}

/// Mutable fields of a dataset, used for create and update.
#[derive(Debug, Clone)]
pub struct NewDataset {
    pub name: String,
    pub department: String,
    pub size_mb: f64,
    pub row_count: i64,
    pub sensitivity: Sensitivity,
    pub active: bool,
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the database and applies schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ==================
    // User Operations
    // ==================

    /// Check whether a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn user_exists(&self, username: &str) -> Result<bool> {
        let exists = self
            .conn
            .prepare("SELECT 1 FROM users WHERE username = ?1")?
            .exists([username])?;
        Ok(exists)
    }

    /// Insert a new user row and return its id.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUser` if the username is taken.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        if self.user_exists(username)? {
            return Err(Error::DuplicateUser {
                username: username.to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![username, password_hash, now_timestamp()],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch a user by username.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no such user exists.
    pub fn get_user(&self, username: &str) -> Result<User> {
        self.conn
            .prepare(
                "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
            )?
            .query_row([username], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    password_hash: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })
            .optional()?
            .ok_or_else(|| Error::UserNotFound {
                username: username.to_string(),
            })
    }

    // ==================
    // Ticket Operations
    // ==================

    /// Create a new ticket and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RequiredField` for a blank title, or a database error.
    pub fn create_ticket(&self, new: &NewTicket) -> Result<Ticket> {
        Ticket::validate_title(&new.title)?;
        let created = now_timestamp();

        self.conn.execute(
            "INSERT INTO it_tickets (title, priority, status, created_date)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                new.title,
                new.priority.as_str(),
                new.status.as_str(),
                created
            ],
        )?;

        Ok(Ticket {
            id: self.conn.last_insert_rowid(),
            title: new.title.clone(),
            priority: new.priority,
            status: new.status,
            created_date: created,
        })
    }

    /// Fetch a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if the id is absent.
    pub fn get_ticket(&self, id: i64) -> Result<Ticket> {
        let row = self
            .conn
            .prepare(
                "SELECT id, title, priority, status, created_date
                 FROM it_tickets WHERE id = ?1",
            )?
            .query_row([id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })
            .optional()?;

        match row {
            Some(raw) => ticket_from_row(raw),
            None => Err(Error::TicketNotFound { id }),
        }
    }

    /// Return all tickets.
    ///
    /// Ordering is an implementation detail (by id, for stable output);
    /// callers must not rely on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tickets(&self) -> Result<Vec<Ticket>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, priority, status, created_date
             FROM it_tickets ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(ticket_from_row).collect()
    }

    /// Replace the mutable fields of a ticket.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if the id is absent.
    pub fn update_ticket(&self, id: i64, fields: &NewTicket) -> Result<()> {
        Ticket::validate_title(&fields.title)?;

        let changed = self.conn.execute(
            "UPDATE it_tickets SET title = ?1, priority = ?2, status = ?3 WHERE id = ?4",
            rusqlite::params![
                fields.title,
                fields.priority.as_str(),
                fields.status.as_str(),
                id
            ],
        )?;

        if changed == 0 {
            return Err(Error::TicketNotFound { id });
        }
        Ok(())
    }

    /// Delete a ticket by id.
    ///
    /// # Errors
    ///
    /// Returns `TicketNotFound` if the id is absent.
    pub fn delete_ticket(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM it_tickets WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(Error::TicketNotFound { id });
        }
        Ok(())
    }

    // ==================
    // Incident Operations
    // ==================

    /// Create a new incident and return the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RequiredField` for a blank type, or a database error.
    pub fn create_incident(&self, new: &NewIncident) -> Result<Incident> {
        Incident::validate_type(&new.incident_type)?;
        let detected = now_timestamp();

        self.conn.execute(
            "INSERT INTO security_incidents
             (incident_type, severity, status, detected_date, response_time_hours)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                new.incident_type,
                new.severity.as_str(),
                new.status.as_str(),
                detected,
                new.response_time_hours
            ],
        )?;

        Ok(Incident {
            id: self.conn.last_insert_rowid(),
            incident_type: new.incident_type.clone(),
            severity: new.severity,
            status: new.status,
            detected_date: detected,
            response_time_hours: new.response_time_hours,
        })
    }

    /// Create an incident with an explicit detection date (fixture import).
    ///
    /// # Errors
    ///
    /// Returns `RequiredField` for a blank type, or a database error.
    pub fn create_incident_with_date(
        &self,
        new: &NewIncident,
        detected_date: &str,
    ) -> Result<i64> {
        Incident::validate_type(&new.incident_type)?;

        self.conn.execute(
            "INSERT INTO security_incidents
             (incident_type, severity, status, detected_date, response_time_hours)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                new.incident_type,
                new.severity.as_str(),
                new.status.as_str(),
                detected_date,
                new.response_time_hours
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch an incident by id.
    ///
    /// # Errors
    ///
    /// Returns `IncidentNotFound` if the id is absent.
    pub fn get_incident(&self, id: i64) -> Result<Incident> {
        let row = self
            .conn
            .prepare(
                "SELECT id, incident_type, severity, status, detected_date, response_time_hours
                 FROM security_incidents WHERE id = ?1",
            )?
            .query_row([id], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<f64>>(5)?,
                ))
            })
            .optional()?;

        match row {
            Some(raw) => incident_from_row(raw),
            None => Err(Error::IncidentNotFound { id }),
        }
    }

    /// Return all incidents (ordering unspecified; by id in practice).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_incidents(&self) -> Result<Vec<Incident>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, incident_type, severity, status, detected_date, response_time_hours
             FROM security_incidents ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, Option<f64>>(5)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(incident_from_row).collect()
    }

    /// Replace the mutable fields of an incident.
    ///
    /// # Errors
    ///
    /// Returns `IncidentNotFound` if the id is absent.
    pub fn update_incident(&self, id: i64, fields: &NewIncident) -> Result<()> {
        Incident::validate_type(&fields.incident_type)?;

        let changed = self.conn.execute(
            "UPDATE security_incidents
             SET incident_type = ?1, severity = ?2, status = ?3, response_time_hours = ?4
             WHERE id = ?5",
            rusqlite::params![
                fields.incident_type,
                fields.severity.as_str(),
                fields.status.as_str(),
                fields.response_time_hours,
                id
            ],
        )?;

        if changed == 0 {
            return Err(Error::IncidentNotFound { id });
        }
        Ok(())
    }

    /// Delete an incident by id.
    ///
    /// # Errors
    ///
    /// Returns `IncidentNotFound` if the id is absent.
    pub fn delete_incident(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM security_incidents WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(Error::IncidentNotFound { id });
        }
        Ok(())
    }

    // ==================
    // Dataset Operations
    // ==================

    /// Create a new dataset record and return it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, or a database error.
    pub fn create_dataset(&self, new: &NewDataset) -> Result<Dataset> {
        Dataset::validate_fields(&new.name, new.size_mb, new.row_count)?;
        let created = now_timestamp();

        self.conn.execute(
            "INSERT INTO dataset_metadata
             (name, department, size_mb, row_count, sensitivity, active, created_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                new.name,
                new.department,
                new.size_mb,
                new.row_count,
                new.sensitivity.as_str(),
                i64::from(new.active),
                created
            ],
        )?;

        Ok(Dataset {
            id: self.conn.last_insert_rowid(),
            name: new.name.clone(),
            department: new.department.clone(),
            size_mb: new.size_mb,
            row_count: new.row_count,
            sensitivity: new.sensitivity,
            active: new.active,
            created_date: created,
        })
    }

    /// Fetch a dataset by id.
    ///
    /// # Errors
    ///
    /// Returns `DatasetNotFound` if the id is absent.
    pub fn get_dataset(&self, id: i64) -> Result<Dataset> {
        let row = self
            .conn
            .prepare(
                "SELECT id, name, department, size_mb, row_count, sensitivity, active, created_date
                 FROM dataset_metadata WHERE id = ?1",
            )?
            .query_row([id], map_raw_dataset)
            .optional()?;

        match row {
            Some(raw) => dataset_from_row(raw),
            None => Err(Error::DatasetNotFound { id }),
        }
    }

    /// Return all datasets (ordering unspecified; by id in practice).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_datasets(&self) -> Result<Vec<Dataset>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, department, size_mb, row_count, sensitivity, active, created_date
             FROM dataset_metadata ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], map_raw_dataset)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(dataset_from_row).collect()
    }

    /// Replace the mutable fields of a dataset.
    ///
    /// # Errors
    ///
    /// Returns `DatasetNotFound` if the id is absent.
    pub fn update_dataset(&self, id: i64, fields: &NewDataset) -> Result<()> {
        Dataset::validate_fields(&fields.name, fields.size_mb, fields.row_count)?;

        let changed = self.conn.execute(
            "UPDATE dataset_metadata
             SET name = ?1, department = ?2, size_mb = ?3, row_count = ?4,
                 sensitivity = ?5, active = ?6
             WHERE id = ?7",
            rusqlite::params![
                fields.name,
                fields.department,
                fields.size_mb,
                fields.row_count,
                fields.sensitivity.as_str(),
                i64::from(fields.active),
                id
            ],
        )?;

        if changed == 0 {
            return Err(Error::DatasetNotFound { id });
        }
        Ok(())
    }

    /// Delete a dataset by id.
    ///
    /// # Errors
    ///
    /// Returns `DatasetNotFound` if the id is absent.
    pub fn delete_dataset(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM dataset_metadata WHERE id = ?1", [id])?;

        if changed == 0 {
            return Err(Error::DatasetNotFound { id });
        }
        Ok(())
    }
}

// ── Row mapping ──────────────────────────────────────────────
//
// Raw tuples come straight out of rusqlite; the from_row functions
// turn them into typed records, substituting documented defaults for
// NULL optional columns and rejecting values outside the enum domains.

type RawTicket = (i64, String, String, String, Option<String>);
type RawIncident = (i64, String, String, String, Option<String>, Option<f64>);
type RawDataset = (
    i64,
    String,
    Option<String>,
    Option<f64>,
    Option<i64>,
    Option<String>,
    Option<i64>,
    Option<String>,
);

fn ticket_from_row(raw: RawTicket) -> Result<Ticket> {
    let (id, title, priority, status, created_date) = raw;
    Ok(Ticket {
        id,
        title,
        priority: priority.parse()?,
        status: status.parse()?,
        created_date: created_date.unwrap_or_default(),
    })
}

fn incident_from_row(raw: RawIncident) -> Result<Incident> {
    let (id, incident_type, severity, status, detected_date, response_time_hours) = raw;
    Ok(Incident {
        id,
        incident_type,
        severity: severity.parse()?,
        status: status.parse()?,
        detected_date: detected_date.unwrap_or_default(),
        response_time_hours,
    })
}

fn map_raw_dataset(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawDataset> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn dataset_from_row(raw: RawDataset) -> Result<Dataset> {
    let (id, name, department, size_mb, row_count, sensitivity, active, created_date) = raw;
    Ok(Dataset {
        id,
        name,
        department: department.unwrap_or_default(),
        size_mb: size_mb.unwrap_or(0.0),
        row_count: row_count.unwrap_or(0),
        sensitivity: match sensitivity {
            Some(s) => s.parse()?,
            None => Sensitivity::Internal,
        },
        active: active.map_or(true, |a| a != 0),
        created_date: created_date.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(title: &str, priority: Priority, status: TicketStatus) -> NewTicket {
        NewTicket {
            title: title.to_string(),
            priority,
            status,
        }
    }

    fn incident(incident_type: &str, severity: Severity) -> NewIncident {
        NewIncident {
            incident_type: incident_type.to_string(),
            severity,
            status: IncidentStatus::Open,
            response_time_hours: None,
        }
    }

    fn dataset(name: &str) -> NewDataset {
        NewDataset {
            name: name.to_string(),
            department: "Analytics".to_string(),
            size_mb: 10.0,
            row_count: 1000,
            sensitivity: Sensitivity::Internal,
            active: true,
        }
    }

    #[test]
    fn test_create_then_get_round_trips() {
        let storage = SqliteStorage::open_memory().unwrap();

        let created = storage
            .create_ticket(&ticket("VPN down", Priority::High, TicketStatus::Open))
            .unwrap();
        assert!(created.id >= 1);

        let fetched = storage.get_ticket(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_ids_are_unique_and_immutable() {
        let storage = SqliteStorage::open_memory().unwrap();

        let a = storage
            .create_ticket(&ticket("a", Priority::Low, TicketStatus::Open))
            .unwrap();
        let b = storage
            .create_ticket(&ticket("b", Priority::Low, TicketStatus::Open))
            .unwrap();
        assert_ne!(a.id, b.id);

        // Deleting and creating again never reuses a visible id mapping
        storage.delete_ticket(a.id).unwrap();
        let c = storage
            .create_ticket(&ticket("c", Priority::Low, TicketStatus::Open))
            .unwrap();
        assert_ne!(c.id, b.id);
    }

    #[test]
    fn test_update_reflects_exactly_the_new_fields() {
        let storage = SqliteStorage::open_memory().unwrap();

        let t1 = storage
            .create_ticket(&ticket("VPN down", Priority::High, TicketStatus::Open))
            .unwrap();
        let t2 = storage
            .create_ticket(&ticket("Printer jam", Priority::Low, TicketStatus::Open))
            .unwrap();

        storage
            .update_ticket(
                t1.id,
                &ticket("VPN down", Priority::High, TicketStatus::Closed),
            )
            .unwrap();

        let updated = storage.get_ticket(t1.id).unwrap();
        assert_eq!(updated.status, TicketStatus::Closed);
        assert_eq!(updated.title, "VPN down");
        assert_eq!(updated.priority, Priority::High);

        // Unrelated record untouched
        let other = storage.get_ticket(t2.id).unwrap();
        assert_eq!(other.status, TicketStatus::Open);
        assert_eq!(other.title, "Printer jam");
    }

    #[test]
    fn test_delete_removes_from_get_and_list() {
        let storage = SqliteStorage::open_memory().unwrap();

        let t = storage
            .create_ticket(&ticket("VPN down", Priority::High, TicketStatus::Open))
            .unwrap();
        storage.delete_ticket(t.id).unwrap();

        assert!(matches!(
            storage.get_ticket(t.id),
            Err(Error::TicketNotFound { .. })
        ));
        assert!(storage
            .list_tickets()
            .unwrap()
            .iter()
            .all(|x| x.id != t.id));
    }

    #[test]
    fn test_missing_id_is_not_found_never_a_panic() {
        let storage = SqliteStorage::open_memory().unwrap();

        assert!(matches!(
            storage.get_ticket(999),
            Err(Error::TicketNotFound { id: 999 })
        ));
        assert!(matches!(
            storage.update_ticket(
                999,
                &ticket("x", Priority::Low, TicketStatus::Open)
            ),
            Err(Error::TicketNotFound { .. })
        ));
        assert!(matches!(
            storage.delete_ticket(999),
            Err(Error::TicketNotFound { .. })
        ));
        assert!(matches!(
            storage.get_incident(999),
            Err(Error::IncidentNotFound { .. })
        ));
        assert!(matches!(
            storage.delete_dataset(999),
            Err(Error::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_vpn_down_scenario() {
        let storage = SqliteStorage::open_memory().unwrap();

        let t = storage
            .create_ticket(&ticket("VPN down", Priority::High, TicketStatus::Open))
            .unwrap();

        let all = storage.list_tickets().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "VPN down");
        assert_eq!(all[0].priority, Priority::High);

        storage
            .update_ticket(
                t.id,
                &ticket("VPN down", Priority::High, TicketStatus::Closed),
            )
            .unwrap();
        assert_eq!(
            storage.get_ticket(t.id).unwrap().status,
            TicketStatus::Closed
        );

        storage.delete_ticket(t.id).unwrap();
        assert!(storage.list_tickets().unwrap().is_empty());
    }

    #[test]
    fn test_incident_crud_with_optional_response_time() {
        let storage = SqliteStorage::open_memory().unwrap();

        let i = storage.create_incident(&incident("Phishing", Severity::High)).unwrap();
        assert_eq!(i.response_time_hours, None);

        let mut fields = incident("Phishing", Severity::Critical);
        fields.status = IncidentStatus::Investigating;
        fields.response_time_hours = Some(2.5);
        storage.update_incident(i.id, &fields).unwrap();

        let fetched = storage.get_incident(i.id).unwrap();
        assert_eq!(fetched.severity, Severity::Critical);
        assert_eq!(fetched.status, IncidentStatus::Investigating);
        assert_eq!(fetched.response_time_hours, Some(2.5));

        storage.delete_incident(i.id).unwrap();
        assert!(storage.list_incidents().unwrap().is_empty());
    }

    #[test]
    fn test_dataset_crud_and_null_defaults() {
        let storage = SqliteStorage::open_memory().unwrap();

        let d = storage.create_dataset(&dataset("sales_2025")).unwrap();
        assert!(storage.get_dataset(d.id).unwrap().active);

        // A row with NULL optional columns maps to documented defaults
        storage
            .conn()
            .execute(
                "INSERT INTO dataset_metadata (name, created_date) VALUES ('legacy', 't')",
                [],
            )
            .unwrap();
        let all = storage.list_datasets().unwrap();
        let legacy = all.iter().find(|x| x.name == "legacy").unwrap();
        assert_eq!(legacy.department, "");
        assert!((legacy.size_mb - 0.0).abs() < f64::EPSILON);
        assert_eq!(legacy.row_count, 0);
        assert_eq!(legacy.sensitivity, Sensitivity::Internal);
        assert!(legacy.active);
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let storage = SqliteStorage::open_memory().unwrap();

        assert!(matches!(
            storage.create_ticket(&ticket("", Priority::Low, TicketStatus::Open)),
            Err(Error::RequiredField { .. })
        ));

        let mut d = dataset("x");
        d.size_mb = -3.0;
        assert!(matches!(
            storage.create_dataset(&d),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_user_create_and_duplicate() {
        let storage = SqliteStorage::open_memory().unwrap();

        let id = storage.create_user("alice", "hash").unwrap();
        assert!(id >= 1);
        assert!(storage.user_exists("alice").unwrap());

        assert!(matches!(
            storage.create_user("alice", "other"),
            Err(Error::DuplicateUser { .. })
        ));
        assert!(matches!(
            storage.get_user("nobody"),
            Err(Error::UserNotFound { .. })
        ));
    }
}
