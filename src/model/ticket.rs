//! IT ticket model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Canonical stored form.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// All valid values, for hints and validation messages.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(Error::InvalidArgument(format!("invalid priority: {s}"))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticket lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }

    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];
}

impl FromStr for TicketStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in progress" | "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(Error::InvalidArgument(format!("invalid ticket status: {s}"))),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An IT support ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Row id, assigned by the database on insert.
    pub id: i64,
    pub title: String,
    pub priority: Priority,
    pub status: TicketStatus,
    /// Creation timestamp (`YYYY-MM-DDTHH:MM:SS`, UTC).
    pub created_date: String,
}

impl Ticket {
    /// Validate the mutable fields of a ticket before insert.
    ///
    /// # Errors
    ///
    /// Returns `RequiredField` if the title is blank.
    pub fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(Error::RequiredField {
                field: "title".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_round_trip() {
        for p in Priority::ALL {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_status_accepts_both_spellings() {
        assert_eq!(
            "In Progress".parse::<TicketStatus>().unwrap(),
            TicketStatus::InProgress
        );
        assert_eq!(
            "in_progress".parse::<TicketStatus>().unwrap(),
            TicketStatus::InProgress
        );
    }

    #[test]
    fn test_blank_title_rejected() {
        assert!(matches!(
            Ticket::validate_title("   "),
            Err(Error::RequiredField { .. })
        ));
        assert!(Ticket::validate_title("VPN down").is_ok());
    }
}
