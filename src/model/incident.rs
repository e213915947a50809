//! Security incident model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Incident severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(Error::InvalidArgument(format!("invalid severity: {s}"))),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incident lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    Open,
    Investigating,
    Closed,
}

impl IncidentStatus {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Open => "Open",
            Self::Investigating => "Investigating",
            Self::Closed => "Closed",
        }
    }

    pub const ALL: [Self; 3] = [Self::Open, Self::Investigating, Self::Closed];
}

impl FromStr for IncidentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "investigating" => Ok(Self::Investigating),
            "closed" => Ok(Self::Closed),
            _ => Err(Error::InvalidArgument(format!(
                "invalid incident status: {s}"
            ))),
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A security incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: i64,
    /// Incident category, e.g. "Phishing" or "Malware".
    pub incident_type: String,
    pub severity: Severity,
    pub status: IncidentStatus,
    /// Detection timestamp (`YYYY-MM-DDTHH:MM:SS`, UTC).
    pub detected_date: String,
    /// Hours to respond, when known.
    pub response_time_hours: Option<f64>,
}

impl Incident {
    /// Validate the mutable fields of an incident before insert.
    ///
    /// # Errors
    ///
    /// Returns `RequiredField` if the incident type is blank.
    pub fn validate_type(incident_type: &str) -> Result<()> {
        if incident_type.trim().is_empty() {
            return Err(Error::RequiredField {
                field: "incident_type".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("LOW".parse::<Severity>().unwrap(), Severity::Low);
        assert!("severe".parse::<Severity>().is_err());
    }

    #[test]
    fn test_incident_status_parse() {
        assert_eq!(
            "Investigating".parse::<IncidentStatus>().unwrap(),
            IncidentStatus::Investigating
        );
        assert!("triaged".parse::<IncidentStatus>().is_err());
    }

    #[test]
    fn test_blank_type_rejected() {
        assert!(Incident::validate_type("").is_err());
        assert!(Incident::validate_type("Phishing").is_ok());
    }
}
