//! Dataset metadata model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data sensitivity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sensitivity {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl Sensitivity {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Public => "Public",
            Self::Internal => "Internal",
            Self::Confidential => "Confidential",
            Self::Restricted => "Restricted",
        }
    }

    pub const ALL: [Self; 4] = [
        Self::Public,
        Self::Internal,
        Self::Confidential,
        Self::Restricted,
    ];
}

impl FromStr for Sensitivity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "internal" => Ok(Self::Internal),
            "confidential" => Ok(Self::Confidential),
            "restricted" => Ok(Self::Restricted),
            _ => Err(Error::InvalidArgument(format!("invalid sensitivity: {s}"))),
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a registered dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: i64,
    pub name: String,
    /// Owning department; empty when unknown.
    pub department: String,
    pub size_mb: f64,
    pub row_count: i64,
    pub sensitivity: Sensitivity,
    pub active: bool,
    /// Registration timestamp (`YYYY-MM-DDTHH:MM:SS`, UTC).
    pub created_date: String,
}

impl Dataset {
    /// Validate the mutable fields of a dataset before insert.
    ///
    /// # Errors
    ///
    /// Returns `RequiredField` if the name is blank, or
    /// `InvalidArgument` for negative size or row count.
    pub fn validate_fields(name: &str, size_mb: f64, row_count: i64) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::RequiredField {
                field: "name".to_string(),
            });
        }
        if size_mb < 0.0 || !size_mb.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "size_mb must be a non-negative number, got {size_mb}"
            )));
        }
        if row_count < 0 {
            return Err(Error::InvalidArgument(format!(
                "row_count must be non-negative, got {row_count}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitivity_parse() {
        for s in Sensitivity::ALL {
            assert_eq!(s.as_str().parse::<Sensitivity>().unwrap(), s);
        }
        assert!("secret".parse::<Sensitivity>().is_err());
    }

    #[test]
    fn test_validate_fields() {
        assert!(Dataset::validate_fields("sales_2025", 12.5, 10_000).is_ok());
        assert!(Dataset::validate_fields("", 1.0, 1).is_err());
        assert!(Dataset::validate_fields("x", -1.0, 1).is_err());
        assert!(Dataset::validate_fields("x", f64::NAN, 1).is_err());
        assert!(Dataset::validate_fields("x", 1.0, -5).is_err());
    }
}
