//! Input normalization for categorical fields.
//!
//! Three-tier resolution for every enum-typed flag: exact match →
//! synonym lookup → error carrying a closest-match suggestion. Keeps
//! the typed enums strict while letting the CLI accept natural input
//! like `p1`, `wip`, or `sev high`.

use crate::error::{Error, Result};
use crate::model::{IncidentStatus, Priority, Sensitivity, Severity, TicketStatus};
use std::collections::HashMap;
use std::sync::LazyLock;

// ── Synonym maps ─────────────────────────────────────────────

static PRIORITY_SYNONYMS: LazyLock<HashMap<&str, Priority>> = LazyLock::new(|| {
    [
        ("p1", Priority::High),
        ("urgent", Priority::High),
        ("critical", Priority::High),
        ("p2", Priority::Medium),
        ("normal", Priority::Medium),
        ("default", Priority::Medium),
        ("p3", Priority::Low),
        ("minor", Priority::Low),
        ("trivial", Priority::Low),
    ]
    .into_iter()
    .collect()
});

static TICKET_STATUS_SYNONYMS: LazyLock<HashMap<&str, TicketStatus>> = LazyLock::new(|| {
    [
        ("new", TicketStatus::Open),
        ("todo", TicketStatus::Open),
        ("pending", TicketStatus::Open),
        ("wip", TicketStatus::InProgress),
        ("working", TicketStatus::InProgress),
        ("active", TicketStatus::InProgress),
        ("done", TicketStatus::Closed),
        ("resolved", TicketStatus::Closed),
        ("complete", TicketStatus::Closed),
        ("completed", TicketStatus::Closed),
    ]
    .into_iter()
    .collect()
});

static SEVERITY_SYNONYMS: LazyLock<HashMap<&str, Severity>> = LazyLock::new(|| {
    [
        ("sev1", Severity::Critical),
        ("severe", Severity::Critical),
        ("urgent", Severity::Critical),
        ("sev2", Severity::High),
        ("major", Severity::High),
        ("sev3", Severity::Medium),
        ("moderate", Severity::Medium),
        ("sev4", Severity::Low),
        ("minor", Severity::Low),
    ]
    .into_iter()
    .collect()
});

static INCIDENT_STATUS_SYNONYMS: LazyLock<HashMap<&str, IncidentStatus>> = LazyLock::new(|| {
    [
        ("new", IncidentStatus::Open),
        ("reported", IncidentStatus::Open),
        ("triaging", IncidentStatus::Investigating),
        ("investigation", IncidentStatus::Investigating),
        ("active", IncidentStatus::Investigating),
        ("done", IncidentStatus::Closed),
        ("resolved", IncidentStatus::Closed),
        ("contained", IncidentStatus::Closed),
    ]
    .into_iter()
    .collect()
});

static SENSITIVITY_SYNONYMS: LazyLock<HashMap<&str, Sensitivity>> = LazyLock::new(|| {
    [
        ("open", Sensitivity::Public),
        ("external", Sensitivity::Public),
        ("private", Sensitivity::Internal),
        ("secret", Sensitivity::Confidential),
        ("sensitive", Sensitivity::Confidential),
        ("pii", Sensitivity::Restricted),
        ("regulated", Sensitivity::Restricted),
    ]
    .into_iter()
    .collect()
});

// ── Normalizers ──────────────────────────────────────────────

/// Normalize a ticket priority from exact name or synonym.
pub fn normalize_priority(input: &str) -> Result<Priority> {
    normalize(input, "priority", &PRIORITY_SYNONYMS, &Priority::ALL)
}

/// Normalize a ticket status from exact name or synonym.
pub fn normalize_ticket_status(input: &str) -> Result<TicketStatus> {
    normalize(
        input,
        "ticket status",
        &TICKET_STATUS_SYNONYMS,
        &TicketStatus::ALL,
    )
}

/// Normalize an incident severity from exact name or synonym.
pub fn normalize_severity(input: &str) -> Result<Severity> {
    normalize(input, "severity", &SEVERITY_SYNONYMS, &Severity::ALL)
}

/// Normalize an incident status from exact name or synonym.
pub fn normalize_incident_status(input: &str) -> Result<IncidentStatus> {
    normalize(
        input,
        "incident status",
        &INCIDENT_STATUS_SYNONYMS,
        &IncidentStatus::ALL,
    )
}

/// Normalize a dataset sensitivity from exact name or synonym.
pub fn normalize_sensitivity(input: &str) -> Result<Sensitivity> {
    normalize(
        input,
        "sensitivity",
        &SENSITIVITY_SYNONYMS,
        &Sensitivity::ALL,
    )
}

/// Shared three-tier resolution over an enum's canonical values.
fn normalize<T>(
    input: &str,
    field: &str,
    synonyms: &HashMap<&str, T>,
    all: &[T],
) -> Result<T>
where
    T: Copy + std::str::FromStr<Err = Error> + std::fmt::Display,
{
    // Tier 1: exact match (case-insensitive, via the enum's FromStr)
    if let Ok(value) = input.parse::<T>() {
        return Ok(value);
    }

    // Tier 2: synonym lookup
    let lower = input.to_lowercase();
    if let Some(&value) = synonyms.get(lower.as_str()) {
        return Ok(value);
    }

    // Tier 3: closest-match suggestion
    let canonical: Vec<String> = all.iter().map(ToString::to_string).collect();
    let suggestion = canonical
        .iter()
        .map(|c| (levenshtein_distance(&lower, &c.to_lowercase()), c))
        .filter(|(dist, _)| *dist <= 3)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, c)| c.clone());

    match suggestion {
        Some(s) => Err(Error::InvalidArgument(format!(
            "invalid {field}: {input} (did you mean {s}?)"
        ))),
        None => Err(Error::InvalidArgument(format!("invalid {field}: {input}"))),
    }
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Single-row optimization (O(min(m,n)) space)
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_priority() {
        assert_eq!(normalize_priority("High").unwrap(), Priority::High);
        assert_eq!(normalize_priority("p1").unwrap(), Priority::High);
        assert_eq!(normalize_priority("normal").unwrap(), Priority::Medium);
        assert!(normalize_priority("nonsense").is_err());
    }

    #[test]
    fn test_normalize_ticket_status() {
        assert_eq!(
            normalize_ticket_status("wip").unwrap(),
            TicketStatus::InProgress
        );
        assert_eq!(
            normalize_ticket_status("resolved").unwrap(),
            TicketStatus::Closed
        );
        assert_eq!(normalize_ticket_status("OPEN").unwrap(), TicketStatus::Open);
    }

    #[test]
    fn test_normalize_severity_and_sensitivity() {
        assert_eq!(normalize_severity("sev1").unwrap(), Severity::Critical);
        assert_eq!(
            normalize_sensitivity("pii").unwrap(),
            Sensitivity::Restricted
        );
    }

    #[test]
    fn test_suggestion_on_typo() {
        let err = normalize_priority("hgih").unwrap_err();
        assert!(err.to_string().contains("did you mean High?"));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }
}
