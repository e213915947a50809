//! Bounded record summaries for the assistant prompt.
//!
//! The assistant never sees the raw database. Each domain contributes
//! its aggregate counts plus at most a handful of sample rows, and the
//! whole context is capped so a large table cannot blow up the prompt.

use crate::error::Result;
use crate::model::{Dataset, Incident, Ticket};
use crate::stats;
use crate::storage::SqliteStorage;
use std::fmt::Write;

/// Sample rows included per domain.
const SAMPLE_LIMIT: usize = 5;

/// Hard cap on the generated context, in characters.
const MAX_CONTEXT_CHARS: usize = 4000;

/// Which record domain(s) to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextDomain {
    Tickets,
    Incidents,
    Datasets,
    All,
}

/// Build the record context for an assistant question.
///
/// # Errors
///
/// Returns an error if any of the underlying list queries fail.
pub fn build_context(storage: &SqliteStorage, domain: ContextDomain) -> Result<String> {
    let mut out = String::new();

    if matches!(domain, ContextDomain::Tickets | ContextDomain::All) {
        out.push_str(&summarize_tickets(&storage.list_tickets()?));
    }
    if matches!(domain, ContextDomain::Incidents | ContextDomain::All) {
        out.push_str(&summarize_incidents(&storage.list_incidents()?));
    }
    if matches!(domain, ContextDomain::Datasets | ContextDomain::All) {
        out.push_str(&summarize_datasets(&storage.list_datasets()?));
    }

    if out.len() > MAX_CONTEXT_CHARS {
        let mut end = MAX_CONTEXT_CHARS;
        while !out.is_char_boundary(end) {
            end -= 1;
        }
        out.truncate(end);
        out.push_str("\n[summary truncated]");
    }

    Ok(out)
}

/// Summarize the ticket table: counts plus sample rows.
#[must_use]
pub fn summarize_tickets(tickets: &[Ticket]) -> String {
    let s = stats::ticket_stats(tickets);
    let mut out = format!("IT tickets: {} total, {} open.\n", s.total, s.open);

    for (priority, count) in &s.by_priority {
        let _ = writeln!(out, "  priority {priority}: {count}");
    }
    for t in tickets.iter().take(SAMPLE_LIMIT) {
        let _ = writeln!(
            out,
            "  #{} [{}/{}] {}",
            t.id, t.priority, t.status, t.title
        );
    }
    if tickets.len() > SAMPLE_LIMIT {
        let _ = writeln!(out, "  ... and {} more", tickets.len() - SAMPLE_LIMIT);
    }
    out
}

/// Summarize the incident table: counts plus sample rows.
#[must_use]
pub fn summarize_incidents(incidents: &[Incident]) -> String {
    let s = stats::incident_stats(incidents);
    let mut out = format!(
        "Security incidents: {} total, {} open.\n",
        s.total, s.open
    );

    for (severity, count) in &s.by_severity {
        let _ = writeln!(out, "  severity {severity}: {count}");
    }
    if let Some(avg) = s.avg_response_time_hours {
        let _ = writeln!(out, "  avg response time: {avg:.1}h");
    }
    for i in incidents.iter().take(SAMPLE_LIMIT) {
        let _ = writeln!(
            out,
            "  #{} [{}/{}] {}",
            i.id, i.severity, i.status, i.incident_type
        );
    }
    if incidents.len() > SAMPLE_LIMIT {
        let _ = writeln!(out, "  ... and {} more", incidents.len() - SAMPLE_LIMIT);
    }
    out
}

/// Summarize the dataset table: counts plus sample rows.
#[must_use]
pub fn summarize_datasets(datasets: &[Dataset]) -> String {
    let s = stats::dataset_stats(datasets);
    let mut out = format!(
        "Datasets: {} total, {} active, {:.1} MB, {} rows.\n",
        s.total, s.active, s.total_size_mb, s.total_rows
    );

    for (sensitivity, count) in &s.by_sensitivity {
        let _ = writeln!(out, "  sensitivity {sensitivity}: {count}");
    }
    for d in datasets.iter().take(SAMPLE_LIMIT) {
        let _ = writeln!(
            out,
            "  #{} [{}] {} ({}, {:.1} MB)",
            d.id, d.sensitivity, d.name, d.department, d.size_mb
        );
    }
    if datasets.len() > SAMPLE_LIMIT {
        let _ = writeln!(out, "  ... and {} more", datasets.len() - SAMPLE_LIMIT);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TicketStatus};
    use crate::storage::NewTicket;

    fn seed(storage: &SqliteStorage, n: usize) {
        for i in 0..n {
            storage
                .create_ticket(&NewTicket {
                    title: format!("ticket {i}"),
                    priority: Priority::Medium,
                    status: TicketStatus::Open,
                })
                .unwrap();
        }
    }

    #[test]
    fn test_context_includes_counts_and_samples() {
        let storage = SqliteStorage::open_memory().unwrap();
        seed(&storage, 3);

        let ctx = build_context(&storage, ContextDomain::Tickets).unwrap();
        assert!(ctx.contains("3 total, 3 open"));
        assert!(ctx.contains("ticket 0"));
        assert!(!ctx.contains("more"));
    }

    #[test]
    fn test_samples_are_capped() {
        let storage = SqliteStorage::open_memory().unwrap();
        seed(&storage, 12);

        let ctx = build_context(&storage, ContextDomain::Tickets).unwrap();
        assert!(ctx.contains("12 total"));
        assert!(ctx.contains("... and 7 more"));
        assert!(!ctx.contains("ticket 5"));
    }

    #[test]
    fn test_context_is_bounded() {
        let storage = SqliteStorage::open_memory().unwrap();
        for i in 0..50 {
            storage
                .create_ticket(&NewTicket {
                    title: format!("{} {}", "x".repeat(200), i),
                    priority: Priority::Low,
                    status: TicketStatus::Open,
                })
                .unwrap();
        }

        let ctx = build_context(&storage, ContextDomain::All).unwrap();
        assert!(ctx.len() <= MAX_CONTEXT_CHARS + 32);
    }

    #[test]
    fn test_all_domains_present() {
        let storage = SqliteStorage::open_memory().unwrap();
        let ctx = build_context(&storage, ContextDomain::All).unwrap();
        assert!(ctx.contains("IT tickets"));
        assert!(ctx.contains("Security incidents"));
        assert!(ctx.contains("Datasets"));
    }
}
