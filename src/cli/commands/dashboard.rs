//! `opsdesk dashboard` - aggregate statistics.

use super::{open_storage, print_json};
use crate::cli::Domain;
use crate::error::Result;
use crate::stats::{self, DatasetStats, IncidentStats, TicketStats};
use crate::{auth, is_csv};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Serialize)]
struct Dashboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    tickets: Option<TicketStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    incidents: Option<IncidentStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    datasets: Option<DatasetStats>,
}

/// Handle `dashboard`.
///
/// Aggregates are computed in memory over the same fetch the list
/// commands use, never via separate SQL aggregation.
///
/// # Errors
///
/// Returns an error if not logged in or a query fails.
pub fn run(db: Option<&PathBuf>, json: bool, domain: Option<Domain>) -> Result<()> {
    auth::require_auth()?;
    let storage = open_storage(db)?;

    let want = |d: Domain| domain.is_none() || domain == Some(d);
    let dashboard = Dashboard {
        tickets: want(Domain::Tickets)
            .then(|| storage.list_tickets().map(|t| stats::ticket_stats(&t)))
            .transpose()?,
        incidents: want(Domain::Incidents)
            .then(|| storage.list_incidents().map(|i| stats::incident_stats(&i)))
            .transpose()?,
        datasets: want(Domain::Datasets)
            .then(|| storage.list_datasets().map(|d| stats::dataset_stats(&d)))
            .transpose()?,
    };

    if json {
        return print_json(&dashboard);
    }

    if is_csv() {
        print_csv(&dashboard);
        return Ok(());
    }

    if let Some(t) = &dashboard.tickets {
        println!("{}", "IT Tickets".bold().underline());
        println!("  total: {}   open: {}", t.total, t.open);
        print_groups("by status", &t.by_status);
        print_groups("by priority", &t.by_priority);
        println!();
    }

    if let Some(i) = &dashboard.incidents {
        println!("{}", "Security Incidents".bold().underline());
        println!("  total: {}   open: {}", i.total, i.open);
        if let Some(avg) = i.avg_response_time_hours {
            println!("  avg response: {avg:.1}h");
        }
        print_groups("by severity", &i.by_severity);
        print_groups("by status", &i.by_status);
        print_groups("by type", &i.by_type);
        println!();
    }

    if let Some(d) = &dashboard.datasets {
        println!("{}", "Datasets".bold().underline());
        println!(
            "  total: {}   active: {}   size: {:.1} MB   rows: {}",
            d.total, d.active, d.total_size_mb, d.total_rows
        );
        print_groups("by sensitivity", &d.by_sensitivity);
        print_groups("by department", &d.by_department);
    }

    Ok(())
}

fn print_groups(label: &str, groups: &BTreeMap<String, usize>) {
    if groups.is_empty() {
        return;
    }
    let parts: Vec<String> = groups.iter().map(|(k, v)| format!("{k}={v}")).collect();
    println!("  {label}: {}", parts.join("  "));
}

fn print_csv(dashboard: &Dashboard) {
    println!("domain,metric,group,value");
    if let Some(t) = &dashboard.tickets {
        println!("tickets,total,,{}", t.total);
        println!("tickets,open,,{}", t.open);
        for (k, v) in &t.by_status {
            println!("tickets,by_status,{},{v}", crate::csv_escape(k));
        }
        for (k, v) in &t.by_priority {
            println!("tickets,by_priority,{},{v}", crate::csv_escape(k));
        }
    }
    if let Some(i) = &dashboard.incidents {
        println!("incidents,total,,{}", i.total);
        println!("incidents,open,,{}", i.open);
        if let Some(avg) = i.avg_response_time_hours {
            println!("incidents,avg_response_time_hours,,{avg}");
        }
        for (k, v) in &i.by_severity {
            println!("incidents,by_severity,{},{v}", crate::csv_escape(k));
        }
        for (k, v) in &i.by_status {
            println!("incidents,by_status,{},{v}", crate::csv_escape(k));
        }
        for (k, v) in &i.by_type {
            println!("incidents,by_type,{},{v}", crate::csv_escape(k));
        }
    }
    if let Some(d) = &dashboard.datasets {
        println!("datasets,total,,{}", d.total);
        println!("datasets,active,,{}", d.active);
        println!("datasets,total_size_mb,,{}", d.total_size_mb);
        println!("datasets,total_rows,,{}", d.total_rows);
        for (k, v) in &d.by_sensitivity {
            println!("datasets,by_sensitivity,{},{v}", crate::csv_escape(k));
        }
        for (k, v) in &d.by_department {
            println!("datasets,by_department,{},{v}", crate::csv_escape(k));
        }
    }
}
