//! Dashboard aggregation.
//!
//! Pure functions over fetched record slices: group, count, sum.
//! Aggregation always happens over the rows the storage layer
//! returned, never via separate SQL, so the dashboard and the list
//! views can never disagree about the same snapshot.

use crate::model::{Dataset, Incident, Ticket, TicketStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated view of the ticket table.
#[derive(Debug, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

/// Aggregated view of the incident table.
#[derive(Debug, Serialize)]
pub struct IncidentStats {
    pub total: usize,
    pub open: usize,
    pub by_severity: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    /// Mean response time over incidents that have one recorded.
    pub avg_response_time_hours: Option<f64>,
}

/// Aggregated view of the dataset table.
#[derive(Debug, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub active: usize,
    pub total_size_mb: f64,
    pub total_rows: i64,
    pub by_sensitivity: BTreeMap<String, usize>,
    pub by_department: BTreeMap<String, usize>,
}

/// Compute ticket statistics.
#[must_use]
pub fn ticket_stats(tickets: &[Ticket]) -> TicketStats {
    let mut by_status = BTreeMap::new();
    let mut by_priority = BTreeMap::new();

    for t in tickets {
        *by_status.entry(t.status.to_string()).or_insert(0) += 1;
        *by_priority.entry(t.priority.to_string()).or_insert(0) += 1;
    }

    TicketStats {
        total: tickets.len(),
        open: tickets
            .iter()
            .filter(|t| t.status != TicketStatus::Closed)
            .count(),
        by_status,
        by_priority,
    }
}

/// Compute incident statistics.
#[must_use]
pub fn incident_stats(incidents: &[Incident]) -> IncidentStats {
    let mut by_severity = BTreeMap::new();
    let mut by_status = BTreeMap::new();
    let mut by_type = BTreeMap::new();

    for i in incidents {
        *by_severity.entry(i.severity.to_string()).or_insert(0) += 1;
        *by_status.entry(i.status.to_string()).or_insert(0) += 1;
        *by_type.entry(i.incident_type.clone()).or_insert(0) += 1;
    }

    let recorded: Vec<f64> = incidents
        .iter()
        .filter_map(|i| i.response_time_hours)
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let avg_response_time_hours = if recorded.is_empty() {
        None
    } else {
        Some(recorded.iter().sum::<f64>() / recorded.len() as f64)
    };

    IncidentStats {
        total: incidents.len(),
        open: incidents
            .iter()
            .filter(|i| i.status != crate::model::IncidentStatus::Closed)
            .count(),
        by_severity,
        by_status,
        by_type,
        avg_response_time_hours,
    }
}

/// Compute dataset statistics.
#[must_use]
pub fn dataset_stats(datasets: &[Dataset]) -> DatasetStats {
    let mut by_sensitivity = BTreeMap::new();
    let mut by_department = BTreeMap::new();

    for d in datasets {
        *by_sensitivity.entry(d.sensitivity.to_string()).or_insert(0) += 1;
        let dept = if d.department.is_empty() {
            "(unassigned)".to_string()
        } else {
            d.department.clone()
        };
        *by_department.entry(dept).or_insert(0) += 1;
    }

    DatasetStats {
        total: datasets.len(),
        active: datasets.iter().filter(|d| d.active).count(),
        total_size_mb: datasets.iter().map(|d| d.size_mb).sum(),
        total_rows: datasets.iter().map(|d| d.row_count).sum(),
        by_sensitivity,
        by_department,
    }
}
