//! OpsDesk CLI - authenticated CRUD dashboard over a local SQLite file.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (User, Ticket, Incident, Dataset)
//! - [`storage`] - SQLite database layer
//! - [`auth`] - Registration, login, and the session file
//! - [`stats`] - Dashboard aggregation over fetched records
//! - [`assistant`] - Chat-completion client and record summaries
//! - [`fixtures`] - CSV bulk import
//! - [`config`] - Configuration management
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assistant;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod stats;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};

/// Global silent mode flag for `--silent` output.
///
/// When set, create/mutate commands print only the new record's id
/// instead of full output. Avoids threading a `silent` bool
/// through every handler signature.
pub static SILENT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Global CSV output flag (set when `--format csv`).
pub static CSV_OUTPUT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if silent mode is active.
#[inline]
pub fn is_silent() -> bool {
    SILENT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Check if CSV output is requested.
#[inline]
pub fn is_csv() -> bool {
    CSV_OUTPUT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Escape a value for CSV output (wrap in quotes if it contains commas, quotes, or newlines).
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
