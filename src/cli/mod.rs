//! Command-line interface definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON output
    Json,
    /// CSV output (list commands)
    Csv,
}

/// OpsDesk - authenticated ops records over a local SQLite file.
#[derive(Parser)]
#[command(name = "opsdesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to the database file (default: ~/.opsdesk/data/opsdesk.db)
    #[arg(long, global = true, env = "OPSDESK_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Minimal output: print only ids from mutating commands
    #[arg(long, global = true)]
    pub silent: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init {
        /// Recreate the database even if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Show version information
    Version,

    /// Register a new user account
    Register {
        /// Username for the new account
        username: String,

        /// Password (or set OPSDESK_PASSWORD)
        #[arg(long, env = "OPSDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and start a session
    Login {
        /// Username
        username: String,

        /// Password (or set OPSDESK_PASSWORD)
        #[arg(long, env = "OPSDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the current session
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Manage IT tickets
    #[command(subcommand)]
    Ticket(TicketCommand),

    /// Manage security incidents
    #[command(subcommand)]
    Incident(IncidentCommand),

    /// Manage dataset metadata
    #[command(subcommand)]
    Dataset(DatasetCommand),

    /// Show aggregate statistics
    Dashboard {
        /// Limit to one domain (default: all)
        #[arg(value_enum)]
        domain: Option<Domain>,
    },

    /// Ask the AI assistant about the records
    Ask {
        /// The question to ask
        question: String,

        /// Limit the record summary to one domain
        #[arg(long, value_enum)]
        domain: Option<Domain>,
    },

    /// Bulk-import records from a CSV fixture file
    Import {
        /// Which table to import into
        #[arg(value_enum)]
        target: ImportTarget,

        /// Path to the CSV file
        file: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// A record domain, for dashboard and assistant scoping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Domain {
    Tickets,
    Incidents,
    Datasets,
}

/// Importable fixture targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportTarget {
    Incidents,
    Datasets,
}

#[derive(Subcommand)]
pub enum TicketCommand {
    /// Create a new ticket
    Create {
        /// Ticket title
        title: String,

        /// Priority: Low, Medium, High (synonyms accepted)
        #[arg(short, long, default_value = "Medium")]
        priority: String,

        /// Status: Open, In Progress, Closed
        #[arg(short, long, default_value = "Open")]
        status: String,
    },

    /// List all tickets
    List,

    /// Show a single ticket
    Show {
        /// Ticket id
        id: i64,
    },

    /// Update a ticket's fields
    Update {
        /// Ticket id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,

        /// New status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a ticket
    Delete {
        /// Ticket id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum IncidentCommand {
    /// Record a new incident
    Create {
        /// Incident type (e.g. Phishing, Malware)
        incident_type: String,

        /// Severity: Low, Medium, High, Critical
        #[arg(short, long, default_value = "Medium")]
        severity: String,

        /// Status: Open, Investigating, Closed
        #[arg(long, default_value = "Open")]
        status: String,

        /// Response time in hours, if already known
        #[arg(long)]
        response_time: Option<f64>,
    },

    /// List all incidents
    List,

    /// Show a single incident
    Show {
        /// Incident id
        id: i64,
    },

    /// Update an incident's fields
    Update {
        /// Incident id
        id: i64,

        /// New incident type
        #[arg(long)]
        incident_type: Option<String>,

        /// New severity
        #[arg(short, long)]
        severity: Option<String>,

        /// New status
        #[arg(long)]
        status: Option<String>,

        /// New response time in hours
        #[arg(long)]
        response_time: Option<f64>,
    },

    /// Delete an incident
    Delete {
        /// Incident id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum DatasetCommand {
    /// Register a new dataset
    Create {
        /// Dataset name
        name: String,

        /// Owning department
        #[arg(short, long, default_value = "")]
        department: String,

        /// Size in megabytes
        #[arg(long, default_value_t = 0.0)]
        size_mb: f64,

        /// Row count
        #[arg(long, default_value_t = 0)]
        rows: i64,

        /// Sensitivity: Public, Internal, Confidential, Restricted
        #[arg(long, default_value = "Internal")]
        sensitivity: String,
    },

    /// List all datasets
    List,

    /// Show a single dataset
    Show {
        /// Dataset id
        id: i64,
    },

    /// Update a dataset's fields
    Update {
        /// Dataset id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New department
        #[arg(short, long)]
        department: Option<String>,

        /// New size in megabytes
        #[arg(long)]
        size_mb: Option<f64>,

        /// New row count
        #[arg(long)]
        rows: Option<i64>,

        /// New sensitivity
        #[arg(long)]
        sensitivity: Option<String>,

        /// Mark active or inactive
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a dataset
    Delete {
        /// Dataset id
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ticket_create() {
        let cli = Cli::parse_from([
            "opsdesk", "ticket", "create", "VPN down", "--priority", "High",
        ]);
        match cli.command {
            Commands::Ticket(TicketCommand::Create { title, priority, status }) => {
                assert_eq!(title, "VPN down");
                assert_eq!(priority, "High");
                assert_eq!(status, "Open");
            }
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn test_global_flags_anywhere() {
        let cli = Cli::parse_from(["opsdesk", "ticket", "list", "--json"]);
        assert!(cli.json);
    }
}
