//! OpsDesk CLI entry point.

use clap::Parser;
use colored::Colorize;
use opsdesk::cli::{
    commands, Cli, Commands, DatasetCommand, IncidentCommand, OutputFormat, TicketCommand,
};
use opsdesk::{Error, CSV_OUTPUT, SILENT};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::atomic::Ordering;

fn main() -> ExitCode {
    let cli = Cli::parse();

    SILENT.store(cli.silent, Ordering::Relaxed);
    CSV_OUTPUT.store(cli.format == Some(OutputFormat::Csv), Ordering::Relaxed);

    init_tracing(cli.verbose, cli.quiet);

    // JSON when asked for explicitly, or when stdout is piped so that
    // scripts always get machine-readable output.
    let json = cli.json
        || cli.format == Some(OutputFormat::Json)
        || (cli.format.is_none() && !std::io::stdout().is_terminal());

    match run(cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e, json);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli, json: bool) -> Result<(), Error> {
    let Cli { db, command, .. } = cli;
    let db = db.as_ref();

    match command {
        Commands::Init { force } => commands::init::run(db, json, force),
        Commands::Version => commands::version::run(json),

        Commands::Register { username, password } => {
            commands::auth::register(db, json, &username, &password)
        }
        Commands::Login { username, password } => {
            commands::auth::login(db, json, &username, &password)
        }
        Commands::Logout => commands::auth::logout(json),
        Commands::Whoami => commands::auth::whoami(json),

        Commands::Ticket(cmd) => match cmd {
            TicketCommand::Create {
                title,
                priority,
                status,
            } => commands::ticket::create(db, json, &title, &priority, &status),
            TicketCommand::List => commands::ticket::list(db, json),
            TicketCommand::Show { id } => commands::ticket::show(db, json, id),
            TicketCommand::Update {
                id,
                title,
                priority,
                status,
            } => commands::ticket::update(
                db,
                json,
                id,
                title.as_deref(),
                priority.as_deref(),
                status.as_deref(),
            ),
            TicketCommand::Delete { id } => commands::ticket::delete(db, json, id),
        },

        Commands::Incident(cmd) => match cmd {
            IncidentCommand::Create {
                incident_type,
                severity,
                status,
                response_time,
            } => commands::incident::create(
                db,
                json,
                &incident_type,
                &severity,
                &status,
                response_time,
            ),
            IncidentCommand::List => commands::incident::list(db, json),
            IncidentCommand::Show { id } => commands::incident::show(db, json, id),
            IncidentCommand::Update {
                id,
                incident_type,
                severity,
                status,
                response_time,
            } => commands::incident::update(
                db,
                json,
                id,
                incident_type.as_deref(),
                severity.as_deref(),
                status.as_deref(),
                response_time,
            ),
            IncidentCommand::Delete { id } => commands::incident::delete(db, json, id),
        },

        Commands::Dataset(cmd) => match cmd {
            DatasetCommand::Create {
                name,
                department,
                size_mb,
                rows,
                sensitivity,
            } => commands::dataset::create(
                db,
                json,
                &name,
                &department,
                size_mb,
                rows,
                &sensitivity,
            ),
            DatasetCommand::List => commands::dataset::list(db, json),
            DatasetCommand::Show { id } => commands::dataset::show(db, json, id),
            DatasetCommand::Update {
                id,
                name,
                department,
                size_mb,
                rows,
                sensitivity,
                active,
            } => commands::dataset::update(
                db,
                json,
                id,
                name.as_deref(),
                department.as_deref(),
                size_mb,
                rows,
                sensitivity.as_deref(),
                active,
            ),
            DatasetCommand::Delete { id } => commands::dataset::delete(db, json, id),
        },

        Commands::Dashboard { domain } => commands::dashboard::run(db, json, domain),
        Commands::Ask { question, domain } => commands::ask::run(db, json, &question, domain),
        Commands::Import { target, file } => commands::import::run(db, json, target, &file),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

/// Initialize tracing to stderr, honoring `RUST_LOG` when set.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_error(e: &Error, json: bool) {
    if json {
        if let Ok(s) = serde_json::to_string_pretty(&e.to_structured_json()) {
            eprintln!("{s}");
            return;
        }
    }

    eprintln!("{} {e}", "error:".red().bold());
    if let Some(hint) = e.hint() {
        eprintln!("  {} {hint}", "hint:".yellow());
    }
}
