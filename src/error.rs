//! Error types for the OpsDesk CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=not_found, 4=validation, 5=auth, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for OpsDesk operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    NotInitialized,
    AlreadyInitialized,
    DatabaseError,

    // Not Found (exit 3)
    TicketNotFound,
    IncidentNotFound,
    DatasetNotFound,
    UserNotFound,

    // Validation (exit 4)
    RequiredField,
    InvalidArgument,

    // Auth (exit 5)
    DuplicateUser,
    InvalidCredentials,
    AuthRequired,

    // Config (exit 7)
    ConfigError,
    ApiKeyMissing,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Assistant (exit 9)
    AssistantAuth,
    AssistantQuota,
    AssistantUnavailable,
    AssistantError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::TicketNotFound => "TICKET_NOT_FOUND",
            Self::IncidentNotFound => "INCIDENT_NOT_FOUND",
            Self::DatasetNotFound => "DATASET_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RequiredField => "REQUIRED_FIELD",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DuplicateUser => "DUPLICATE_USER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::ConfigError => "CONFIG_ERROR",
            Self::ApiKeyMissing => "API_KEY_MISSING",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::AssistantAuth => "ASSISTANT_AUTH",
            Self::AssistantQuota => "ASSISTANT_QUOTA",
            Self::AssistantUnavailable => "ASSISTANT_UNAVAILABLE",
            Self::AssistantError => "ASSISTANT_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-9).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotInitialized | Self::AlreadyInitialized | Self::DatabaseError => 2,
            Self::TicketNotFound
            | Self::IncidentNotFound
            | Self::DatasetNotFound
            | Self::UserNotFound => 3,
            Self::RequiredField | Self::InvalidArgument => 4,
            Self::DuplicateUser | Self::InvalidCredentials | Self::AuthRequired => 5,
            Self::ConfigError | Self::ApiKeyMissing => 7,
            Self::IoError | Self::JsonError => 8,
            Self::AssistantAuth
            | Self::AssistantQuota
            | Self::AssistantUnavailable
            | Self::AssistantError => 9,
        }
    }

    /// Whether a caller should retry with corrected input.
    ///
    /// True for validation errors and transient assistant failures.
    /// False for not-found, credential, I/O, or internal errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RequiredField
                | Self::InvalidArgument
                | Self::AssistantUnavailable
                | Self::DatabaseError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in OpsDesk CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `opsdesk init` first")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("Ticket not found: {id}")]
    TicketNotFound { id: i64 },

    #[error("Incident not found: {id}")]
    IncidentNotFound { id: i64 },

    #[error("Dataset not found: {id}")]
    DatasetNotFound { id: i64 },

    #[error("User not found: {username}")]
    UserNotFound { username: String },

    #[error("Username already taken: {username}")]
    DuplicateUser { username: String },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    AuthRequired,

    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("AI assistant is not configured: no API key set")]
    ApiKeyMissing,

    #[error("AI service rejected the API key: {0}")]
    AssistantAuth(String),

    #[error("AI service quota exhausted: {0}")]
    AssistantQuota(String),

    #[error("AI service unreachable: {0}")]
    AssistantUnavailable(String),

    #[error("AI service error: {0}")]
    Assistant(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::AlreadyInitialized { .. } => ErrorCode::AlreadyInitialized,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::TicketNotFound { .. } => ErrorCode::TicketNotFound,
            Self::IncidentNotFound { .. } => ErrorCode::IncidentNotFound,
            Self::DatasetNotFound { .. } => ErrorCode::DatasetNotFound,
            Self::UserNotFound { .. } => ErrorCode::UserNotFound,
            Self::DuplicateUser { .. } => ErrorCode::DuplicateUser,
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::AuthRequired => ErrorCode::AuthRequired,
            Self::RequiredField { .. } => ErrorCode::RequiredField,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::ApiKeyMissing => ErrorCode::ApiKeyMissing,
            Self::AssistantAuth(_) => ErrorCode::AssistantAuth,
            Self::AssistantQuota(_) => ErrorCode::AssistantQuota,
            Self::AssistantUnavailable(_) => ErrorCode::AssistantUnavailable,
            Self::Assistant(_) => ErrorCode::AssistantError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => {
                Some("Run `opsdesk init` to create the database".to_string())
            }

            Self::AlreadyInitialized { path } => Some(format!(
                "Database already exists at {}. Use `--force` to reinitialize.",
                path.display()
            )),

            Self::AuthRequired => Some(
                "Log in first: opsdesk login <username> --password <password>\n  \
                 No account yet? opsdesk register <username> --password <password>"
                    .to_string(),
            ),

            Self::DuplicateUser { username } => Some(format!(
                "The username '{username}' is taken. Pick another, or log in: \
                 opsdesk login {username} --password <password>"
            )),

            Self::InvalidCredentials => {
                Some("Check the username and password and try again.".to_string())
            }

            Self::TicketNotFound { .. } => {
                Some("Use `opsdesk ticket list` to see available tickets.".to_string())
            }
            Self::IncidentNotFound { .. } => {
                Some("Use `opsdesk incident list` to see available incidents.".to_string())
            }
            Self::DatasetNotFound { .. } => {
                Some("Use `opsdesk dataset list` to see available datasets.".to_string())
            }

            Self::ApiKeyMissing => Some(
                "Set the OPENAI_API_KEY environment variable before using `opsdesk ask`."
                    .to_string(),
            ),

            Self::AssistantUnavailable(_) => {
                Some("The AI service could not be reached. Try again later.".to_string())
            }

            Self::InvalidArgument(msg) => {
                if msg.contains("priority") {
                    Some("Valid priorities: Low, Medium, High".to_string())
                } else if msg.contains("severity") {
                    Some("Valid severities: Low, Medium, High, Critical".to_string())
                } else if msg.contains("sensitivity") {
                    Some(
                        "Valid sensitivities: Public, Internal, Confidential, Restricted"
                            .to_string(),
                    )
                } else if msg.contains("status") {
                    Some(
                        "Ticket statuses: Open, In Progress, Closed. \
                         Incident statuses: Open, Investigating, Closed."
                            .to_string(),
                    )
                } else {
                    None
                }
            }

            _ => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::NotInitialized.exit_code(), 2);
        assert_eq!(Error::TicketNotFound { id: 9 }.exit_code(), 3);
        assert_eq!(
            Error::RequiredField { field: "title".into() }.exit_code(),
            4
        );
        assert_eq!(Error::InvalidCredentials.exit_code(), 5);
        assert_eq!(Error::AuthRequired.exit_code(), 5);
        assert_eq!(Error::ApiKeyMissing.exit_code(), 7);
        assert_eq!(Error::AssistantQuota("429".into()).exit_code(), 9);
    }

    #[test]
    fn test_error_code_strings() {
        assert_eq!(
            Error::DuplicateUser { username: "bob".into() }
                .error_code()
                .as_str(),
            "DUPLICATE_USER"
        );
        assert_eq!(Error::ApiKeyMissing.error_code().as_str(), "API_KEY_MISSING");
        assert_eq!(
            Error::AssistantUnavailable("timeout".into())
                .error_code()
                .as_str(),
            "ASSISTANT_UNAVAILABLE"
        );
    }

    #[test]
    fn test_structured_json_contains_hint() {
        let err = Error::AuthRequired;
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "AUTH_REQUIRED");
        assert_eq!(json["error"]["exit_code"], 5);
        assert!(json["error"]["hint"].as_str().unwrap().contains("login"));
    }

    #[test]
    fn test_invalid_argument_hint_names_valid_values() {
        let err = Error::InvalidArgument("invalid priority: Urgent".into());
        let hint = err.hint().unwrap();
        assert!(hint.contains("Low, Medium, High"));
    }
}
