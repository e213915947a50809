//! `opsdesk ask` - AI assistant over the records.

use super::{open_storage, print_json};
use crate::assistant::summary::ContextDomain;
use crate::assistant::{build_context, ChatClient};
use crate::auth;
use crate::cli::Domain;
use crate::error::{Error, Result};
use std::path::PathBuf;
use tracing::debug;

/// Handle `ask`.
///
/// Builds a bounded record summary, sends it with the question to the
/// chat-completion endpoint, and prints the answer.
///
/// # Errors
///
/// Returns `ApiKeyMissing` before any network traffic when no key is
/// configured, and the mapped assistant errors otherwise.
pub fn run(db: Option<&PathBuf>, json: bool, question: &str, domain: Option<Domain>) -> Result<()> {
    auth::require_auth()?;

    if question.trim().is_empty() {
        return Err(Error::RequiredField {
            field: "question".to_string(),
        });
    }

    let storage = open_storage(db)?;
    let scope = match domain {
        Some(Domain::Tickets) => ContextDomain::Tickets,
        Some(Domain::Incidents) => ContextDomain::Incidents,
        Some(Domain::Datasets) => ContextDomain::Datasets,
        None => ContextDomain::All,
    };
    let context = build_context(&storage, scope)?;
    debug!(context_len = context.len(), "built assistant context");

    let client = ChatClient::from_env()?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("failed to start async runtime: {e}")))?;
    let answer = runtime.block_on(client.ask(question, Some(&context)))?;

    if json {
        print_json(&serde_json::json!({
            "question": question,
            "answer": answer,
        }))?;
    } else {
        println!("{answer}");
    }
    Ok(())
}
