//! Chat-completion HTTP client.
//!
//! Speaks the OpenAI-compatible `/chat/completions` wire format.
//! Every failure maps to a specific error so the CLI can tell the
//! user whether to fix the key, wait out a quota, or check the
//! network. A missing API key fails before any request is built.

use crate::config;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// System prompt framing the assistant's role.
const SYSTEM_PROMPT: &str = "You are an operations assistant for an internal dashboard \
covering IT tickets, security incidents, and dataset metadata. Answer concisely using \
the record summary provided. If the summary does not contain the answer, say so.";

/// Sampling temperature for deterministic-leaning answers.
const TEMPERATURE: f64 = 0.3;

/// Upper bound on completion length.
const MAX_TOKENS: u32 = 400;

/// Request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ── Wire types ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

// ── Client ───────────────────────────────────────────────────

/// Client for a chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Build a client from the environment (key, endpoint, model).
    ///
    /// A missing key is not an error here; [`ask`](Self::ask) reports
    /// it, so `--help` and construction never require configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self> {
        Self::new(
            config::resolve_ai_endpoint(),
            config::resolve_ai_model(),
            config::resolve_api_key(),
        )
    }

    /// Build a client with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            api_key,
        })
    }

    /// Ask the assistant a question, optionally with record context.
    ///
    /// # Errors
    ///
    /// - `ApiKeyMissing` when no key is configured (no network traffic)
    /// - `AssistantAuth` on 401/403
    /// - `AssistantQuota` on 429
    /// - `AssistantUnavailable` on connect or timeout failures
    /// - `Assistant` for any other API failure
    pub async fn ask(&self, question: &str, context: Option<&str>) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            return Err(Error::ApiKeyMissing);
        };

        let system = match context {
            Some(ctx) => format!("{SYSTEM_PROMPT}\n\nRecord summary:\n{ctx}"),
            None => SYSTEM_PROMPT.to_string(),
        };

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: question.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.endpoint);
        debug!(url = %url, model = %self.model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    Error::AssistantUnavailable(e.to_string())
                } else {
                    Error::Assistant(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = truncate(&body, 200);
            return Err(match status.as_u16() {
                401 | 403 => Error::AssistantAuth(format!("HTTP {status}: {detail}")),
                429 => Error::AssistantQuota(format!("HTTP {status}: {detail}")),
                _ => Error::Assistant(format!("HTTP {status}: {detail}")),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Assistant(format!("malformed response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| Error::Assistant("response contained no answer".to_string()))
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_fails_without_network() {
        // Endpoint is unroutable; if the client tried the network the
        // error would be AssistantUnavailable, not ApiKeyMissing.
        let client = ChatClient::new(
            "http://192.0.2.1/v1".to_string(),
            "gpt-4o-mini".to_string(),
            None,
        )
        .unwrap();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let err = rt.block_on(client.ask("hello", None)).unwrap_err();
        assert!(matches!(err, Error::ApiKeyMissing));
    }

    #[test]
    fn test_endpoint_trailing_slash_is_normalized() {
        let client = ChatClient::new(
            "https://api.example.com/v1/".to_string(),
            "m".to_string(),
            Some("k".to_string()),
        )
        .unwrap();
        assert_eq!(client.endpoint, "https://api.example.com/v1");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"42"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "42");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 200), "short");
        let long = "é".repeat(300);
        let cut = truncate(&long, 199);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 202);
    }
}
