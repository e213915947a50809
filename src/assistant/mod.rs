//! AI assistant integration.
//!
//! A thin wrapper around a chat-completion API: [`client`] owns the
//! HTTP call and error mapping, [`summary`] builds the bounded record
//! context injected into the system prompt.

pub mod client;
pub mod summary;

pub use client::ChatClient;
pub use summary::build_context;
