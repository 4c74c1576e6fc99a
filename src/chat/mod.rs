//! Chat flow: a running transcript against a completion endpoint.
//!
//! The flow keeps its own view state and applies the user's message
//! optimistically before the network call resolves, so the transcript always
//! grows by exactly one user message per submission regardless of outcome.

mod client;

pub use client::{
    ChoiceMessage, CompletionChoice, CompletionClient, CompletionRequest, CompletionResponse,
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Error message surfaced when the completion call fails
pub const COMPLETION_FETCH_ERROR: &str = "Error: Unable to fetch response.";

/// Role of a chat participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// A message typed by the user
    User,
    /// A reply from the completion endpoint
    Assistant,
}

/// A single message in the running transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who authored the message
    pub role: ChatRole,
    /// The message text, displayed as-is
    pub content: String,
}

impl ChatMessage {
    /// Creates a user-authored message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant reply
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// View state for one chat session
///
/// The transcript is append-only within a session; insertion order is display
/// order. `error` holds at most one active message, replaced on each
/// submission.
#[derive(Debug, Default)]
pub struct ChatState {
    /// Text currently in the input field
    pub input: String,
    /// The ordered transcript
    pub messages: Vec<ChatMessage>,
    /// Active error message, if any
    pub error: Option<String>,
}

impl ChatState {
    /// Creates an empty chat session
    pub fn new() -> Self {
        Self::default()
    }
}

/// Submits a prompt to the completion endpoint and reconciles the view state
///
/// Appends the user message and clears the input before the network call
/// resolves. On success the assistant reply is appended; on a network failure
/// the error slot is set and the transcript keeps only the user message.
///
/// A success response with an unexpected shape is not absorbed into the view
/// state; it propagates to the caller as `Err`.
pub async fn submit(state: &mut ChatState, client: &CompletionClient, prompt: &str) -> Result<()> {
    state.error = None;
    state.messages.push(ChatMessage::user(prompt));
    state.input.clear();

    match client.complete(prompt).await {
        Ok(reply) => {
            state.messages.push(ChatMessage::assistant(reply));
            Ok(())
        }
        Err(err) if err.is_network() => {
            warn!("completion call failed: {}", err);
            state.error = Some(COMPLETION_FETCH_ERROR.to_string());
            Ok(())
        }
        Err(err) => Err(err),
    }
}
