//! Completion request/response types for the upstream chat-completions API.
//!
//! These are provider-neutral shapes. The wire format (content-part arrays,
//! data URIs, routing headers) is owned by the infra client.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A plain text conversation turn, as received from the chat UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

/// Content of a single prompt message.
///
/// Image content carries already-encoded base64 bytes plus the file
/// extension used to tag the data URI media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptContent {
    Text(String),
    Image { extension: String, base64_data: String },
}

/// One message in a completion request.
#[derive(Debug, Clone)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: Vec<PromptContent>,
}

impl PromptMessage {
    /// A message containing a single text part.
    pub fn text(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![PromptContent::Text(content.into())],
        }
    }
}

/// A single non-streaming completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<PromptMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Errors from the upstream completion API.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("API key not configured. Please set OPENAI_API_KEY or OPENROUTER_API_KEY")]
    MissingCredential,

    #[error("API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("API returned no content")]
    EmptyResponse,

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("failed to parse response: {0}")]
    Deserialization(String),
}
