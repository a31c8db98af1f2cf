//! Chat-completions API wire types.
//!
//! These are the request/response structures for the OpenAI-compatible
//! chat-completions endpoint (also spoken by OpenRouter). They are NOT the
//! provider-neutral types from nirogya-types; conversion happens in the
//! client.

use serde::{Deserialize, Serialize};

/// Request body for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct WireRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub stream: bool,
}

/// A single message. Text-only messages serialize their content as a plain
/// string; multimodal messages use the content-part array form.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: String,
    pub content: WireContent,
}

/// Message content in either wire shape.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum WireContent {
    Text(String),
    Parts(Vec<WirePart>),
}

/// One part of a multimodal message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum WirePart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: WireImageUrl },
}

/// Image reference carried as a data URI.
#[derive(Debug, Clone, Serialize)]
pub struct WireImageUrl {
    pub url: String,
    pub detail: String,
}

/// Non-streaming response from the chat-completions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub choices: Vec<WireChoice>,
}

/// A single completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct WireChoice {
    pub message: WireResponseMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct WireResponseMessage {
    pub content: Option<String>,
}
