//! Chat assistant endpoint.
//!
//! POST /api/v1/chat - Stateless conversation with optional user context.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use nirogya_observe::genai_attrs;
use nirogya_types::llm::ChatTurn;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body: the full conversation so far plus an optional user id for
/// context enrichment.
///
/// `messages` distinguishes absent (a 400) from present-but-empty: an empty
/// array is valid input and yields a persona-only reply.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Option<Vec<ChatTurn>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub success: bool,
}

/// POST /api/v1/chat - Answer one conversation turn.
///
/// The caller sends the whole conversation each time; nothing is stored.
/// A body that fails to parse (e.g. non-array `messages`) is a 400 with
/// the same flat `{"error"}` shape as every other failure.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let messages = required_messages(request.messages)?;

    let span = tracing::info_span!(
        "chat",
        { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_CHAT,
        { genai_attrs::GEN_AI_PROVIDER_NAME } = state.provider,
        { genai_attrs::GEN_AI_REQUEST_MODEL } = %state.model,
    );

    let message = state
        .assistant
        .respond(&messages, request.user_id.as_deref())
        .instrument(span)
        .await?;

    Ok(Json(ChatResponse {
        message,
        success: true,
    }))
}

/// A request without a `messages` field is rejected; an empty array passes
/// through so the assistant answers from the persona alone.
fn required_messages(messages: Option<Vec<ChatTurn>>) -> Result<Vec<ChatTurn>, AppError> {
    messages.ok_or_else(|| AppError::Validation("Messages array is required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nirogya_types::llm::MessageRole;

    #[test]
    fn test_missing_messages_is_rejected() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.messages.is_none());

        let err = required_messages(request.messages).unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Messages array is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_messages_array_is_valid() {
        let request: ChatRequest = serde_json::from_str(r#"{"messages":[]}"#).unwrap();

        // Present-but-empty proceeds: the assistant gets zero turns and
        // answers from the persona system message alone.
        let messages = required_messages(request.messages).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_non_array_messages_fails_deserialization() {
        let result = serde_json::from_str::<ChatRequest>(r#"{"messages":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_parses_conversation() {
        let request: ChatRequest = serde_json::from_str(
            r#"{"messages":[{"role":"user","content":"hi"}],"user_id":"u1"}"#,
        )
        .unwrap();
        let messages = required_messages(request.messages).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(request.user_id.as_deref(), Some("u1"));
    }
}
