//! CompletionClient trait definition.

use nirogya_types::llm::{CompletionError, CompletionRequest};

/// A non-streaming chat-completions backend.
///
/// Implementations live in nirogya-infra (e.g., `ChatCompletionsClient`).
/// The contract mirrors the upstream API: one request, one text answer.
/// An absent or empty answer is `CompletionError::EmptyResponse`.
pub trait CompletionClient: Send + Sync {
    /// Send a completion request and return the first choice's message text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
