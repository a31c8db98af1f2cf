//! Image summarization: encode, prompt, call, extract.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use nirogya_types::llm::{
    CompletionError, CompletionRequest, MessageRole, PromptContent, PromptMessage,
};

use super::client::CompletionClient;
use super::prompt::{ANALYSIS_SYSTEM_PROMPT, REPORT_ANALYSIS_PROMPT};

/// Output cap for the summarization call.
pub const SUMMARY_MAX_TOKENS: u32 = 1000;

/// Low randomness: summaries should be stable for the same report.
pub const SUMMARY_TEMPERATURE: f64 = 0.3;

/// Summarize a medical report image via the completion client.
///
/// Base64-encodes the raw bytes, sends the fixed system instruction plus a
/// user turn of (instruction text, image tagged with `extension`), and
/// returns the trimmed answer. A blank answer is `EmptyResponse`.
pub async fn summarize_image<C: CompletionClient>(
    client: &C,
    bytes: &[u8],
    extension: &str,
) -> Result<String, CompletionError> {
    let base64_data = BASE64.encode(bytes);

    let request = CompletionRequest {
        messages: vec![
            PromptMessage::text(MessageRole::System, ANALYSIS_SYSTEM_PROMPT),
            PromptMessage {
                role: MessageRole::User,
                content: vec![
                    PromptContent::Text(REPORT_ANALYSIS_PROMPT.to_string()),
                    PromptContent::Image {
                        extension: extension.to_string(),
                        base64_data,
                    },
                ],
            },
        ],
        max_tokens: SUMMARY_MAX_TOKENS,
        temperature: SUMMARY_TEMPERATURE,
    };

    let content = client.complete(&request).await?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CompletionError::EmptyResponse);
    }
    Ok(trimmed.to_string())
}
