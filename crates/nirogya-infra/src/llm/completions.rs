//! ChatCompletionsClient -- concrete [`CompletionClient`] over HTTP.
//!
//! Sends non-streaming requests to an OpenAI-compatible chat-completions
//! endpoint (OpenRouter or OpenAI, chosen at startup by
//! [`ResolvedProvider::resolve`]).
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use nirogya_core::llm::client::CompletionClient;
use nirogya_types::llm::{CompletionError, CompletionRequest, PromptContent};

use super::provider::{ProviderKind, ResolvedProvider};
use super::types::{WireContent, WireImageUrl, WireMessage, WirePart, WireRequest, WireResponse};

/// Attribution headers OpenRouter uses for app rankings.
const ROUTER_REFERER: &str = "https://nirogya.app";
const ROUTER_TITLE: &str = "Nirogya Medical Assistant";

/// Request timeout. Vision analysis of a full report page can take well
/// over a minute, so this is far above typical API defaults.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the chat-completions API.
///
/// Cheap to clone; the underlying `reqwest::Client` and credential are
/// shared.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    api_key: Arc<SecretString>,
    kind: ProviderKind,
    endpoint: String,
    model: String,
}

// ChatCompletionsClient intentionally does NOT derive Debug so the
// credential can never leak through formatting.

impl ChatCompletionsClient {
    /// Create a client for the given provider.
    ///
    /// `model_override` replaces the provider's default model when set.
    pub fn new(
        provider: ResolvedProvider,
        model_override: Option<String>,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let model =
            model_override.unwrap_or_else(|| provider.kind.default_model().to_string());

        Ok(Self {
            client,
            api_key: Arc::new(provider.api_key),
            kind: provider.kind,
            endpoint: provider.kind.endpoint().to_string(),
            model,
        })
    }

    /// The model sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Which provider this client talks to.
    pub fn provider(&self) -> ProviderKind {
        self.kind
    }

    /// Override the endpoint URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Convert a provider-neutral [`CompletionRequest`] into the wire shape.
    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: m.role.to_string(),
                content: to_wire_content(&m.content),
            })
            .collect();

        WireRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }
}

/// Text-only messages stay in the plain-string shape; anything with an
/// image becomes a content-part array with the image inlined as a data URI.
fn to_wire_content(parts: &[PromptContent]) -> WireContent {
    if let [PromptContent::Text(text)] = parts {
        return WireContent::Text(text.clone());
    }

    let wire_parts = parts
        .iter()
        .map(|part| match part {
            PromptContent::Text(text) => WirePart::Text { text: text.clone() },
            PromptContent::Image {
                extension,
                base64_data,
            } => WirePart::ImageUrl {
                image_url: WireImageUrl {
                    url: format!("data:image/{extension};base64,{base64_data}"),
                    detail: "high".to_string(),
                },
            },
        })
        .collect();
    WireContent::Parts(wire_parts)
}

/// Pull the assistant text out of a response, treating a missing choice,
/// null content, or empty string all as no content.
fn extract_content(response: WireResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(CompletionError::EmptyResponse)
}

impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = self.to_wire_request(request);

        let mut http_request = self
            .client
            .post(&self.endpoint)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json");

        if self.kind == ProviderKind::OpenRouter {
            http_request = http_request
                .header("HTTP-Referer", ROUTER_REFERER)
                .header("X-Title", ROUTER_TITLE);
        }

        let response = http_request
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                provider = self.kind.name(),
                "completion request rejected upstream"
            );
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Deserialization(e.to_string()))?;

        extract_content(wire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nirogya_types::llm::{MessageRole, PromptMessage};

    use super::super::types::{WireChoice, WireResponseMessage};

    fn make_client() -> ChatCompletionsClient {
        let provider = ResolvedProvider::resolve(
            Some(SecretString::from("sk-or-v1-test-key-not-real")),
            None,
        )
        .unwrap();
        ChatCompletionsClient::new(provider, None).unwrap()
    }

    fn response_with(content: Option<&str>) -> WireResponse {
        WireResponse {
            choices: vec![WireChoice {
                message: WireResponseMessage {
                    content: content.map(str::to_string),
                },
            }],
        }
    }

    #[test]
    fn test_default_model_follows_provider() {
        let client = make_client();
        assert_eq!(client.model(), "openai/gpt-4o");
        assert_eq!(client.provider(), ProviderKind::OpenRouter);
    }

    #[test]
    fn test_openrouter_attribution_values() {
        // OpenRouter ranks apps by these headers; keep them stable.
        assert_eq!(ROUTER_REFERER, "https://nirogya.app");
        assert_eq!(ROUTER_TITLE, "Nirogya Medical Assistant");
    }

    #[test]
    fn test_model_override() {
        let provider =
            ResolvedProvider::resolve(None, Some(SecretString::from("sk-proj-test"))).unwrap();
        let client =
            ChatCompletionsClient::new(provider, Some("gpt-4o-mini".to_string())).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_to_wire_request_shapes() {
        let client = make_client();
        let request = CompletionRequest {
            messages: vec![
                PromptMessage::text(MessageRole::System, "Be helpful"),
                PromptMessage {
                    role: MessageRole::User,
                    content: vec![
                        PromptContent::Text("Analyze this".to_string()),
                        PromptContent::Image {
                            extension: "png".to_string(),
                            base64_data: "AAAA".to_string(),
                        },
                    ],
                },
            ],
            max_tokens: 1000,
            temperature: 0.3,
        };

        let wire = client.to_wire_request(&request);
        assert_eq!(wire.model, "openai/gpt-4o");
        assert!(!wire.stream);

        let json = serde_json::to_value(&wire).unwrap();
        // System message stays a plain string.
        assert_eq!(json["messages"][0]["content"], "Be helpful");
        // The image turn becomes a part array with a data URI.
        assert_eq!(
            json["messages"][1]["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
        assert_eq!(json["messages"][1]["content"][1]["image_url"]["detail"], "high");
    }

    #[test]
    fn test_extract_content() {
        assert_eq!(
            extract_content(response_with(Some("Summary."))).unwrap(),
            "Summary."
        );
    }

    #[test]
    fn test_extract_null_content_is_empty_response() {
        let err = extract_content(response_with(None)).unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }

    #[test]
    fn test_extract_empty_string_is_empty_response() {
        let err = extract_content(response_with(Some(""))).unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }

    #[test]
    fn test_extract_no_choices_is_empty_response() {
        let err = extract_content(WireResponse { choices: vec![] }).unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }
}
