//! Provider resolution for the chat-completions API.
//!
//! Two providers speak the same wire protocol: OpenRouter and OpenAI.
//! Resolution happens once at startup from whichever API keys are
//! configured, so request handlers never re-read the environment.

use secrecy::SecretString;

use nirogya_types::llm::CompletionError;

/// Key prefix that marks an OpenRouter credential even when it arrives
/// through the OpenAI variable.
const ROUTER_KEY_PREFIX: &str = "sk-or-v1-";

/// Which upstream the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenRouter,
    OpenAi,
}

impl ProviderKind {
    /// Chat-completions endpoint URL for this provider.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            ProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
        }
    }

    /// Default vision-capable model identifier for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "openai/gpt-4o",
            ProviderKind::OpenAi => "gpt-4o",
        }
    }

    /// Provider name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::OpenAi => "openai",
        }
    }
}

/// A resolved provider: which endpoint to call and with what credential.
#[derive(Debug)]
pub struct ResolvedProvider {
    pub kind: ProviderKind,
    pub api_key: SecretString,
}

impl ResolvedProvider {
    /// Pick a provider from the configured keys.
    ///
    /// An OpenRouter key wins outright. Otherwise the OpenAI key is used,
    /// but a key carrying the OpenRouter prefix is routed to OpenRouter
    /// regardless of which variable supplied it. No key at all is an error.
    pub fn resolve(
        openrouter_key: Option<SecretString>,
        openai_key: Option<SecretString>,
    ) -> Result<Self, CompletionError> {
        if let Some(key) = openrouter_key {
            return Ok(Self {
                kind: ProviderKind::OpenRouter,
                api_key: key,
            });
        }

        if let Some(key) = openai_key {
            use secrecy::ExposeSecret;
            let kind = if key.expose_secret().starts_with(ROUTER_KEY_PREFIX) {
                ProviderKind::OpenRouter
            } else {
                ProviderKind::OpenAi
            };
            return Ok(Self { kind, api_key: key });
        }

        Err(CompletionError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openrouter_key_wins() {
        let resolved = ResolvedProvider::resolve(
            Some(SecretString::from("sk-or-v1-abc")),
            Some(SecretString::from("sk-proj-xyz")),
        )
        .unwrap();
        assert_eq!(resolved.kind, ProviderKind::OpenRouter);
    }

    #[test]
    fn test_openai_key_used_when_no_router_key() {
        let resolved =
            ResolvedProvider::resolve(None, Some(SecretString::from("sk-proj-xyz"))).unwrap();
        assert_eq!(resolved.kind, ProviderKind::OpenAi);
        assert_eq!(resolved.kind.default_model(), "gpt-4o");
    }

    #[test]
    fn test_router_prefixed_key_in_openai_slot_routes_to_openrouter() {
        let resolved =
            ResolvedProvider::resolve(None, Some(SecretString::from("sk-or-v1-abc"))).unwrap();
        assert_eq!(resolved.kind, ProviderKind::OpenRouter);
        assert_eq!(resolved.kind.default_model(), "openai/gpt-4o");
    }

    #[test]
    fn test_no_keys_is_missing_credential() {
        let err = ResolvedProvider::resolve(None, None).unwrap_err();
        assert!(matches!(err, CompletionError::MissingCredential));
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(
            ProviderKind::OpenRouter.endpoint(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
        assert_eq!(
            ProviderKind::OpenAi.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
