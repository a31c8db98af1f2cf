//! Chat-completions client and provider resolution.

pub mod completions;
pub mod provider;
pub mod types;

pub use completions::ChatCompletionsClient;
pub use provider::{ProviderKind, ResolvedProvider};
