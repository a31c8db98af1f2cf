//! The chat assistant: persona + best-effort user context + conversation.

pub mod assistant;
pub mod context;

pub use assistant::ChatAssistant;
