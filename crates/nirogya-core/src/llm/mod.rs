//! Completion client port, fixed prompts, and the image summarizer.

pub mod client;
pub mod prompt;
pub mod summarizer;

pub use client::CompletionClient;
