//! Infrastructure implementations for Nirogya.
//!
//! Concrete adapters for the ports defined in `nirogya-core`: SQLite
//! repositories via sqlx, a local filesystem object store, and the
//! chat-completions HTTP client.

pub mod config;
pub mod llm;
pub mod sqlite;
pub mod storage;
