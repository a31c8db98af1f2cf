//! Business logic and repository trait definitions for Nirogya.
//!
//! This crate defines the "ports" (repository, storage, and completion
//! client traits) that the infrastructure layer implements. It depends
//! only on `nirogya-types` -- never on `nirogya-infra` or any
//! database/HTTP crate.

pub mod analysis;
pub mod chat;
pub mod llm;
pub mod repository;
pub mod storage;
