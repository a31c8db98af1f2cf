//! Shared domain types for Nirogya.
//!
//! This crate has no I/O and no business logic: just the data shapes,
//! status enums, and error taxonomies used across the workspace.

pub mod appointment;
pub mod error;
pub mod file;
pub mod llm;
pub mod report;
