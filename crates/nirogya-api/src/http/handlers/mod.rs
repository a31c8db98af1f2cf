//! HTTP request handlers for the REST API.

pub mod analyze;
pub mod appointment;
pub mod chat;
pub mod report;
pub mod upload;
