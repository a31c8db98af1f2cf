//! HTTP/REST API layer for Nirogya.
//!
//! Axum-based REST API at `/api/v1/` with flat `{"error": ...}` bodies
//! and CORS support.

pub mod error;
pub mod handlers;
pub mod router;
