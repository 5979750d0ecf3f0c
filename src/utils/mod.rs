//! Cross-cutting helpers for the studzo backend.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and API-key redaction.
//! - `retry`: Bounded retry with exponential backoff around quota-admitted calls.

pub mod logging;
pub mod retry;
