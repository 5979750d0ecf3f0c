//! Axum-based HTTP/WebSocket server for the studzo backend.
//!
//! # Components
//!
//! - `handlers`: Advice endpoints, health, metrics and analytics.
//! - `middleware`: Request ID tracking layers.
//! - `routes`: The main router configuration that ties everything together.
//! - `ws`: WebSocket chat and notification loops.

mod handlers;
mod middleware;
mod routes;
mod ws;

pub use routes::{create_router, AppState};
