// studzo-backend - Gemini-backed AI advisory backend for international students

pub mod advice;
pub mod analytics;
pub mod cache;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod quota;
pub mod server;
pub mod utils;
pub mod vision;
pub mod ws;
