// Gemini API integration

mod client;
pub mod streaming;

pub use client::GeminiClient;
