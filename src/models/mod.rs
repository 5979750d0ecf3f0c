// Wire and domain data models

pub mod chat;
pub mod gemini;
