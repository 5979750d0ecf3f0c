// Response caching for provider calls

mod manager;
mod models;

pub use manager::ResponseCache;
pub use models::{CacheEntry, CacheStats};
