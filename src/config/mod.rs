// Configuration module

mod models;

pub use models::*;

use crate::error::{AppError, Result};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (prefix: STUDZO_)
    /// 2. Config file
    /// 3. Defaults (lowest)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Load configuration using an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (prefix: STUDZO_)
            .add_source(Environment::with_prefix("STUDZO").separator("_"))
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        let mut app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))?;

        // Nested-key env mapping is ambiguous for snake_case fields, so the
        // API key gets a direct override
        if let Ok(key) = std::env::var("STUDZO_GEMINI_API_KEY") {
            if !key.is_empty() {
                app_config.gemini.api_key = key;
            }
        }

        Ok(app_config)
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".studzo")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}
