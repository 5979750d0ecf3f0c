//! Configuration data structures for the studzo backend.
//!
//! This module defines the schema for the application settings, including
//! server parameters, Gemini API access, and the resilience layer knobs
//! (quota windows, retries, response cache).

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Request budget windows for outbound Gemini calls.
    #[serde(default)]
    pub quota: QuotaConfig,

    /// Retry/backoff behaviour for transient provider failures.
    #[serde(default)]
    pub retry: RetryConfig,

    /// In-memory response cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8000`
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Settings for the upstream Gemini generative-language API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for `generativelanguage.googleapis.com`.
    /// Usually supplied via `STUDZO_GEMINI_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the API (no trailing slash).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Model name used for all advice and chat calls.
    #[serde(default = "default_model")]
    pub model: String,

    /// Overall request timeout for provider calls, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base_url: default_api_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

/// Fixed-window request budgets for outbound provider calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum provider calls per minute. Default: 60.
    #[serde(default = "default_rpm")]
    pub requests_per_minute: u32,

    /// Maximum provider calls per day. Default: 1500.
    #[serde(default = "default_rpd")]
    pub requests_per_day: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_rpm(),
            requests_per_day: default_rpd(),
        }
    }
}

fn default_rpm() -> u32 {
    60
}

fn default_rpd() -> u32 {
    1500
}

/// Retry/backoff behaviour for transient provider failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Additional attempts after the first failure. Default: 3.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay in milliseconds; doubles each attempt. Default: 2000.
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    2000
}

/// In-memory response cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether response caching is enabled. Default: true.
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Seconds a cached response stays visible. Default: 3600.
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_cache_ttl(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    3600
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset. Default: `info`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: `pretty` or `json`. Default: `pretty`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
