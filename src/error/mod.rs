// Error types for the studzo backend

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Which quota window rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaScope {
    Minute,
    Day,
}

impl std::fmt::Display for QuotaScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuotaScope::Minute => write!(f, "per-minute"),
            QuotaScope::Day => write!(f, "daily"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} quota exceeded")]
    QuotaExceeded(QuotaScope),

    #[error("Gemini API error: HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Gemini API timed out: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Timeout(e.to_string())
        } else {
            AppError::Provider {
                status: e.status().map(|s| s.as_u16()).unwrap_or(502),
                message: e.to_string(),
            }
        }
    }
}

impl AppError {
    /// Whether the retry policy may re-attempt after this error.
    ///
    /// Quota rejections, rate-limiting, server-side faults and timeouts are
    /// transient; everything else propagates immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::QuotaExceeded(_) | AppError::Timeout(_) => true,
            AppError::Provider { status, .. } => retryable_status(*status),
            _ => false,
        }
    }
}

/// Determine if an HTTP status code is retryable
pub fn retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

// Convert AppError to HTTP responses for Axum
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::QuotaExceeded(_) => {
                (StatusCode::TOO_MANY_REQUESTS, "rate_limit_error", self.to_string())
            }
            AppError::Provider { status, .. } => {
                let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
                if code.is_server_error() || code == StatusCode::TOO_MANY_REQUESTS {
                    (StatusCode::BAD_GATEWAY, "api_error", self.to_string())
                } else {
                    (StatusCode::BAD_REQUEST, "invalid_request_error", self.to_string())
                }
            }
            AppError::Timeout(_) => {
                (StatusCode::GATEWAY_TIMEOUT, "timeout_error", self.to_string())
            }
            AppError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", self.to_string())
            }
            AppError::Config(_) | AppError::ConfigParsing(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", self.to_string())
            }
            _ => {
                (StatusCode::INTERNAL_SERVER_ERROR, "api_error", self.to_string())
            }
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": error_type,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
