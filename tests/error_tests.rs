// Error handling tests

use axum::response::IntoResponse;
use studzo_backend::error::{AppError, QuotaScope};

#[test]
fn test_error_display_messages() {
    let errors = vec![
        AppError::QuotaExceeded(QuotaScope::Day),
        AppError::Provider {
            status: 503,
            message: "Service down".to_string(),
        },
        AppError::Timeout("deadline exceeded".to_string()),
        AppError::InvalidRequest("Bad request".to_string()),
        AppError::Config("missing api key".to_string()),
        AppError::Internal("boom".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_quota_error_maps_to_429() {
    let response = AppError::QuotaExceeded(QuotaScope::Minute).into_response();
    assert_eq!(response.status(), 429);
}

#[test]
fn test_provider_server_error_maps_to_502() {
    let error = AppError::Provider {
        status: 500,
        message: "internal".to_string(),
    };
    assert_eq!(error.into_response().status(), 502);
}

#[test]
fn test_provider_client_error_maps_to_400() {
    let error = AppError::Provider {
        status: 404,
        message: "model not found".to_string(),
    };
    assert_eq!(error.into_response().status(), 400);
}

#[test]
fn test_timeout_maps_to_504() {
    let error = AppError::Timeout("deadline".to_string());
    assert_eq!(error.into_response().status(), 504);
}

#[test]
fn test_quota_scope_display() {
    assert_eq!(
        format!("{}", AppError::QuotaExceeded(QuotaScope::Day)),
        "daily quota exceeded"
    );
    assert_eq!(
        format!("{}", AppError::QuotaExceeded(QuotaScope::Minute)),
        "per-minute quota exceeded"
    );
}
