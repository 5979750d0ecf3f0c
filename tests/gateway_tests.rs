// Gateway tests: cache, retry and fallback behaviour end to end

use serde_json::json;
use std::sync::Arc;
use studzo_backend::analytics::UsageLog;
use studzo_backend::config::{AppConfig, CacheConfig, GeminiConfig, QuotaConfig, RetryConfig};
use studzo_backend::error::AppError;
use studzo_backend::gateway::{AdviceGateway, Modality};

fn test_app_config(base_url: String) -> AppConfig {
    AppConfig {
        gemini: GeminiConfig {
            api_key: "test-key".to_string(),
            api_base_url: base_url,
            model: "gemini-2.0-flash".to_string(),
            timeout_seconds: 5,
        },
        quota: QuotaConfig {
            requests_per_minute: 100,
            requests_per_day: 1000,
        },
        retry: RetryConfig {
            max_retries: 3,
            initial_delay_ms: 1,
        },
        cache: CacheConfig {
            enabled: true,
            ttl_seconds: 3600,
        },
        ..AppConfig::default()
    }
}

fn gateway_for(server_url: String) -> (AdviceGateway, Arc<UsageLog>) {
    let config = test_app_config(server_url);
    let client = Arc::new(studzo_backend::gemini::GeminiClient::new(&config.gemini).unwrap());
    let usage = Arc::new(UsageLog::new());
    (AdviceGateway::new(&config, client, usage.clone()), usage)
}

fn text_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

#[tokio::test]
async fn test_cache_hit_skips_provider_and_telemetry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(text_body("cached answer"))
        .expect(1)
        .create_async()
        .await;

    let (gateway, usage) = gateway_for(server.url());

    let first = gateway.generate("roommate-match", "same prompt").await.unwrap();
    let second = gateway.generate("roommate-match", "same prompt").await.unwrap();

    assert_eq!(first, "cached answer");
    assert_eq!(second, "cached answer");
    // Exactly one upstream call, exactly one usage record
    mock.assert_async().await;
    assert_eq!(usage.summarize().total_calls, 1);
}

#[tokio::test]
async fn test_retry_exhaustion_counts_attempts_and_keeps_last_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(503)
        .with_body(r#"{"error": {"code": 503, "message": "overloaded"}}"#)
        .expect(4) // max_retries = 3 -> 4 attempts
        .create_async()
        .await;

    let (gateway, usage) = gateway_for(server.url());
    let err = gateway.generate("lease-analysis", "prompt").await.unwrap_err();

    match err {
        AppError::Provider { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "overloaded");
        }
        other => panic!("unexpected error: {other}"),
    }
    mock.assert_async().await;

    // One failed logical call, latency recorded despite the failure
    let summary = usage.summarize();
    assert_eq!(summary.total_calls, 1);
    assert_eq!(summary.success_rate_percent, 0.0);
}

#[tokio::test]
async fn test_fatal_error_degrades_to_fallback_payload() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(400)
        .with_body(r#"{"error": {"code": 400, "message": "bad request"}}"#)
        .expect(1) // fatal: no retries
        .create_async()
        .await;

    let (gateway, _usage) = gateway_for(server.url());
    let fallback = json!({"recommendation": "review"});
    let value = gateway
        .generate_json("lease-analysis", "prompt", Modality::Text, None, fallback.clone())
        .await;

    assert_eq!(value, fallback);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fenced_model_output_is_extracted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(text_body("```json\n{\"compatibility_score\": 92}\n```"))
        .create_async()
        .await;

    let (gateway, _usage) = gateway_for(server.url());
    let value = gateway
        .generate_json("roommate-match", "prompt", Modality::Text, None, json!({}))
        .await;

    assert_eq!(value, json!({"compatibility_score": 92}));
}

#[tokio::test]
async fn test_unparseable_output_yields_fallback_not_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(text_body("I'm sorry, I can't produce JSON today."))
        .create_async()
        .await;

    let (gateway, usage) = gateway_for(server.url());
    let fallback = json!([{"candidate_id": 1}]);
    let value = gateway
        .generate_json("roommate-match", "prompt", Modality::Text, None, fallback.clone())
        .await;

    assert_eq!(value, fallback);
    // The provider call itself succeeded; extraction failure is not an error
    assert_eq!(usage.summarize().success_rate_percent, 100.0);
}
