// Gemini client tests against a mock HTTP server

use studzo_backend::config::GeminiConfig;
use studzo_backend::error::AppError;
use studzo_backend::gemini::GeminiClient;
use studzo_backend::models::gemini::{GenerateContentRequest, Part};

fn test_config(base_url: String) -> GeminiConfig {
    GeminiConfig {
        api_key: "test-key".to_string(),
        api_base_url: base_url,
        model: "gemini-2.0-flash".to_string(),
        timeout_seconds: 5,
    }
}

fn prompt_request(text: &str) -> GenerateContentRequest {
    GenerateContentRequest::from_prompt(vec![Part::text(text)])
}

#[tokio::test]
async fn test_generate_content_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "Hello!"}]}, "finishReason": "STOP"}]}"#,
        )
        .create_async()
        .await;

    let client = GeminiClient::new(&test_config(server.url())).unwrap();
    let response = client.generate_content(&prompt_request("hi")).await.unwrap();

    assert_eq!(response.text(), "Hello!");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_content_surfaces_provider_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(429)
        .with_body(r#"{"error": {"code": 429, "message": "Resource exhausted"}}"#)
        .create_async()
        .await;

    let client = GeminiClient::new(&test_config(server.url())).unwrap();
    let err = client
        .generate_content(&prompt_request("hi"))
        .await
        .unwrap_err();

    match err {
        AppError::Provider { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Resource exhausted");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_generate_content_rejects_bad_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = GeminiClient::new(&test_config(server.url())).unwrap();
    let err = client
        .generate_content(&prompt_request("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Provider { status: 502, .. }));
}
