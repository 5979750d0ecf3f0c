// Gemini API client (API-key auth, generativelanguage.googleapis.com)

use crate::config::GeminiConfig;
use crate::error::{AppError, Result};
use crate::models::chat::ChatTurn;
use crate::models::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, Part,
};
use crate::utils::logging::sanitize;
use futures::stream::{Stream, StreamExt};
use reqwest::Client;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the Google Gemini generative-language API.
///
/// Handles request signing (API key header) and both blocking and streaming
/// content generation. Resilience (quota, retry, caching) is layered on top
/// by the gateway; this client reports failures as-is.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client with a pooled HTTP client tuned for
    /// long-lived streaming responses.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AppError::Config(
                "gemini.api_key is not set (use STUDZO_GEMINI_API_KEY)".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Model name used for all calls.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self, verb: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base_url, self.config.model, verb
        )
    }

    /// Call Gemini `generateContent` (blocking, single response).
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint("generateContent");
        debug!("Calling generateContent for model {}", self.config.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = Self::extract_error_message(&error_text)
                .unwrap_or_else(|| error_text.clone());
            error!(
                "Gemini API error: HTTP {} - {}",
                status,
                sanitize(&message)
            );
            return Err(AppError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::Provider {
                status: 502,
                message: format!("Invalid response body: {}", e),
            })
    }

    /// Stream a chat reply as text chunks.
    ///
    /// `history` is the ordered prior conversation; `message` becomes the
    /// final user turn. The returned stream is finite and not restartable.
    pub async fn stream_chat(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String>> + Send>>> {
        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part::text(message)],
        });

        let request = GenerateContentRequest {
            contents,
            system_instruction: None,
            generation_config: None,
        };

        let url = format!("{}?alt=sse", self.endpoint("streamGenerateContent"));
        let body = serde_json::to_string(&request)?;

        let responses = super::streaming::stream_generate_content(
            &self.http_client,
            url,
            body,
            &self.config.api_key,
        )
        .await?;

        // Flatten response chunks to their text; drop empty keep-alive chunks
        let chunks = responses.filter_map(|result| async move {
            match result {
                Ok(response) => {
                    let text = response.text();
                    if text.is_empty() {
                        None
                    } else {
                        Some(Ok(text))
                    }
                }
                Err(e) => Some(Err(e)),
            }
        });

        Ok(Box::pin(chunks))
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            GeminiClient::extract_error_message(body).unwrap(),
            "Resource exhausted"
        );
        assert!(GeminiClient::extract_error_message("not json").is_none());
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let config = GeminiConfig::default();
        assert!(GeminiClient::new(&config).is_err());
    }
}
