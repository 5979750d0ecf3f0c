// Gemini SSE streaming client

use crate::error::{AppError, Result};
use crate::models::gemini::GenerateContentResponse;
use futures::stream::Stream;
use reqwest::Client;
use std::pin::Pin;
use tracing::{debug, warn};

/// Open a `streamGenerateContent` SSE stream and parse it into response chunks.
pub async fn stream_generate_content(
    client: &Client,
    url: String,
    request_body: String,
    api_key: &str,
) -> Result<Pin<Box<dyn Stream<Item = Result<GenerateContentResponse>> + Send>>> {
    debug!("Starting Gemini SSE stream");

    let response = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .header("Accept", "text/event-stream")
        .body(request_body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::Provider {
            status: status.as_u16(),
            message: error_text,
        });
    }

    let byte_stream = response.bytes_stream();
    let event_stream = parse_sse_stream(byte_stream);

    Ok(Box::pin(event_stream))
}

/// Parse SSE byte stream into GenerateContentResponse chunks
fn parse_sse_stream<S>(
    byte_stream: S,
) -> impl Stream<Item = Result<GenerateContentResponse>> + Send
where
    S: Stream<Item = reqwest::Result<bytes::Bytes>> + Send + 'static,
{
    use futures::StreamExt;

    async_stream::stream! {
        let mut buffer = String::new();

        futures::pin_mut!(byte_stream);

        while let Some(chunk_result) = byte_stream.next().await {
            match chunk_result {
                Ok(chunk) => {
                    buffer.push_str(&String::from_utf8_lossy(&chunk));

                    // Process complete events (terminated by \n\n)
                    while let Some(event_end) = buffer.find("\n\n") {
                        let event_data = buffer[..event_end].to_string();
                        buffer = buffer[event_end + 2..].to_string();

                        if let Some(response) = parse_sse_event(&event_data) {
                            yield Ok(response);
                        }
                    }
                }
                Err(e) => {
                    warn!("Stream error: {}", e);
                    yield Err(AppError::from(e));
                    break;
                }
            }
        }

        // The final event may arrive without a trailing \n\n
        if !buffer.trim().is_empty() {
            if let Some(response) = parse_sse_event(&buffer) {
                yield Ok(response);
            }
        }

        debug!("Gemini SSE stream ended");
    }
}

/// Parse a single SSE event into GenerateContentResponse
fn parse_sse_event(event_data: &str) -> Option<GenerateContentResponse> {
    // SSE format: "event: <name>\ndata: <json>" or just "data: <json>"
    let mut data_line = None;
    for line in event_data.lines() {
        if let Some(data) = line.strip_prefix("data:") {
            data_line = Some(data.trim());
        }
    }

    let data = data_line?;
    if data.is_empty() || data == "[DONE]" {
        return None;
    }

    match serde_json::from_str::<GenerateContentResponse>(data) {
        Ok(response) => Some(response),
        Err(e) => {
            warn!("Failed to parse SSE event: {}", e);
            None
        }
    }
}
