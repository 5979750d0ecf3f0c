// Generation gateway: the single choke point for outbound Gemini calls

mod extract;

pub use extract::extract_json;

use crate::analytics::UsageLog;
use crate::cache::ResponseCache;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::gemini::GeminiClient;
use crate::metrics;
use crate::models::chat::ChatTurn;
use crate::models::gemini::{GenerateContentRequest, Part};
use crate::quota::QuotaTracker;
use crate::utils::retry::RetryPolicy;
use crate::vision;
use futures::stream::Stream;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

/// How a call's content is assembled: pure text, or text plus one image.
/// Modality never changes the resilience wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Vision,
}

impl Modality {
    fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Vision => "vision",
        }
    }
}

/// Wraps every outbound model call with cache, quota and retry, in that
/// nesting order: the cache is outermost, so a cache hit bypasses quota and
/// retry entirely and consumes no budget. Usage telemetry is recorded inside
/// the cache's compute closure — only real provider calls are measured.
pub struct AdviceGateway {
    client: Arc<GeminiClient>,
    quota: QuotaTracker,
    retry: RetryPolicy,
    cache: ResponseCache,
    usage: Arc<UsageLog>,
    cache_ttl: Duration,
}

impl AdviceGateway {
    pub fn new(config: &AppConfig, client: Arc<GeminiClient>, usage: Arc<UsageLog>) -> Self {
        Self {
            client,
            quota: QuotaTracker::new(config.quota.clone()),
            retry: RetryPolicy::new(config.retry.clone()),
            cache: ResponseCache::new(config.cache.clone()),
            usage,
            cache_ttl: Duration::from_secs(config.cache.ttl_seconds),
        }
    }

    /// Text-modality call returning raw model output.
    pub async fn generate(&self, feature: &str, prompt: &str) -> Result<String> {
        self.generate_with(feature, prompt, Modality::Text, None).await
    }

    /// Full call: cache lookup, then quota-admitted retried provider call.
    pub async fn generate_with(
        &self,
        feature: &str,
        prompt: &str,
        modality: Modality,
        image: Option<&[u8]>,
    ) -> Result<String> {
        let parts = assemble_parts(prompt, modality, image)?;
        let request = GenerateContentRequest::from_prompt(parts);

        // Key on the call identity, not the multi-megabyte image body
        let image_digest = image.map(digest_bytes).unwrap_or_default();
        let key = ResponseCache::cache_key(&[feature, prompt, modality.as_str(), &image_digest]);

        let gateway = self;
        let request = &request;
        self.cache
            .get_or_compute(&key, self.cache_ttl, move || async move {
                let client = &gateway.client;
                let started = Instant::now();

                let result = gateway
                    .retry
                    .execute(feature, &gateway.quota, move || async move {
                        let response = client.generate_content(request).await?;
                        Ok(response.text())
                    })
                    .await;

                // Latency is recorded on success and failure alike
                let latency = started.elapsed().as_secs_f64();
                gateway.usage.record(feature, result.is_ok(), latency);
                metrics::record_gemini_call(feature, result.is_ok(), false, latency);

                result
            })
            .await
    }

    /// Call the model and extract a JSON payload, degrading to `fallback` on
    /// provider failure or unparseable output. Callers always receive a
    /// well-shaped value.
    pub async fn generate_json(
        &self,
        feature: &str,
        prompt: &str,
        modality: Modality,
        image: Option<&[u8]>,
        fallback: Value,
    ) -> Value {
        match self.generate_with(feature, prompt, modality, image).await {
            Ok(text) => match extract_json(&text) {
                Some(value) => value,
                None => {
                    warn!("{}: model output not parseable as JSON, using fallback", feature);
                    fallback
                }
            },
            Err(e) => {
                warn!("{}: provider call failed ({}), using fallback", feature, e);
                fallback
            }
        }
    }

    /// Open a streamed chat turn.
    ///
    /// Streaming bypasses the cache and retry (the stream is finite and not
    /// restartable) but still admits quota once per turn. The caller reports
    /// the turn's outcome via [`record_stream_outcome`](Self::record_stream_outcome)
    /// once the stream is drained.
    pub async fn stream_chat(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String>> + Send>>> {
        self.quota.admit()?;
        self.client.stream_chat(message, history).await
    }

    /// Record telemetry for a completed (or aborted) streamed turn.
    pub fn record_stream_outcome(&self, feature: &str, success: bool, latency_seconds: f64) {
        self.usage.record(feature, success, latency_seconds);
        metrics::record_gemini_call(feature, success, true, latency_seconds);
    }

    /// Aggregate usage view, exposed to the analytics endpoint.
    pub fn usage_summary(&self) -> crate::analytics::UsageSummary {
        self.usage.summarize()
    }

    /// Response cache statistics.
    pub async fn cache_stats(&self) -> crate::cache::CacheStats {
        self.cache.get_stats().await
    }
}

fn assemble_parts(prompt: &str, modality: Modality, image: Option<&[u8]>) -> Result<Vec<Part>> {
    match modality {
        Modality::Text => Ok(vec![Part::text(prompt)]),
        Modality::Vision => {
            let bytes = image.ok_or_else(|| {
                AppError::InvalidRequest("vision call without image data".to_string())
            })?;
            let inline_data = vision::encode_image(bytes)?;
            Ok(vec![Part::text(prompt), Part::InlineData { inline_data }])
        }
    }
}

fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
