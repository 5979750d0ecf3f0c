// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, CACHE_ENTRIES, CACHE_OPERATIONS, GEMINI_API_CALLS, GEMINI_API_DURATION,
    QUOTA_REJECTIONS, WS_CONNECTIONS, WS_DELIVERIES,
};

/// Helper to record a Gemini API call outcome
pub fn record_gemini_call(feature: &str, success: bool, streaming: bool, duration_secs: f64) {
    let outcome = if success { "success" } else { "failure" };
    GEMINI_API_CALLS
        .with_label_values(&[feature, outcome, &streaming.to_string()])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[feature, &streaming.to_string()])
        .observe(duration_secs);
}

/// Helper to record a quota rejection
pub fn record_quota_rejection(scope: &str) {
    QUOTA_REJECTIONS.with_label_values(&[scope]).inc();
}

/// Helpers to record response cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.with_label_values(&["active"]).set(count as f64);
}

/// Helpers to record WebSocket activity
pub fn record_ws_connection(status: &str) {
    WS_CONNECTIONS.with_label_values(&[status]).inc();
}

pub fn record_ws_delivery(success: bool) {
    let status = if success { "sent" } else { "failed" };
    WS_DELIVERIES.with_label_values(&[status]).inc();
}
