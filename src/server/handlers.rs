// HTTP request handlers

use super::routes::AppState;
use crate::error::AppError;
use axum::{extract::State, Json};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();

    checks.insert(
        "configuration".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Model: {}", state.config.gemini.model),
        },
    );

    let cache_stats = state.gateway.cache_stats().await;
    checks.insert(
        "response_cache".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "hits={} misses={} stores={}",
                cache_stats.hits, cache_stats.misses, cache_stats.stores
            ),
        },
    );

    let usage = state.gateway.usage_summary();
    checks.insert(
        "gemini_calls".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!(
                "total={} success_rate={}%",
                usage.total_calls, usage.success_rate_percent
            ),
        },
    );

    Json(HealthResponse {
        status: HealthStatus::Healthy,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> String {
    crate::metrics::gather_metrics()
}

pub async fn analytics_handler(State(state): State<AppState>) -> Json<crate::analytics::UsageSummary> {
    Json(state.gateway.usage_summary())
}

#[derive(Debug, Deserialize)]
pub struct RoommateMatchRequest {
    pub user_profile: Value,
    #[serde(default)]
    pub candidates: Vec<Value>,
}

pub async fn roommate_match_handler(
    State(state): State<AppState>,
    Json(req): Json<RoommateMatchRequest>,
) -> Json<Value> {
    Json(
        state
            .advice
            .roommate_match(&req.user_profile, &req.candidates)
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct LeaseAnalysisRequest {
    pub text: String,
    /// Base64-encoded photo of a lease page; switches the call to vision.
    #[serde(default)]
    pub image_base64: Option<String>,
}

pub async fn lease_analysis_handler(
    State(state): State<AppState>,
    Json(req): Json<LeaseAnalysisRequest>,
) -> Result<Json<Value>, AppError> {
    let image = match &req.image_base64 {
        Some(encoded) => Some(
            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| AppError::InvalidRequest(format!("Invalid base64 image data: {}", e)))?,
        ),
        None => None,
    };

    Ok(Json(
        state
            .advice
            .lease_analysis(&req.text, image.as_deref())
            .await,
    ))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FinancialGuidanceRequest {
    pub host_country: String,
    pub home_country: String,
    pub length: String,
    pub income: f64,
    pub expenses: f64,
    pub rent: f64,
    pub food: f64,
    pub other: f64,
    pub budget: f64,
    #[serde(default)]
    pub query: String,
}

pub async fn financial_guidance_handler(
    State(state): State<AppState>,
    Json(req): Json<FinancialGuidanceRequest>,
) -> Result<Json<Value>, AppError> {
    let profile = serde_json::to_value(&req)?;
    Ok(Json(state.advice.financial_guidance(&profile).await))
}

#[derive(Debug, Deserialize)]
pub struct CulturalGuidanceRequest {
    pub home_country: String,
    pub host_country: String,
    pub university: String,
    pub week: u32,
    pub challenges: String,
}

pub async fn cultural_guidance_handler(
    State(state): State<AppState>,
    Json(req): Json<CulturalGuidanceRequest>,
) -> Json<Value> {
    Json(
        state
            .advice
            .cultural_guidance(
                &req.home_country,
                &req.host_country,
                &req.university,
                req.week,
                &req.challenges,
            )
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct CulturalDiscoveryRequest {
    pub home_country: String,
    pub host_country: String,
    pub city: String,
    pub date_range: String,
}

pub async fn cultural_discovery_handler(
    State(state): State<AppState>,
    Json(req): Json<CulturalDiscoveryRequest>,
) -> Json<Value> {
    Json(
        state
            .advice
            .cultural_discovery(&req.home_country, &req.host_country, &req.city, &req.date_range)
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct FinancialRiskRequest {
    pub text: String,
}

pub async fn financial_risk_handler(
    State(state): State<AppState>,
    Json(req): Json<FinancialRiskRequest>,
) -> Json<Value> {
    Json(state.advice.financial_risk(&req.text).await)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommunityRecRequest {
    pub country: String,
    pub interests: String,
    pub university: String,
    pub budget: f64,
    pub loneliness: u32,
    pub weeks: u32,
    #[serde(default = "default_hours_per_week")]
    pub hours_per_week: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub events: Vec<Value>,
}

fn default_hours_per_week() -> u32 {
    5
}

pub async fn community_recommendations_handler(
    State(state): State<AppState>,
    Json(req): Json<CommunityRecRequest>,
) -> Result<Json<Value>, AppError> {
    let profile = serde_json::to_value(&req)?;
    Ok(Json(state.advice.community_recommendations(&profile).await))
}

#[derive(Debug, Deserialize)]
pub struct CommunityConnectRequest {
    pub user_profile: Value,
    #[serde(default)]
    pub query: String,
}

pub async fn community_connect_handler(
    State(state): State<AppState>,
    Json(req): Json<CommunityConnectRequest>,
) -> Json<Value> {
    Json(state.advice.community_connect(&req.user_profile, &req.query).await)
}

#[derive(Debug, Deserialize)]
pub struct AskCommunityRequest {
    pub community_context: String,
    pub question: String,
}

pub async fn ask_community_handler(
    State(state): State<AppState>,
    Json(req): Json<AskCommunityRequest>,
) -> Json<Value> {
    Json(
        state
            .advice
            .ask_community(&req.community_context, &req.question)
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct JobFindRequest {
    pub user_profile: Value,
    #[serde(default)]
    pub query: String,
}

pub async fn job_finder_handler(
    State(state): State<AppState>,
    Json(req): Json<JobFindRequest>,
) -> Json<Value> {
    Json(state.advice.job_finder(&req.user_profile, &req.query).await)
}

#[derive(Debug, Deserialize)]
pub struct JobScamCheckRequest {
    pub text: String,
}

pub async fn job_scam_check_handler(
    State(state): State<AppState>,
    Json(req): Json<JobScamCheckRequest>,
) -> Json<Value> {
    Json(state.advice.job_scam_check(&req.text).await)
}

#[derive(Debug, Deserialize)]
pub struct HostelSearchRequest {
    pub query: String,
    #[serde(default = "default_filters")]
    pub filters: Value,
}

fn default_filters() -> Value {
    json!({})
}

pub async fn hostel_discovery_handler(
    State(state): State<AppState>,
    Json(req): Json<HostelSearchRequest>,
) -> Json<Value> {
    Json(state.advice.hostel_discovery(&req.query, &req.filters).await)
}

#[derive(Debug, Deserialize)]
pub struct EmergencySupportRequest {
    pub input_text: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

pub async fn emergency_support_handler(
    State(state): State<AppState>,
    Json(req): Json<EmergencySupportRequest>,
) -> Json<Value> {
    Json(
        state
            .advice
            .emergency_support(&req.input_text, &req.language)
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct NotificationRequest {
    pub user_id: i64,
    pub message: String,
    #[serde(default = "default_notification_type")]
    pub r#type: String,
}

fn default_notification_type() -> String {
    "info".to_string()
}

pub async fn send_notification_handler(
    State(state): State<AppState>,
    Json(req): Json<NotificationRequest>,
) -> Json<Value> {
    let payload = json!({"type": req.r#type, "message": req.message}).to_string();
    state.registry.send_to_user(req.user_id, &payload).await;
    Json(json!({"success": true}))
}
