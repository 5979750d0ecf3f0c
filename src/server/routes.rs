// HTTP routes configuration

use super::handlers::{
    analytics_handler, ask_community_handler, community_connect_handler,
    community_recommendations_handler, cultural_discovery_handler, cultural_guidance_handler,
    emergency_support_handler, financial_guidance_handler, financial_risk_handler,
    health_handler, hostel_discovery_handler, job_finder_handler, job_scam_check_handler,
    lease_analysis_handler, metrics_handler, roommate_match_handler, send_notification_handler,
};
use super::middleware::request_id_layers;
use super::ws::{chat_ws_handler, notifications_ws_handler};
use crate::advice::AdviceService;
use crate::config::AppConfig;
use crate::error::Result;
use crate::gateway::AdviceGateway;
use crate::ws::ConnectionRegistry;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gateway: Arc<AdviceGateway>,
    pub advice: Arc<AdviceService>,
    pub registry: Arc<ConnectionRegistry>,
}

pub fn create_router(config: AppConfig, gateway: Arc<AdviceGateway>) -> Result<Router> {
    let state = AppState {
        config,
        advice: Arc::new(AdviceService::new(gateway.clone())),
        registry: Arc::new(ConnectionRegistry::new()),
        gateway,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/ai/roommate-match", post(roommate_match_handler))
        .route("/api/ai/lease-analysis", post(lease_analysis_handler))
        .route("/api/ai/financial-guidance", post(financial_guidance_handler))
        .route("/api/ai/cultural-guidance", post(cultural_guidance_handler))
        .route("/api/ai/cultural-discovery", post(cultural_discovery_handler))
        .route("/api/ai/financial-risk", post(financial_risk_handler))
        .route("/api/ai/community-recommendations", post(community_recommendations_handler))
        .route("/api/ai/community-connect", post(community_connect_handler))
        .route("/api/ai/ask-community", post(ask_community_handler))
        .route("/api/ai/job-finder", post(job_finder_handler))
        .route("/api/ai/job-scam-check", post(job_scam_check_handler))
        .route("/api/ai/hostel-discovery", post(hostel_discovery_handler))
        .route("/api/ai/emergency-support", post(emergency_support_handler))
        .route("/api/ai/analytics", get(analytics_handler))
        .route("/api/ai/send-notification", post(send_notification_handler))
        .route("/api/ai/chat/:user_id", get(chat_ws_handler))
        .route("/api/ai/notifications/:user_id", get(notifications_ws_handler))
        // Allow large request bodies for base64-encoded lease photos
        .layer(tower_http::limit::RequestBodyLimitLayer::new(20 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
