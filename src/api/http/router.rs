// src/api/http/router.rs
// HTTP router composition for the visit endpoints

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    analyze_url_handler, health_handler, ingest_content_handler, log_visit_handler, logs_handler,
    stats_handler,
};
use crate::state::AppState;

/// Main router. The browser extension posts cross-origin, so CORS is open.
pub fn http_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        // Visits
        .route("/log-visit", post(log_visit_handler))
        .route("/logs", get(logs_handler))
        .route("/analyze-url", post(analyze_url_handler))
        .route("/stats", get(stats_handler))
        // Legacy
        .route("/ingest-content", post(ingest_content_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
