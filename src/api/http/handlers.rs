// src/api/http/handlers.rs
// Visit logging, ad-hoc analysis, stats and the legacy ingest endpoint

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::api::types::{
    AnalyzeUrlResponse, IngestContentRequest, IngestContentResponse, LogVisitResponse, VisitError,
    visit_from_body,
};
use crate::state::AppState;
use crate::visits::{StoredVisit, VisitStats};

/// Health check handler
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "backend": state.gateway().name(),
    }))
}

/// POST /log-visit: analyze and conditionally keep a visit
pub async fn log_visit_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<LogVisitResponse>> {
    let Json(body) = body?;
    info!("Received visit metadata: {}", body);

    let visit = visit_from_body(body, true).map_err(|e| match e {
        VisitError::MissingFields(_) => ApiError::bad_request("Missing required fields"),
        other => ApiError::bad_request(other.to_string()),
    })?;

    let analysis = state.analyzer.analyze(&visit).await;
    let saved = analysis.should_add;

    // Store implementations are allowed to block
    let store = state.store.clone();
    let recorded = analysis.clone();
    tokio::task::spawn_blocking(move || store.record(visit, recorded))
        .await
        .into_internal_error("Failed to process visit")?;

    Ok(Json(LogVisitResponse {
        status: "processed".to_string(),
        analysis,
        saved,
        total_saved: state.store.len(),
    }))
}

/// GET /logs: every stored visit, oldest first
pub async fn logs_handler(State(state): State<AppState>) -> Json<Vec<StoredVisit>> {
    Json(state.store.list_all())
}

/// POST /analyze-url: run the pipeline without storing anything
pub async fn analyze_url_handler(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<AnalyzeUrlResponse>> {
    let Json(body) = body?;

    let visit = visit_from_body(body, false).map_err(|e| match e {
        VisitError::MissingFields(_) => {
            ApiError::bad_request("Missing required fields: url, domain, title")
        }
        other => ApiError::bad_request(other.to_string()),
    })?;

    let analysis = state.analyzer.analyze(&visit).await;
    Ok(Json(AnalyzeUrlResponse {
        analysis,
        input: visit,
    }))
}

/// GET /stats: totals, per-type counts and the first saves
pub async fn stats_handler(State(state): State<AppState>) -> Json<VisitStats> {
    if state.store.is_empty() {
        return Json(VisitStats::default());
    }
    Json(state.store.stats())
}

/// POST /ingest-content: hand raw content straight to the backend
pub async fn ingest_content_handler(
    State(state): State<AppState>,
    body: Result<Json<IngestContentRequest>, JsonRejection>,
) -> ApiResult<Json<IngestContentResponse>> {
    let Json(request) = body.unwrap_or_else(|rejection| {
        warn!("Unreadable ingest body: {}", rejection.body_text());
        Json(IngestContentRequest::default())
    });

    let content = request
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Content is required"))?;

    let response = state
        .gateway()
        .complete(&content)
        .await
        .into_internal_error("Failed to process content")?;

    Ok(Json(IngestContentResponse {
        status: "processed".to_string(),
        response,
    }))
}
