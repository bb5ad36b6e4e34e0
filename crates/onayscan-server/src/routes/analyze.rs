//! Synchronous analysis and health routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

pub fn routes() -> Router<Arc<crate::state::AppState>> {
    Router::new()
        .route("/analyze", post(analyze_text))
        .route("/health", get(health))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
}

/// POST /api/analyze — analyze raw text synchronously.
async fn analyze_text(
    State(state): State<Arc<crate::state::AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let pipeline = state.pipeline.clone();
    match tokio::task::spawn_blocking(move || pipeline.analyze(&request.text)).await {
        Ok(result) => (StatusCode::OK, Json(serde_json::json!(result))),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("Analysis task failed: {}", e) })),
        ),
    }
}

/// GET /api/health — liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "onayscan",
    }))
}
