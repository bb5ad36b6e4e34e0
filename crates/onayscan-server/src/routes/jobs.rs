//! Analysis job status, result and report routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::{AppState, JobStatus};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/{job_id}", get(get_job))
        .route("/jobs/{job_id}/result", get(get_job_result))
        .route("/jobs/{job_id}/report", get(get_job_report))
}

/// GET /api/jobs — list all jobs, newest first.
async fn list_jobs(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let jobs = state.jobs.read();
    let mut all_jobs: Vec<&crate::state::AnalysisJob> = jobs.values().collect();
    all_jobs.sort_by(|a, b| b.queued_at.cmp(&a.queued_at));

    Json(serde_json::json!({
        "jobs": all_jobs,
        "total": all_jobs.len(),
    }))
}

/// GET /api/jobs/:jobId — status and progress of a single job.
async fn get_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let jobs = state.jobs.read();
    match jobs.get(&job_id) {
        Some(job) => (StatusCode::OK, Json(serde_json::json!(job))),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Job not found" })),
        ),
    }
}

/// GET /api/jobs/:jobId/result — the full analysis result.
async fn get_job_result(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let jobs = state.jobs.read();
    let Some(job) = jobs.get(&job_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Job not found" })),
        );
    };

    match (&job.status, &job.result) {
        (JobStatus::Completed, Some(result)) => {
            (StatusCode::OK, Json(serde_json::json!(result)))
        }
        (JobStatus::Error, _) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": job.error.clone().unwrap_or_else(|| "Analysis failed".to_string()),
            })),
        ),
        _ => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "status": job.status,
                "progress": job.progress,
            })),
        ),
    }
}

/// GET /api/jobs/:jobId/report — the plain-text report as an attachment.
async fn get_job_report(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    let jobs = state.jobs.read();
    let report = jobs
        .get(&job_id)
        .and_then(|job| job.result.as_ref())
        .map(|result| result.report.clone());

    match report {
        Some(report) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"analiz_raporu.txt\"".to_string(),
                ),
            ],
            report,
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Report not available" })),
        )
            .into_response(),
    }
}
