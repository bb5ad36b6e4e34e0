//! Document upload routes.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::state::{now_millis, AnalysisJob, AnalysisRequest, AppState, JobStatus};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/documents/upload", post(upload_documents))
}

/// POST /api/documents/upload — upload documents (multipart) and queue
/// each for analysis.
async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut uploaded = Vec::new();
    let mut errors = Vec::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        let safe_filename = sanitize_filename(&filename);
        let upload_path = state.config.data_paths.uploads.join(&safe_filename);

        match field.bytes().await {
            Ok(bytes) => {
                // Handle duplicate filenames
                let final_path = if upload_path.exists() {
                    let stem = std::path::Path::new(&safe_filename)
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("belge");
                    let ext = std::path::Path::new(&safe_filename)
                        .extension()
                        .and_then(|e| e.to_str())
                        .unwrap_or("");
                    let ts = chrono::Utc::now().format("%Y%m%d%H%M%S");
                    let new_name = if ext.is_empty() {
                        format!("{}_{}", stem, ts)
                    } else {
                        format!("{}_{}.{}", stem, ts, ext)
                    };
                    state.config.data_paths.uploads.join(new_name)
                } else {
                    upload_path
                };

                match std::fs::write(&final_path, &bytes) {
                    Ok(()) => {
                        let final_filename = final_path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("")
                            .to_string();
                        let file_path = final_path.to_string_lossy().to_string();

                        let job_id = uuid::Uuid::new_v4().to_string();
                        let job = AnalysisJob {
                            id: job_id.clone(),
                            filename: final_filename.clone(),
                            file_path: file_path.clone(),
                            status: JobStatus::Pending,
                            progress: 0,
                            result: None,
                            error: None,
                            queued_at: now_millis(),
                            started_at: None,
                            completed_at: None,
                        };
                        state.jobs.write().insert(job_id.clone(), job);

                        let _ = state.analysis_tx.send(AnalysisRequest {
                            job_id: job_id.clone(),
                            file_path,
                            filename: final_filename.clone(),
                        });

                        uploaded.push(serde_json::json!({
                            "filename": final_filename,
                            "size": bytes.len(),
                            "jobId": job_id,
                        }));
                    }
                    Err(e) => {
                        errors.push(serde_json::json!({
                            "filename": safe_filename,
                            "error": format!("Write failed: {}", e),
                        }));
                    }
                }
            }
            Err(e) => {
                errors.push(serde_json::json!({
                    "filename": safe_filename,
                    "error": format!("Read failed: {}", e),
                }));
            }
        }
    }

    Json(serde_json::json!({
        "uploaded": uploaded,
        "errors": errors,
    }))
}

/// Sanitize a filename to prevent path traversal.
fn sanitize_filename(name: &str) -> String {
    let name = name.replace('/', "").replace('\\', "").replace("..", "");

    std::path::Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("belge")
        .to_string()
}
