//! Background analysis queue — processes uploaded documents one by one.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::state::{now_millis, AnalysisRequest, AppState, JobStatus};

/// Start the background analysis worker task.
pub fn start_analysis_worker(state: Arc<AppState>) {
    let mut rx = match state.take_analysis_rx() {
        Some(rx) => rx,
        None => {
            error!("Analysis worker already started");
            return;
        }
    };

    tokio::spawn(async move {
        info!("Background analysis worker started");
        while let Some(request) = rx.recv().await {
            let worker_state = state.clone();
            let joined = tokio::task::spawn_blocking(move || {
                process_analysis_job(&worker_state, &request);
            })
            .await;
            if let Err(e) = joined {
                error!("Analysis task panicked: {}", e);
            }
        }
    });
}

fn process_analysis_job(state: &AppState, request: &AnalysisRequest) {
    {
        let mut jobs = state.jobs.write();
        if let Some(job) = jobs.get_mut(&request.job_id) {
            job.status = JobStatus::Analyzing;
            job.progress = 25;
            job.started_at = Some(now_millis());
        }
    }

    info!("Processing analysis job {}: {}", request.job_id, request.filename);

    let path = Path::new(&request.file_path);
    match state.pipeline.analyze_file(path) {
        Ok(result) => {
            {
                let mut jobs = state.jobs.write();
                if let Some(job) = jobs.get_mut(&request.job_id) {
                    job.progress = 75;
                }
            }
            let mut jobs = state.jobs.write();
            if let Some(job) = jobs.get_mut(&request.job_id) {
                job.status = JobStatus::Completed;
                job.progress = 100;
                job.result = Some(result);
                job.completed_at = Some(now_millis());
            }
            info!("Analyzed {}", request.filename);
        }
        Err(e) => {
            let mut jobs = state.jobs.write();
            if let Some(job) = jobs.get_mut(&request.job_id) {
                job.status = JobStatus::Error;
                job.progress = 100;
                job.error = Some(e.to_string());
                job.completed_at = Some(now_millis());
            }
            warn!("Analysis failed for {}: {}", request.filename, e);
        }
    }

    // Uploads are transient; remove the file once analyzed
    if let Err(e) = std::fs::remove_file(path) {
        warn!("Could not remove upload {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AnalysisJob;
    use onayscan_core::{DataPaths, OnayscanConfig};

    fn state_for(dir: &Path) -> AppState {
        let config = OnayscanConfig {
            port: 0,
            data_paths: DataPaths::new(dir).unwrap(),
            lexicon_path: None,
            tiers_path: None,
        };
        AppState::new(config)
    }

    fn queue_job(state: &AppState, job_id: &str, path: &Path) -> AnalysisRequest {
        let file_path = path.to_string_lossy().into_owned();
        state.jobs.write().insert(
            job_id.to_string(),
            AnalysisJob {
                id: job_id.to_string(),
                filename: "belge.txt".to_string(),
                file_path: file_path.clone(),
                status: JobStatus::Pending,
                progress: 0,
                result: None,
                error: None,
                queued_at: now_millis(),
                started_at: None,
                completed_at: None,
            },
        );
        AnalysisRequest {
            job_id: job_id.to_string(),
            file_path,
            filename: "belge.txt".to_string(),
        }
    }

    #[test]
    fn test_job_completes_and_upload_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let upload = dir.path().join("uploads").join("belge.txt");
        let state = state_for(dir.path());
        std::fs::write(
            &upload,
            "SATINALMA KARARI\nToplam Alım Değeri 94.629,56 USD\nAlım onaylanmıştır.\n",
        )
        .unwrap();

        let request = queue_job(&state, "job-1", &upload);
        process_analysis_job(&state, &request);

        let jobs = state.jobs.read();
        let job = jobs.get("job-1").unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
        assert!(job.started_at.is_some());
        assert!(job.completed_at.is_some());
        let result = job.result.as_ref().unwrap();
        assert!(result.report.contains("SATINALMA SÜRECİ ANALİZ RAPORU"));
        assert!(!upload.exists());
    }

    #[test]
    fn test_missing_upload_marks_job_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());
        let missing = dir.path().join("uploads").join("kayip.txt");

        let request = queue_job(&state, "job-2", &missing);
        process_analysis_job(&state, &request);

        let jobs = state.jobs.read();
        let job = jobs.get("job-2").unwrap();
        assert_eq!(job.status, JobStatus::Error);
        assert_eq!(job.progress, 100);
        assert!(job.result.is_none());
        assert!(job.error.is_some());
    }
}
