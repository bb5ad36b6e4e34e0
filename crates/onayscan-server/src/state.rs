//! Shared application state.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::mpsc;

use onayscan_approval::ApprovalLadder;
use onayscan_core::OnayscanConfig;
use onayscan_pipeline::{AnalysisPipeline, AnalysisResult};
use onayscan_risk::RiskLexicon;

/// Analysis job record. The result is kept in memory but never embedded
/// in job listings; clients fetch it from the result endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisJob {
    pub id: String,
    pub filename: String,
    #[serde(skip_serializing)]
    pub file_path: String,
    pub status: JobStatus,
    pub progress: u8,
    #[serde(skip_serializing)]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub queued_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Analyzing,
    Completed,
    Error,
}

/// A request to analyze an uploaded document.
pub struct AnalysisRequest {
    pub job_id: String,
    pub file_path: String,
    pub filename: String,
}

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: OnayscanConfig,
    pub pipeline: AnalysisPipeline,
    pub jobs: RwLock<HashMap<String, AnalysisJob>>,
    pub analysis_tx: mpsc::UnboundedSender<AnalysisRequest>,
    analysis_rx: parking_lot::Mutex<Option<mpsc::UnboundedReceiver<AnalysisRequest>>>,
}

impl AppState {
    pub fn new(config: OnayscanConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let lexicon = RiskLexicon::load(config.lexicon_path.as_deref());
        let ladder = ApprovalLadder::load(config.tiers_path.as_deref());
        let pipeline = AnalysisPipeline::new(lexicon, ladder);

        Self {
            config,
            pipeline,
            jobs: RwLock::new(HashMap::new()),
            analysis_tx: tx,
            analysis_rx: parking_lot::Mutex::new(Some(rx)),
        }
    }

    /// Take the analysis receiver (can only be called once, by the worker).
    pub fn take_analysis_rx(&self) -> Option<mpsc::UnboundedReceiver<AnalysisRequest>> {
        self.analysis_rx.lock().take()
    }
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
