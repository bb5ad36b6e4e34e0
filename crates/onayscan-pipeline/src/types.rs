//! The aggregate analysis result.

use serde::Serialize;

use onayscan_approval::ApprovalDecision;
use onayscan_core::{MonetaryValue, PurchaseType};
use onayscan_risk::RiskFinding;

use crate::structured::StructuredSummary;

/// Everything the pipeline produces for one document. Serialized as-is in
/// API responses; `report` is the plain-text rendering of the same data.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub decision_text: String,
    pub decision_summary: String,
    pub structured_summary: StructuredSummary,
    pub findings: Vec<RiskFinding>,
    pub total_value: MonetaryValue,
    pub total_value_formatted: String,
    pub purchase_type: PurchaseType,
    pub contract_duration_months: u32,
    pub approval: ApprovalDecision,
    pub report: String,
}
