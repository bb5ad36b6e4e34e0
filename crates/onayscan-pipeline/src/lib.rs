//! OnayScan Pipeline — composes extraction, risk detection, summarization
//! and approval resolution into one document analysis.

pub mod analyzer;
pub mod report;
pub mod structured;
pub mod types;

pub use analyzer::AnalysisPipeline;
pub use structured::{StructuredSummary, FIELD_NOT_FOUND};
pub use types::AnalysisResult;
