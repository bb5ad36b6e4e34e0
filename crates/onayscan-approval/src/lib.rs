//! OnayScan Approval — tiered approval-authority resolution.

pub mod resolver;
pub mod tiers;

pub use resolver::{ApprovalDecision, ApprovalRequest, ApprovalResolver};
pub use tiers::ApprovalLadder;
