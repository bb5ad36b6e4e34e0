//! OnayScan Risk — categorized risk phrase detection over decision text.

pub mod detector;
pub mod lexicon;

pub use detector::{RiskDetector, RiskFinding};
pub use lexicon::RiskLexicon;
