//! OnayScan Core — shared domain types, error taxonomy, configuration.

pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::{DataPaths, OnayscanConfig};
pub use error::{Error, Result};
pub use format::format_number_tr;
pub use types::{Currency, MonetaryValue, PurchaseType, RiskCategory, Severity};
