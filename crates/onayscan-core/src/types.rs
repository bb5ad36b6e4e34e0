//! Shared domain types for the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Currencies recognized in the source documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Try,
    Rub,
}

impl Currency {
    /// Parse an ISO-like code, case-insensitive. Unknown codes are `None`.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "EUR" => Some(Self::Eur),
            "TRY" => Some(Self::Try),
            "RUB" => Some(Self::Rub),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Try => "TRY",
            Self::Rub => "RUB",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// An extracted amount with its currency. Amount is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MonetaryValue {
    pub amount: f64,
    pub currency: Currency,
}

impl MonetaryValue {
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero USD — the documented "value not found" outcome.
    pub fn none_found() -> Self {
        Self::default()
    }
}

/// Purchase type as declared on the approval form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseType {
    Spot,
    Recurring,
    #[default]
    Unspecified,
}

impl PurchaseType {
    /// Label as it appears in reports (Turkish form labels).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Spot => "Spot",
            Self::Recurring => "Sürekli",
            Self::Unspecified => "Belirsiz",
        }
    }
}

/// Risk categories tracked by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Commercial,
    Ethical,
    Legal,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [Self::Commercial, Self::Ethical, Self::Legal];

    /// Label as it appears in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Commercial => "Ticari Risk",
            Self::Ethical => "Etik Risk",
            Self::Legal => "Yasal Risk",
        }
    }
}

/// Severity tier of a finding. Ordering is Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Numeric score used in explanations (1=Low, 2=Medium, 3=High).
    pub fn score(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Düşük",
            Self::Medium => "Orta",
            Self::High => "Yüksek",
        }
    }
}
