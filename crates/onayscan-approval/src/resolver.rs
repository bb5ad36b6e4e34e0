//! Approval resolution: override rules first, then annualization and the
//! tier ladder.

use serde::Serialize;
use tracing::debug;

use onayscan_core::{format_number_tr, Currency, PurchaseType};

use crate::tiers::ApprovalLadder;

/// Justification marker that escalates straight to the top authority.
pub const CONSULTING_TENDER: &str = "Danışmanlık İhalesi";
/// Justification marker that appends the "(minimum)" qualifier.
pub const FINANCIAL_LIMIT: &str = "Finansal Limit";

const NON_STANDARD_DURATION_MONTHS: u32 = 6;
const NON_STANDARD_VALUE: f64 = 150_000.0;

/// Inputs to one approval resolution.
#[derive(Debug, Clone)]
pub struct ApprovalRequest<'a> {
    pub total_value: f64,
    pub currency: Currency,
    pub purchase_type: PurchaseType,
    pub contract_duration_months: u32,
    pub justification: &'a str,
    pub standard_contract: bool,
}

/// The resolved authority with its reasoning trail.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalDecision {
    pub normalized_value: f64,
    pub currency: Currency,
    pub authority: String,
    pub reasoning: String,
    pub was_annualized: bool,
}

/// Maps a purchase to its required approval authority.
#[derive(Debug, Clone, Default)]
pub struct ApprovalResolver {
    ladder: ApprovalLadder,
}

impl ApprovalResolver {
    pub fn new(ladder: ApprovalLadder) -> Self {
        Self { ladder }
    }

    /// Resolve the approval authority. Rule order is fixed: the consulting
    /// tender override, the non-standard-contract override, then
    /// annualization plus tier lookup, then the financial-limit qualifier.
    pub fn resolve(&self, request: &ApprovalRequest<'_>) -> ApprovalDecision {
        if request.justification.contains(CONSULTING_TENDER) {
            return ApprovalDecision {
                normalized_value: request.total_value,
                currency: request.currency,
                authority: "Genel Müdür".to_string(),
                reasoning: format!(
                    "Yönetim Onay Gerekçesi '{CONSULTING_TENDER}' olduğu için tutar ne kadar \
                     olursa olsun Genel Müdür onayına çıkmalı"
                ),
                was_annualized: false,
            };
        }

        let over_duration = request.contract_duration_months > NON_STANDARD_DURATION_MONTHS;
        let over_value = request.total_value > NON_STANDARD_VALUE;
        if (over_duration || over_value) && !request.standard_contract {
            return ApprovalDecision {
                normalized_value: request.total_value,
                currency: request.currency,
                authority: "Minimum Direktör".to_string(),
                reasoning: format!(
                    "Sözleşme süresi {} ay > 6 ay veya tutar {} {} > 150.000 Euro olduğu ve \
                     matbu sözleşme yapılmayacağı için Minimum Direktör onayına çıkmalı",
                    request.contract_duration_months,
                    format_number_tr(request.total_value),
                    request.currency,
                ),
                was_annualized: false,
            };
        }

        let mut normalized = request.total_value;
        let mut was_annualized = false;
        let reasoning = match request.purchase_type {
            PurchaseType::Spot => {
                "Spot alım olduğu için toplam değer doğrudan kullanıldı".to_string()
            }
            PurchaseType::Recurring => {
                let months = request.contract_duration_months;
                if months > 0 && months < 12 {
                    normalized = (request.total_value / months as f64) * 12.0;
                    was_annualized = true;
                    format!("Sürekli alım ve {months} ay < 12 ay olduğu için yıllıklaştırıldı")
                } else if months >= 12 {
                    format!("Sürekli alım ve {months} ay ≥ 12 ay olduğu için toplam değer kullanıldı")
                } else {
                    "Sürekli alım ancak sözleşme süresi belirtilmemiş, toplam değer kullanıldı"
                        .to_string()
                }
            }
            PurchaseType::Unspecified => {
                "Alım tipi belirsiz, toplam değer kullanıldı".to_string()
            }
        };

        let mut authority = self.ladder.authority_for(normalized).to_string();
        if request.justification == FINANCIAL_LIMIT {
            authority.push_str(" (minimum)");
        }

        debug!(
            normalized,
            authority = %authority,
            annualized = was_annualized,
            "approval resolved"
        );

        ApprovalDecision {
            normalized_value: normalized,
            currency: request.currency,
            authority,
            reasoning,
            was_annualized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(value: f64, purchase_type: PurchaseType) -> ApprovalRequest<'static> {
        ApprovalRequest {
            total_value: value,
            currency: Currency::Usd,
            purchase_type,
            contract_duration_months: 0,
            justification: "",
            standard_contract: true,
        }
    }

    #[test]
    fn test_spot_direct_lookup() {
        let decision = ApprovalResolver::default().resolve(&request(50_000.0, PurchaseType::Spot));
        assert_eq!(decision.authority, "Müdür / Bölge Müdürü");
        assert_eq!(decision.normalized_value, 50_000.0);
        assert!(!decision.was_annualized);
        assert!(decision.reasoning.contains("Spot alım"));
    }

    #[test]
    fn test_recurring_annualization() {
        let mut req = request(10_000.0, PurchaseType::Recurring);
        req.contract_duration_months = 6;
        let decision = ApprovalResolver::default().resolve(&req);
        assert_eq!(decision.normalized_value, 20_000.0);
        assert!(decision.was_annualized);
        assert_eq!(decision.authority, "Müdür / Bölge Müdürü");
        assert!(decision.reasoning.contains("yıllıklaştırıldı"));
    }

    #[test]
    fn test_recurring_full_year_not_annualized() {
        let mut req = request(120_000.0, PurchaseType::Recurring);
        req.contract_duration_months = 24;
        let decision = ApprovalResolver::default().resolve(&req);
        assert_eq!(decision.normalized_value, 120_000.0);
        assert!(!decision.was_annualized);
    }

    #[test]
    fn test_recurring_unknown_duration() {
        let decision =
            ApprovalResolver::default().resolve(&request(8_000.0, PurchaseType::Recurring));
        assert_eq!(decision.normalized_value, 8_000.0);
        assert!(!decision.was_annualized);
        assert!(decision.reasoning.contains("belirtilmemiş"));
    }

    #[test]
    fn test_consulting_tender_override() {
        let mut req = request(500.0, PurchaseType::Spot);
        req.justification = "Danışmanlık İhalesi";
        let decision = ApprovalResolver::default().resolve(&req);
        assert_eq!(decision.authority, "Genel Müdür");
        assert!(decision.reasoning.contains("Danışmanlık İhalesi"));
    }

    #[test]
    fn test_non_standard_contract_override() {
        let mut req = request(200_000.0, PurchaseType::Spot);
        req.contract_duration_months = 8;
        req.standard_contract = false;
        let decision = ApprovalResolver::default().resolve(&req);
        assert_eq!(decision.authority, "Minimum Direktör");
        assert!(decision.reasoning.contains("matbu sözleşme yapılmayacağı"));
    }

    #[test]
    fn test_standard_contract_skips_override() {
        let mut req = request(200_000.0, PurchaseType::Spot);
        req.contract_duration_months = 8;
        let decision = ApprovalResolver::default().resolve(&req);
        assert_eq!(decision.authority, "Kıdemli Direktör");
    }

    #[test]
    fn test_financial_limit_qualifier() {
        let mut req = request(3_000.0, PurchaseType::Spot);
        req.justification = "Finansal Limit";
        let decision = ApprovalResolver::default().resolve(&req);
        assert_eq!(decision.authority, "Şef / Kategori Yöneticisi (minimum)");
    }

    #[test]
    fn test_consulting_beats_non_standard() {
        let mut req = request(200_000.0, PurchaseType::Spot);
        req.justification = "Danışmanlık İhalesi";
        req.standard_contract = false;
        req.contract_duration_months = 24;
        let decision = ApprovalResolver::default().resolve(&req);
        assert_eq!(decision.authority, "Genel Müdür");
    }
}
