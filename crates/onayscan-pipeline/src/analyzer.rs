//! The analysis pipeline: section location, summarization, risk scan,
//! value extraction and approval resolution composed over one document.

use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use onayscan_approval::{ApprovalLadder, ApprovalRequest, ApprovalResolver};
use onayscan_core::{format_number_tr, Error, Result};
use onayscan_extract::{
    contract_duration_months, management_justification, purchase_type, standard_contract,
    SectionLocator, ValueExtractor,
};
use onayscan_risk::{RiskDetector, RiskLexicon};
use onayscan_summarize::Summarizer;

use crate::report;
use crate::structured::StructuredSummary;
use crate::types::AnalysisResult;

/// Composed analyzer. Stateless between documents; safe to share.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    detector: RiskDetector,
    summarizer: Summarizer,
    resolver: ApprovalResolver,
}

impl AnalysisPipeline {
    pub fn new(lexicon: RiskLexicon, ladder: ApprovalLadder) -> Self {
        Self {
            detector: RiskDetector::new(lexicon),
            summarizer: Summarizer::new(),
            resolver: ApprovalResolver::new(ladder),
        }
    }

    /// Analyze one document text, stamping the report with the current
    /// local time.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        self.analyze_at(text, Local::now())
    }

    /// Extract text from a file and analyze it. Fails only when no text
    /// can be extracted; the analysis itself never fails.
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisResult> {
        let text = onayscan_extract::file::extract_text(path)?.ok_or_else(|| {
            Error::Extraction(format!("metin çıkarılamadı: {}", path.display()))
        })?;
        Ok(self.analyze(&text))
    }

    /// Analyze with an explicit timestamp. The same text and timestamp
    /// always produce a byte-identical result.
    pub fn analyze_at(&self, text: &str, timestamp: DateTime<Local>) -> AnalysisResult {
        let decision_text = SectionLocator::locate(text);
        let decision_clean = normalize_whitespace(&decision_text);

        let decision_summary = self.summarizer.summarize(&decision_clean);

        // no located section: build the structured summary from the whole
        // document instead of the sentinel text
        let structured_source = if decision_text == onayscan_extract::DECISION_NOT_FOUND {
            normalize_whitespace(text)
        } else {
            decision_clean.clone()
        };
        let structured_summary = StructuredSummary::extract(&structured_source);

        // risks, value and form fields come from the full text; the
        // decision section alone often lacks the form header rows
        let findings = self.detector.detect(text);
        let total_value = ValueExtractor::extract(text);
        let purchase_type = purchase_type(text);
        let contract_duration = contract_duration_months(text);
        let justification = management_justification(text);
        let standard = standard_contract(text);

        let approval = self.resolver.resolve(&ApprovalRequest {
            total_value: total_value.amount,
            currency: total_value.currency,
            purchase_type,
            contract_duration_months: contract_duration,
            justification: &justification,
            standard_contract: standard,
        });

        debug!(
            amount = total_value.amount,
            currency = %total_value.currency,
            findings = findings.len(),
            "document analyzed"
        );

        let mut result = AnalysisResult {
            decision_text,
            decision_summary,
            structured_summary,
            findings,
            total_value_formatted: format!(
                "{} {}",
                format_number_tr(total_value.amount),
                total_value.currency
            ),
            total_value,
            purchase_type,
            contract_duration_months: contract_duration,
            approval,
            report: String::new(),
        };
        let stamp = timestamp.format("%d.%m.%Y %H:%M").to_string();
        result.report = report::render(&result, &stamp);

        info!(authority = %result.approval.authority, "analysis complete");
        result
    }
}

/// Collapse whitespace runs to single spaces and trim.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use onayscan_core::{Currency, PurchaseType, Severity};

    const FORM: &str = "\
Satınalma Onay Formu
Alım Tipi: Spot
Sözleşme Süresi (Ay) 3
Toplam Alım Değeri 94.629,56 USD
Matbu sözleşme yapılacak mı? Evet

SATINALMA KARARI
İhale süreci Mart ayında açıldı ve dört firma davet edilmiştir.
Sadece tek tedarikçiden teklif alınabilmiştir.
Alım kararı birinci firmadan 120 ton olarak onaylanmıştır.
İMZALAR
";

    fn pipeline() -> AnalysisPipeline {
        AnalysisPipeline::default()
    }

    fn at_fixed_time(text: &str) -> AnalysisResult {
        let ts = Local.with_ymd_and_hms(2025, 3, 14, 10, 30, 0).unwrap();
        pipeline().analyze_at(text, ts)
    }

    #[test]
    fn test_full_form_analysis() {
        let result = at_fixed_time(FORM);
        assert_eq!(result.total_value.amount, 94629.56);
        assert_eq!(result.total_value.currency, Currency::Usd);
        assert_eq!(result.purchase_type, PurchaseType::Spot);
        assert_eq!(result.contract_duration_months, 3);
        // 94,629.56 falls in the 75,001-150,000 tier
        assert_eq!(result.approval.authority, "Direktör");
        assert!(!result.approval.was_annualized);
        assert!(result.decision_text.contains("İhale süreci"));
        // 'tek tedarikçiden' sits in the risk tables
        assert!(result
            .findings
            .iter()
            .any(|f| f.severity >= Severity::Medium));
    }

    #[test]
    fn test_report_embedded_and_formatted() {
        let result = at_fixed_time(FORM);
        assert!(result.report.contains("SATINALMA SÜRECİ ANALİZ RAPORU"));
        assert!(result.report.contains("Analiz Tarihi: 14.03.2025 10:30"));
        assert!(result.report.contains("94.629,56 USD"));
        assert_eq!(result.total_value_formatted, "94.629,56 USD");
        // findings quote the sentence they were raised on
        assert!(result
            .report
            .contains("Şüpheli İfade: Sadece tek tedarikçiden teklif alınabilmiştir."));
    }

    #[test]
    fn test_idempotence() {
        let ts = Local.with_ymd_and_hms(2025, 3, 14, 10, 30, 0).unwrap();
        let a = pipeline().analyze_at(FORM, ts);
        let b = pipeline().analyze_at(FORM, ts);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_empty_input_degrades_to_sentinels() {
        let result = at_fixed_time("");
        assert_eq!(result.decision_text, onayscan_extract::DECISION_NOT_FOUND);
        assert_eq!(
            result.decision_summary,
            onayscan_summarize::SUMMARY_NOT_FOUND
        );
        assert!(result.findings.is_empty());
        assert_eq!(result.total_value.amount, 0.0);
        assert_eq!(result.purchase_type, PurchaseType::Unspecified);
        assert!(result.report.contains("RAPOR SONU"));
    }

    #[test]
    fn test_report_sections_in_order() {
        let report = at_fixed_time(FORM).report;
        let p1 = report.find("1. SATINALMA KARARI").unwrap();
        let p2 = report.find("2. SATINALMA KARARI ÖZETİ").unwrap();
        let p3 = report.find("3. RİSK TESPİTLERİ").unwrap();
        let p4 = report.find("4. ONAY KURGUSU SONUCU").unwrap();
        assert!(p1 < p2 && p2 < p3 && p3 < p4);
    }

    #[test]
    fn test_quantity_times_unit_price() {
        let text = "\
SATINALMA KARARI
İhale kapsamında 120 ton malzeme alınacaktır.
Kabul edilen fiyat 62.300 RUB/ton olarak belirlenmiştir.
";
        let result = at_fixed_time(text);
        assert_eq!(result.total_value.amount, 7_476_000.0);
        assert_eq!(result.total_value.currency, Currency::Rub);
        assert_eq!(result.approval.authority, "Genel Müdür");
    }
}
