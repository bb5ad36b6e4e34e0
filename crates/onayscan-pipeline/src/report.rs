//! Plain-text report rendering. The layout is fixed: downstream tools
//! parse these section headings, so changes here break compatibility.

use onayscan_core::format_number_tr;

use crate::structured::FIELD_NOT_FOUND;
use crate::types::AnalysisResult;

const BANNER_WIDTH: usize = 70;
const RULE_WIDTH: usize = 50;

/// Render the four-section report for a result. `timestamp` is already
/// formatted (`%d.%m.%Y %H:%M`); injecting it keeps rendering
/// deterministic for the same result.
pub fn render(result: &AnalysisResult, timestamp: &str) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let rule = "-".repeat(RULE_WIDTH);
    let mut out: Vec<String> = Vec::new();

    out.push(banner.clone());
    out.push("SATINALMA SÜRECİ ANALİZ RAPORU".to_string());
    out.push(banner.clone());
    out.push(format!("Analiz Tarihi: {timestamp}"));
    out.push(String::new());

    out.push("1. SATINALMA KARARI (Çıkarılan Ham Metin)".to_string());
    out.push(rule.clone());
    out.push(result.decision_text.clone());
    out.push(String::new());

    out.push("2. SATINALMA KARARI ÖZETİ (Madde Madde)".to_string());
    out.push(rule.clone());
    for (label, value) in result.structured_summary.labeled() {
        match value {
            Some(content) => {
                out.push(format!("• {label}:"));
                out.push(format!("  {content}"));
            }
            None => out.push(format!("• {label}: {FIELD_NOT_FOUND}")),
        }
        out.push(String::new());
    }

    out.push("3. RİSK TESPİTLERİ (Kategori - İfade - Açıklama)".to_string());
    out.push(rule.clone());
    if result.findings.is_empty() {
        out.push("Risk tespit edilmedi.".to_string());
        out.push(String::new());
    } else {
        for (i, finding) in result.findings.iter().enumerate() {
            out.push(format!("{}. **{}**", i + 1, finding.category_label()));
            // the source sentence; matched phrases are inside the explanation
            out.push(format!("   Şüpheli İfade: {}", finding.sentence));
            out.push(format!("   Açıklama: {}", finding.explanation));
            out.push(format!("   Satır No: {}", finding.line_number));
            out.push(String::new());
        }
    }

    out.push("4. ONAY KURGUSU SONUCU (USD Değeri ve İlgili Onay Mercii)".to_string());
    out.push(rule);
    out.push(format!(
        "Toplam Alım Değeri: {} {} → Onay mercii: {}",
        format_number_tr(result.total_value.amount),
        result.total_value.currency,
        result.approval.authority,
    ));
    out.push(String::new());

    out.push(banner.clone());
    out.push("RAPOR SONU".to_string());
    out.push(banner);

    out.join("\n")
}
