//! Structured summary: fixed per-field extractors over the decision text.
//!
//! Each field scans the sentence list for its own keyword set and keeps
//! the first hit(s). Absent fields stay `None`; the report renders the
//! "not detected" fallback for them.

use serde::Serialize;

use onayscan_summarize::split_sentences;

/// Rendered when a summary field found nothing.
pub const FIELD_NOT_FOUND: &str = "Bilgi tespit edilemedi.";

const MAX_DECISION_ITEMS: usize = 10;

/// The eight fixed summary fields of the procurement form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructuredSummary {
    pub kullanim_amaci: Option<String>,
    pub son_alim_bilgileri: Option<String>,
    pub ihale_sureci: Option<String>,
    pub katilan_firmalar: Option<String>,
    pub teklifler: Option<String>,
    pub kabul_edilen_teklif: Option<String>,
    pub olumluluk_fayda_zarar: Option<String>,
    pub alim_karari: Option<String>,
}

impl StructuredSummary {
    pub fn extract(decision_text: &str) -> Self {
        let sentences = split_sentences(decision_text);
        Self {
            kullanim_amaci: usage_purpose(&sentences),
            son_alim_bilgileri: previous_purchase(&sentences),
            ihale_sureci: tender_process(&sentences),
            katilan_firmalar: participating_firms(&sentences),
            teklifler: offers(&sentences),
            kabul_edilen_teklif: accepted_offer(&sentences),
            olumluluk_fayda_zarar: benefit_calculations(&sentences),
            alim_karari: decision_items(&sentences),
        }
    }

    /// Report labels in their fixed order, paired with the field values.
    pub fn labeled(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("Kullanım Amacı", self.kullanim_amaci.as_deref()),
            (
                "Son Alım Bilgileri (Firma, Fiyat, Teslim Şekli, Miktar, Onay Numarası)",
                self.son_alim_bilgileri.as_deref(),
            ),
            ("İhale Süreci ve Katılan Firmalar", self.ihale_sureci.as_deref()),
            ("Katılan Firmalar", self.katilan_firmalar.as_deref()),
            (
                "Teklifler (Firma, Fiyat, Teslim Şekli, Vade, Tercih Durumu)",
                self.teklifler.as_deref(),
            ),
            (
                "Kabul Edilen Teklif Bilgileri (Firma, Fiyat, Teslim, Vade, Toplam Değer)",
                self.kabul_edilen_teklif.as_deref(),
            ),
            (
                "Olumluluk / Fayda - Zarar Hesapları",
                self.olumluluk_fayda_zarar.as_deref(),
            ),
            (
                "Alım Kararı (Hangi Firmadan, Hangi Şartlarla, Hangi Miktarda)",
                self.alim_karari.as_deref(),
            ),
        ]
    }
}

fn contains_any(sentence_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| sentence_lower.contains(k))
}

fn usage_purpose(sentences: &[String]) -> Option<String> {
    let keywords = ["amaç", "kullanım", "kullanılacak", "için", "hedef", "maksad"];
    sentences
        .iter()
        .find(|s| contains_any(&s.to_lowercase(), &keywords) && s.chars().count() > 20)
        .cloned()
}

fn previous_purchase(sentences: &[String]) -> Option<String> {
    let keywords = ["son alım", "önceki", "geçmiş", "daha önce", "q1", "q2", "q3", "q4"];
    let detail = ["fiyat", "rub", "usd", "ton", "miktar"];
    sentences
        .iter()
        .find(|s| {
            let lower = s.to_lowercase();
            contains_any(&lower, &keywords) && contains_any(&lower, &detail)
        })
        .cloned()
}

fn tender_process(sentences: &[String]) -> Option<String> {
    let keywords = ["ihale", "tender", "açıldı", "süreç", "katılım"];
    first_n_joined(sentences, &keywords, None, 2)
}

fn participating_firms(sentences: &[String]) -> Option<String> {
    let keywords = ["firma"];
    let detail = ["katıl", "teklif", "davet"];
    let hits: Vec<&str> = sentences
        .iter()
        .filter(|s| {
            let lower = s.to_lowercase();
            contains_any(&lower, &keywords) && contains_any(&lower, &detail)
        })
        .map(String::as_str)
        .take(2)
        .collect();
    (!hits.is_empty()).then(|| hits.join(" "))
}

fn offers(sentences: &[String]) -> Option<String> {
    let keywords = ["teklif", "firma", "fiyat", "rub/ton", "usd/ton"];
    first_n_joined(sentences, &keywords, Some(&["rub", "usd", "ton"]), 3)
}

fn accepted_offer(sentences: &[String]) -> Option<String> {
    let keywords = ["kabul", "tercih", "seçilen", "karar", "onaylandı"];
    let detail = ["firma", "rub", "usd", "ton"];
    sentences
        .iter()
        .find(|s| {
            let lower = s.to_lowercase();
            contains_any(&lower, &keywords) && contains_any(&lower, &detail)
        })
        .cloned()
}

fn benefit_calculations(sentences: &[String]) -> Option<String> {
    let keywords = ["hesap", "endeks", "lme", "avantaj", "fayda", "olumsuzluk"];
    first_n_joined(sentences, &keywords, None, 2)
}

fn first_n_joined(
    sentences: &[String],
    keywords: &[&str],
    detail: Option<&[&str]>,
    n: usize,
) -> Option<String> {
    let hits: Vec<&str> = sentences
        .iter()
        .filter(|s| {
            let lower = s.to_lowercase();
            contains_any(&lower, keywords)
                && detail.map_or(true, |d| contains_any(&lower, d))
        })
        .map(String::as_str)
        .take(n)
        .collect();
    (!hits.is_empty()).then(|| hits.join(" "))
}

/// Bulleted digest of the decision text: up to ten sentences over 20
/// characters, skipping attachment references ("EK-").
fn decision_items(sentences: &[String]) -> Option<String> {
    let items: Vec<String> = sentences
        .iter()
        .filter(|s| s.chars().count() > 20 && !s.starts_with("EK-"))
        .take(MAX_DECISION_ITEMS)
        .map(|s| {
            if s.ends_with('.') {
                format!("• {s}")
            } else {
                format!("• {s}.")
            }
        })
        .collect();
    (!items.is_empty()).then(|| items.join("\n"))
}
