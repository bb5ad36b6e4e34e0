//! Line-oriented risk scan with negation suppression and per-sentence
//! finding aggregation.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use onayscan_core::{RiskCategory, Severity};

use crate::lexicon::RiskLexicon;

/// One aggregated finding. All phrase hits that resolve to the same
/// reconstructed sentence on the same line collapse into a single finding.
#[derive(Debug, Clone, Serialize)]
pub struct RiskFinding {
    pub categories: BTreeSet<RiskCategory>,
    pub matched_phrases: Vec<String>,
    pub sentence: String,
    pub line_number: usize,
    pub severity: Severity,
    pub explanation: String,
}

impl RiskFinding {
    /// Category label for reports; multi-category findings join labels
    /// with ", ".
    pub fn category_label(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Keyword-driven risk detector over decision text.
#[derive(Debug, Clone, Default)]
pub struct RiskDetector {
    lexicon: RiskLexicon,
}

impl RiskDetector {
    pub fn new(lexicon: RiskLexicon) -> Self {
        Self { lexicon }
    }

    /// Scan `text` line by line and return findings in document order.
    ///
    /// A line containing any negation phrase is skipped outright, so
    /// statements like "... tespit edilmemiştir." never produce findings.
    pub fn detect(&self, text: &str) -> Vec<RiskFinding> {
        let lines: Vec<&str> = text.split('\n').collect();
        // (sentence, line_number) -> ordered (category, phrase) hits
        let mut merged: Vec<((String, usize), Vec<(RiskCategory, String)>)> = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let lowered = line.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }
            if self.lexicon.negations().iter().any(|n| lowered.contains(n.as_str())) {
                continue;
            }

            let mut hits: Vec<(RiskCategory, String)> = Vec::new();
            for cat in RiskCategory::ALL {
                for phrase in self.lexicon.phrases(cat) {
                    if lowered.contains(phrase.as_str()) {
                        hits.push((cat, phrase.clone()));
                    }
                }
            }
            if hits.is_empty() {
                continue;
            }

            let sentence = reconstruct_sentence(&lines, idx);
            let key = (sentence, idx + 1);
            match merged.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => existing.extend(hits),
                None => merged.push((key, hits)),
            }
        }

        let findings: Vec<RiskFinding> = merged
            .into_iter()
            .map(|((sentence, line_number), hits)| {
                self.build_finding(sentence, line_number, hits)
            })
            .collect();

        debug!("risk scan produced {} finding(s)", findings.len());
        findings
    }

    fn build_finding(
        &self,
        sentence: String,
        line_number: usize,
        hits: Vec<(RiskCategory, String)>,
    ) -> RiskFinding {
        let categories: BTreeSet<RiskCategory> = hits.iter().map(|(c, _)| *c).collect();

        let mut matched_phrases: Vec<String> = Vec::new();
        for (_, phrase) in &hits {
            if !matched_phrases.contains(phrase) {
                matched_phrases.push(phrase.clone());
            }
        }

        // high tier dominates, then low; anything else is medium
        let severity = if categories.len() > 1 {
            Severity::High
        } else {
            let tiers: Vec<Severity> = matched_phrases
                .iter()
                .map(|p| self.lexicon.severity_of(p))
                .collect();
            if tiers.contains(&Severity::High) {
                Severity::High
            } else if tiers.contains(&Severity::Low) {
                Severity::Low
            } else {
                Severity::Medium
            }
        };

        let (cause, guidance) = if categories.len() > 1 {
            self.lexicon.multi_guidance()
        } else {
            // single-category finding, the set is non-empty by construction
            let cat = categories.iter().next().copied().unwrap_or(RiskCategory::Commercial);
            self.lexicon.guidance(cat)
        };

        let explanation = format!(
            "Sebep: {cause}\nTespit Edilen İfadeler: '{}'\nRisk Skoru: {} ({})\nÖneriler: {guidance}",
            matched_phrases.join(", "),
            severity.score(),
            severity.label(),
        );

        RiskFinding {
            categories,
            matched_phrases,
            sentence,
            line_number,
            severity,
            explanation,
        }
    }
}

/// Rebuild the sentence a matched line belongs to. PDF text layers break
/// sentences across lines, so when the line does not end with terminal
/// punctuation the next two non-empty lines are appended, stopping at the
/// first one that closes the sentence.
fn reconstruct_sentence(lines: &[&str], idx: usize) -> String {
    let mut sentence = lines[idx].trim().to_string();
    if ends_sentence(&sentence) {
        return sentence;
    }

    let end = (idx + 3).min(lines.len());
    for next in &lines[idx + 1..end] {
        let next = next.trim();
        if next.is_empty() {
            continue;
        }
        sentence.push(' ');
        sentence.push_str(next);
        if ends_sentence(next) {
            break;
        }
    }
    sentence
}

fn ends_sentence(s: &str) -> bool {
    s.ends_with('.') || s.ends_with('!') || s.ends_with('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> RiskDetector {
        RiskDetector::new(RiskLexicon::builtin())
    }

    #[test]
    fn test_single_finding_high() {
        let findings = detector().detect("Bu işlemde rüşvet riski vardır.");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.categories.len(), 1);
        assert!(f.categories.contains(&RiskCategory::Ethical));
        // 'rüşvet' sits in the high tier, so the finding escalates past
        // the medium-tier 'rüşvet riski' hit
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.line_number, 1);
        assert!(f.matched_phrases.contains(&"rüşvet".to_string()));
    }

    #[test]
    fn test_negation_suppresses_line() {
        let findings = detector().detect("Fiyat manipülasyonu tespit edilmemiştir.");
        assert!(findings.is_empty());

        let findings = detector().detect("Bu alımda çıkar çatışması yoktur.");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_negation_only_affects_its_line() {
        let text = "Çıkar çatışması yoktur.\nAncak tek tedarikçi ile çalışılmaktadır.";
        let findings = detector().detect(text);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].categories.contains(&RiskCategory::Commercial));
        assert_eq!(findings[0].line_number, 2);
    }

    #[test]
    fn test_multi_category_escalates_to_high() {
        // 'hediye' is ethical-medium, 'usulsüz' legal-medium; together high
        let findings = detector().detect("Tedarikçiden hediye alınması usulsüz bir uygulamadır.");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert!(f.categories.len() > 1);
        assert_eq!(f.severity, Severity::High);
        assert!(f.explanation.contains("Birden fazla kategoride"));
    }

    #[test]
    fn test_low_severity_phrase() {
        let findings = detector().detect("Alım bütçe dahilinde gerçekleşmiştir.");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Low);
        assert_eq!(findings[0].severity.score(), 1);
    }

    #[test]
    fn test_low_phrase_wins_over_medium_in_same_category() {
        // 'bütçe dahilinde' is low tier, 'tek tedarikçi' medium; with no
        // high hit the low tier decides
        let findings =
            detector().detect("Alım bütçe dahilinde ancak tek tedarikçi ile yapılmıştır.");
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.categories.len(), 1);
        assert!(f.matched_phrases.contains(&"bütçe dahilinde".to_string()));
        assert!(f.matched_phrases.contains(&"tek tedarikçi".to_string()));
        assert_eq!(f.severity, Severity::Low);
    }

    #[test]
    fn test_sentence_reconstruction_across_lines() {
        let text = "Tedarikçi firma hakkında yasal soruşturma\nbaşlatılmıştır.";
        let findings = detector().detect(text);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].sentence, "Tedarikçi firma hakkında yasal soruşturma başlatılmıştır.");
    }

    #[test]
    fn test_case_insensitive_match() {
        let findings = detector().detect("AMBARGO kapsamindaki ülkelerden alım yapılmaktadır.");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn test_explanation_format() {
        let findings = detector().detect("Sadece tek tedarikçiden teklif alınmıştır.");
        assert_eq!(findings.len(), 1);
        let e = &findings[0].explanation;
        assert!(e.starts_with("Sebep: "));
        assert!(e.contains("Tespit Edilen İfadeler: '"));
        assert!(e.contains("Risk Skoru: 2 (Orta)"));
        assert!(e.contains("Öneriler: "));
    }

    #[test]
    fn test_clean_text_no_findings() {
        let findings = detector().detect("Ofis malzemesi alımı tamamlanmıştır.");
        assert!(findings.is_empty());
    }
}
