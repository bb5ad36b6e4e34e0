//! Decision passage location.
//!
//! Input documents are not schema-consistent, so two strategies exist:
//! a lenient heading/keyword cascade (`locate`) and a strict variant
//! anchored on literal section markers (`locate_structured`). Regex case
//! folding does not pair dotless `ı` with ASCII `I`, so uppercase heading
//! variants are spelled out separately, as the forms print them.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel returned when no decision passage can be located.
pub const DECISION_NOT_FOUND: &str = "Satınalma kararı metni bulunamadı.";

static HEADING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)satınalma\s+kararı\s*bölümü[:\s]*([\s\S]*)",
        r"(?i)satınalma\s+kararı[:\s]*([\s\S]*)",
        r"(?i)purchasing\s+decision[:\s]*([\s\S]*)",
        r"(?i)satın\s*alma\s+kararı[:\s]*([\s\S]*)",
        r"(?i)procurement\s+decision[:\s]*([\s\S]*)",
        r"SATINALMA\s+KARARI\s*BÖLÜMÜ[:\s]*([\s\S]*)",
        r"SATINALMA\s+KARARI[:\s]*([\s\S]*)",
        r"SATIN\s*ALMA\s+KARARI[:\s]*([\s\S]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Lines containing either keyword start the fallback passage.
const DECISION_KEYWORDS: [&str; 2] = ["karar", "onay"];

/// Section markers for the strict document-structure variant, tried in
/// order. Each entry is (start marker, optional end markers).
const STRUCTURED_MARKERS: [(&str, &[&str]); 4] = [
    ("SATINALMA KARARI", &["İMZALAR", "ONAYLAR"]),
    ("AÇIKLAMALAR", &["SON ALIM BİLGİLERİ"]),
    ("TEKLİF BİLGİLERİ", &[]),
    ("İhale kapsamında", &[]),
];

/// Locates the decision-relevant passage within a document.
pub struct SectionLocator;

impl SectionLocator {
    /// Lenient cascade: labeled heading, then first decision-keyword line
    /// plus everything after it, then the whole text if long enough, then
    /// the not-found sentinel.
    pub fn locate(text: &str) -> String {
        for re in HEADING_PATTERNS.iter() {
            if let Some(caps) = re.captures(text) {
                let found = caps[1].trim();
                if !found.is_empty() {
                    return found.to_string();
                }
            }
        }

        let lines: Vec<&str> = text.split('\n').collect();
        for (i, line) in lines.iter().enumerate() {
            let lower = line.to_lowercase();
            if DECISION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
                return lines[i..].join("\n").trim().to_string();
            }
        }

        let trimmed = text.trim();
        if trimmed.len() > 50 {
            return trimmed.to_string();
        }

        DECISION_NOT_FOUND.to_string()
    }

    /// Strict variant: anchor on a literal section marker and trim at the
    /// first terminating marker if one follows. Falls back to the whole
    /// text when no marker is present.
    pub fn locate_structured(text: &str) -> String {
        for (start, ends) in STRUCTURED_MARKERS {
            if let Some(idx) = text.find(start) {
                let mut passage = &text[idx..];
                for end in ends {
                    if let Some(end_idx) = passage.find(end) {
                        passage = &passage[..end_idx];
                        break;
                    }
                }
                return passage.trim().to_string();
            }
        }
        text.trim().to_string()
    }
}
