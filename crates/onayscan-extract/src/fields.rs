//! Approval-form field detection: purchase type, contract duration,
//! management justification, standard-contract flag.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use onayscan_core::PurchaseType;

static TYPE_LABELS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)alım\s+tipi[:\s]*([^\n]+)",
        r"(?i)purchase\s+type[:\s]*([^\n]+)",
        r"(?i)satınalma\s+türü[:\s]*([^\n]+)",
        r"(?i)contract\s+type[:\s]*([^\n]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SPOT_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)spot\s+(alım|purchase)").unwrap());
static RECURRING_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(sürekli|continuous|recurring)\s+(alım|purchase)").unwrap());

const SPOT_WORDS: [&str; 4] = ["spot", "tek", "single", "one-time"];
const RECURRING_WORDS: [&str; 5] = ["sürekli", "continuous", "recurring", "long-term", "uzun"];

/// Detect the declared purchase type. Labeled fields win over free-text
/// mentions; absence is `Unspecified`.
pub fn purchase_type(text: &str) -> PurchaseType {
    for re in TYPE_LABELS.iter() {
        if let Some(caps) = re.captures(text) {
            let declared = caps[1].trim().to_lowercase();
            if SPOT_WORDS.iter().any(|w| declared.contains(w)) {
                return PurchaseType::Spot;
            }
            if RECURRING_WORDS.iter().any(|w| declared.contains(w)) {
                return PurchaseType::Recurring;
            }
        }
    }

    if SPOT_MENTION.is_match(text) {
        return PurchaseType::Spot;
    }
    if RECURRING_MENTION.is_match(text) {
        return PurchaseType::Recurring;
    }
    PurchaseType::Unspecified
}

static MONTH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)sözleşme\s+süresi\s*\(ay\)\s*(\d+)",
        r"(?i)sözleşme\s+süresi[:\s]*(\d+)\s*ay",
        r"(?i)contract\s+duration[:\s]*(\d+)\s*month",
        r"(?i)contract\s+period[:\s]*(\d+)\s*month",
        r"(?i)süre[:\s]*(\d+)\s*ay",
        r"(?i)duration[:\s]*(\d+)\s*month",
        r"(?i)(\d+)\s*aylık\s+sözleşme",
        r"(?i)(\d+)\s*month\s+contract",
        r"(?i)(\d+)\s*ay\s+süreyle",
        r"(?i)for\s+(\d+)\s+months",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static YEAR_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)sözleşme\s+süresi[:\s]*(\d+)\s*yıl",
        r"(?i)(\d+)\s*yıllık\s+sözleşme",
        r"(?i)(\d+)\s*year\s+contract",
        r"(?i)contract\s+for\s+(\d+)\s*year",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Detect the contract duration in months. Month figures outside 1–120 and
/// year figures outside 1–10 are discarded; 0 means "not stated".
pub fn contract_duration_months(text: &str) -> u32 {
    for re in MONTH_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            if let Ok(months) = caps[1].parse::<u32>() {
                if (1..=120).contains(&months) {
                    return months;
                }
            }
        }
    }

    for re in YEAR_PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            if let Ok(years) = caps[1].parse::<u32>() {
                if (1..=10).contains(&years) {
                    return years * 12;
                }
            }
        }
    }

    0
}

static JUSTIFICATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)yönetim\s+onay\s+gerekçesi[:\s]*([^\n\r]+)").unwrap());

/// A trailing capitalized word is usually the next form label glued on by
/// the PDF text layer; strip it only when the justification keeps at least
/// two words, so markers like "Finansal Limit" survive intact.
static TRAILING_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[A-Z][a-z]*\s*$").unwrap());

/// Extract the free-text management approval justification field.
pub fn management_justification(text: &str) -> String {
    let Some(caps) = JUSTIFICATION.captures(text) else {
        return String::new();
    };
    let raw = caps[1].trim();

    if let Some(m) = TRAILING_LABEL.find(raw) {
        let stripped = raw[..m.start()].trim();
        if stripped.split_whitespace().count() >= 2 {
            return stripped.to_string();
        }
    }
    raw.to_string()
}

static STANDARD_CONTRACT_FIELDS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)matbu\s+sözleşme\s+yapılacak\s+mı[?\s]*([^\n\r]*)",
        r"(?i)matbu\s+sözleşme[:\s]*([^\n\r]*)",
        r"(?i)sözleşme\s+türü[:\s]*([^\n\r]*)",
        r"(?i)sözleşme\s+şekli[:\s]*([^\n\r]*)",
        r"(?i)matbu[:\s]*([^\n\r]*)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

const NEGATIVE_MARKS: [&str; 10] = [
    "hayır", "hayir", "yok", "olmayacak", "yapılmayacak", "yapilmayacak",
    "✗", "☐", "[ ]", "işaretlenmemiş",
];

// "no" only as a standalone word; as a substring it sits inside words
// like "normal" or "nokta"
static NO_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bno\b").unwrap());
const POSITIVE_MARKS: [&str; 9] = [
    "evet", "yes", "var", "olacak", "yapılacak", "yapilacak", "✓", "☑", "[x]",
];

/// Detect whether a standard (matbu) contract will be executed.
///
/// When no field gives a clear signal the answer defaults to `true`,
/// matching the documented behavior of the source forms.
pub fn standard_contract(text: &str) -> bool {
    for re in STANDARD_CONTRACT_FIELDS.iter() {
        if let Some(caps) = re.captures(text) {
            let mut matched = caps[0].to_lowercase();
            if let Some(answer) = caps.get(1) {
                matched.push(' ');
                matched.push_str(&answer.as_str().to_lowercase());
            }

            let negative = NEGATIVE_MARKS
                .iter()
                .find(|m| matched.contains(**m))
                .copied()
                .or_else(|| NO_WORD.is_match(&matched).then_some("no"));
            if let Some(mark) = negative {
                debug!("standard contract: no ('{}' found)", mark);
                return false;
            }
            if let Some(mark) = POSITIVE_MARKS.iter().find(|m| matched.contains(**m)) {
                debug!("standard contract: yes ('{}' found)", mark);
                return true;
            }
        }
    }

    debug!("standard contract: yes (default)");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_type_labeled() {
        assert_eq!(purchase_type("Alım Tipi: Spot"), PurchaseType::Spot);
        assert_eq!(purchase_type("Alım Tipi: Sürekli Alım"), PurchaseType::Recurring);
        assert_eq!(purchase_type("Purchase Type: recurring"), PurchaseType::Recurring);
    }

    #[test]
    fn test_purchase_type_mention() {
        assert_eq!(purchase_type("Bu bir spot alım işlemidir."), PurchaseType::Spot);
        assert_eq!(
            purchase_type("Sürekli alım kapsamında değerlendirilmiştir."),
            PurchaseType::Recurring
        );
    }

    #[test]
    fn test_purchase_type_unspecified() {
        assert_eq!(purchase_type("Tutar bilgisi."), PurchaseType::Unspecified);
    }

    #[test]
    fn test_duration_month_field() {
        assert_eq!(contract_duration_months("Sözleşme Süresi (Ay) 3"), 3);
        assert_eq!(contract_duration_months("sözleşme süresi: 8 ay"), 8);
        assert_eq!(contract_duration_months("6 aylık sözleşme imzalanacaktır"), 6);
    }

    #[test]
    fn test_duration_year_conversion() {
        assert_eq!(contract_duration_months("2 yıllık sözleşme"), 24);
        assert_eq!(contract_duration_months("sözleşme süresi 3 yıl"), 36);
    }

    #[test]
    fn test_duration_out_of_range() {
        assert_eq!(contract_duration_months("Süre: 500 ay"), 0);
        assert_eq!(contract_duration_months("süre belirtilmemiş"), 0);
    }

    #[test]
    fn test_justification() {
        assert_eq!(
            management_justification("Yönetim Onay Gerekçesi: Finansal Limit"),
            "Finansal Limit"
        );
        assert_eq!(
            management_justification("Yönetim Onay Gerekçesi Danışmanlık İhalesi Matbu"),
            "Danışmanlık İhalesi"
        );
        assert_eq!(management_justification("gerekçe alanı yok"), "");
    }

    #[test]
    fn test_standard_contract_negative() {
        assert!(!standard_contract("Matbu sözleşme yapılacak mı? Hayır"));
        assert!(!standard_contract("Matbu sözleşme: yapılmayacak"));
        assert!(!standard_contract("Matbu sözleşme: no"));
    }

    #[test]
    fn test_no_inside_word_is_not_negative() {
        assert!(standard_contract("Sözleşme türü: normal"));
    }

    #[test]
    fn test_standard_contract_positive() {
        assert!(standard_contract("Matbu sözleşme yapılacak mı? Evet"));
    }

    #[test]
    fn test_standard_contract_default() {
        assert!(standard_contract("Sözleşmeye dair bilgi bulunmayan metin."));
    }
}
