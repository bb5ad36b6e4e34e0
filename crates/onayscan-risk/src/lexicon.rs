//! Risk phrase lexicon: category phrase tables, severity tiers, negation
//! phrases and per-category remediation guidance.
//!
//! The builtin lexicon is embedded at compile time; an external JSON file
//! can override it at startup.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use onayscan_core::{Error, Result, RiskCategory, Severity};

const BUILTIN_LEXICON: &str = include_str!("../assets/lexicon.json");

#[derive(Debug, Clone, Deserialize)]
struct CategoryEntry {
    cause: String,
    guidance: String,
    low: Vec<String>,
    medium: Vec<String>,
    high: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GuidanceEntry {
    cause: String,
    guidance: String,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    negation_phrases: Vec<String>,
    categories: BTreeMap<RiskCategory, CategoryEntry>,
    multi_category: GuidanceEntry,
}

/// Loaded lexicon with all phrases normalized to lowercase. Matching is
/// substring-based over lowercased lines, so severity tier membership has
/// to be queried with the same normalization.
#[derive(Debug, Clone)]
pub struct RiskLexicon {
    negations: Vec<String>,
    phrases: BTreeMap<RiskCategory, Vec<String>>,
    low_set: HashSet<String>,
    high_set: HashSet<String>,
    causes: BTreeMap<RiskCategory, String>,
    guidances: BTreeMap<RiskCategory, String>,
    multi_cause: String,
    multi_guidance: String,
}

impl RiskLexicon {
    /// The embedded default lexicon. The asset ships with the crate, so a
    /// parse failure here is a build defect, not a runtime condition.
    pub fn builtin() -> Self {
        let file: LexiconFile =
            serde_json::from_str(BUILTIN_LEXICON).expect("builtin lexicon is valid JSON");
        Self::from_file(file)
    }

    /// Load the lexicon, preferring `path` when given and readable. Falls
    /// back to the builtin tables with a warning on any failure.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        match Self::load_from(path) {
            Ok(lexicon) => {
                info!("loaded risk lexicon from {}", path.display());
                lexicon
            }
            Err(e) => {
                warn!("failed to load lexicon {}: {e}, using builtin", path.display());
                Self::builtin()
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let file: LexiconFile = serde_json::from_str(&raw)?;
        for cat in RiskCategory::ALL {
            if !file.categories.contains_key(&cat) {
                return Err(Error::Config(format!(
                    "lexicon is missing the '{}' category",
                    cat.label()
                )));
            }
        }
        Ok(Self::from_file(file))
    }

    fn from_file(file: LexiconFile) -> Self {
        let negations = file
            .negation_phrases
            .iter()
            .map(|p| p.to_lowercase())
            .collect();

        let mut phrases = BTreeMap::new();
        let mut low_set = HashSet::new();
        let mut high_set = HashSet::new();
        let mut causes = BTreeMap::new();
        let mut guidances = BTreeMap::new();

        for (cat, entry) in &file.categories {
            let mut all = Vec::new();
            for p in &entry.low {
                let p = p.to_lowercase();
                low_set.insert(p.clone());
                all.push(p);
            }
            for p in &entry.medium {
                all.push(p.to_lowercase());
            }
            for p in &entry.high {
                let p = p.to_lowercase();
                high_set.insert(p.clone());
                all.push(p);
            }
            phrases.insert(*cat, all);
            causes.insert(*cat, entry.cause.clone());
            guidances.insert(*cat, entry.guidance.clone());
        }

        Self {
            negations,
            phrases,
            low_set,
            high_set,
            causes,
            guidances,
            multi_cause: file.multi_category.cause,
            multi_guidance: file.multi_category.guidance,
        }
    }

    /// Lowercased negation phrases. A line containing any of these is
    /// skipped entirely by the detector.
    pub fn negations(&self) -> &[String] {
        &self.negations
    }

    /// All lowercased phrases for one category, low tier first.
    pub fn phrases(&self, category: RiskCategory) -> &[String] {
        self.phrases
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Severity tier of a lowercased phrase. The high tier wins when a
    /// phrase appears in more than one category's tables.
    pub fn severity_of(&self, phrase: &str) -> Severity {
        if self.high_set.contains(phrase) {
            Severity::High
        } else if self.low_set.contains(phrase) {
            Severity::Low
        } else {
            Severity::Medium
        }
    }

    /// Cause and remediation guidance text for a single-category finding.
    pub fn guidance(&self, category: RiskCategory) -> (&str, &str) {
        (
            self.causes.get(&category).map(String::as_str).unwrap_or(""),
            self.guidances
                .get(&category)
                .map(String::as_str)
                .unwrap_or(""),
        )
    }

    /// Cause and guidance text for findings spanning multiple categories.
    pub fn multi_guidance(&self) -> (&str, &str) {
        (&self.multi_cause, &self.multi_guidance)
    }
}

impl Default for RiskLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
