//! OnayScan Summarize — extractive summarization of decision text.
//!
//! Three strategies run side by side (TF-IDF, TextRank, positional), their
//! picks are merged in first-seen order, near-duplicates are dropped and
//! the result is capped.

pub mod sentence;
mod textrank;
mod tfidf;

use tracing::debug;

pub use sentence::{similarity, split_sentences};

/// Reported when the input is too short to summarize.
pub const SUMMARY_NOT_FOUND: &str = "Özet oluşturmak için yeterli metin bulunamadı.";

/// Extractive summarizer. The defaults mirror the analysis forms this was
/// built for: five picks per strategy, at most seven sentences total, and
/// a 0.70 pairwise similarity ceiling on the output.
#[derive(Debug, Clone)]
pub struct Summarizer {
    per_strategy: usize,
    max_sentences: usize,
    similarity_cap: f64,
    min_chars: usize,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self {
            per_strategy: 5,
            max_sentences: 7,
            similarity_cap: 0.70,
            min_chars: 50,
        }
    }
}

impl Summarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the summary text: one "• sentence" line per pick, joined
    /// with newlines. Too-short input yields the sentinel.
    pub fn summarize(&self, text: &str) -> String {
        let picked = self.select(text);
        if picked.is_empty() {
            return SUMMARY_NOT_FOUND.to_string();
        }
        picked
            .iter()
            .map(|s| format!("• {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run all strategies and return the merged, deduplicated selection in
    /// first-seen order. Empty when the input cannot be summarized.
    pub fn select(&self, text: &str) -> Vec<String> {
        if text.trim().chars().count() < self.min_chars {
            return Vec::new();
        }
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<String> = Vec::new();
        candidates.extend(tfidf::rank(&sentences, self.per_strategy));
        candidates.extend(
            textrank::rank(&sentences, self.per_strategy)
                .unwrap_or_else(|| tfidf::rank(&sentences, self.per_strategy)),
        );
        candidates.extend(self.positional(&sentences));

        let mut picked: Vec<String> = Vec::new();
        for candidate in candidates {
            if picked.len() >= self.max_sentences {
                break;
            }
            let duplicate = picked
                .iter()
                .any(|kept| similarity(kept, &candidate) > self.similarity_cap);
            if !duplicate {
                picked.push(candidate);
            }
        }

        debug!("summary selected {} sentence(s)", picked.len());
        picked
    }

    /// Positional baseline: leading and trailing pairs, or everything for
    /// short documents.
    fn positional(&self, sentences: &[String]) -> Vec<String> {
        if sentences.len() <= 4 {
            return sentences.to_vec();
        }
        let mut out = sentences[..2].to_vec();
        out.extend_from_slice(&sentences[sentences.len() - 2..]);
        out
    }
}
