//! Sentence segmentation and token helpers shared by the strategies.

use std::collections::{HashMap, HashSet};

/// Split text into sentences on runs of terminal punctuation. Fragments
/// of 10 characters or fewer after trimming are noise (form labels, page
/// numbers) and are dropped. Sentences keep no trailing punctuation.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(|c: char| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| s.chars().count() > 10)
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// Lowercased word tokens longer than two characters.
pub fn tokens(sentence: &str) -> Vec<String> {
    sentence
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Unigrams plus adjacent-word bigrams, used as TF-IDF terms.
pub fn terms(sentence: &str) -> Vec<String> {
    let unigrams = tokens(sentence);
    let mut all = unigrams.clone();
    for pair in unigrams.windows(2) {
        all.push(format!("{} {}", pair[0], pair[1]));
    }
    all
}

fn frequencies(tokens: &[String]) -> HashMap<&str, f64> {
    let mut freq: HashMap<&str, f64> = HashMap::new();
    for t in tokens {
        *freq.entry(t.as_str()).or_insert(0.0) += 1.0;
    }
    freq
}

/// Sentence similarity in [0, 1]: cosine over term-frequency vectors,
/// falling back to Jaccard word overlap when a vector has zero norm.
pub fn similarity(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let fa = frequencies(&ta);
    let fb = frequencies(&tb);

    let dot: f64 = fa
        .iter()
        .filter_map(|(t, va)| fb.get(t).map(|vb| va * vb))
        .sum();
    let norm_a: f64 = fa.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b: f64 = fb.values().map(|v| v * v).sum::<f64>().sqrt();

    if norm_a > 0.0 && norm_b > 0.0 {
        return dot / (norm_a * norm_b);
    }

    let sa: HashSet<&str> = ta.iter().map(String::as_str).collect();
    let sb: HashSet<&str> = tb.iter().map(String::as_str).collect();
    let union = sa.union(&sb).count();
    if union == 0 {
        0.0
    } else {
        sa.intersection(&sb).count() as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_discards_short_fragments() {
        let sents = split_sentences("EK-1. Tedarikçi seçimi titizlikle yapılmıştır! Sayfa 3? Onay süreci tamamlandı mı");
        assert_eq!(
            sents,
            [
                "Tedarikçi seçimi titizlikle yapılmıştır",
                "Onay süreci tamamlandı mı"
            ]
        );
    }

    #[test]
    fn test_split_collapses_whitespace() {
        let sents = split_sentences("Teklif  değerlendirmesi\n tamamlanmıştır.");
        assert_eq!(sents, ["Teklif değerlendirmesi tamamlanmıştır"]);
    }

    #[test]
    fn test_similarity_identical_and_disjoint() {
        let s = "Tedarikçi firma ile sözleşme imzalanacaktır";
        assert!((similarity(s, s) - 1.0).abs() < 1e-9);
        assert_eq!(similarity("alfa beta gama", "delta epsilon zeta"), 0.0);
    }

    #[test]
    fn test_similarity_partial_overlap() {
        let a = "Tedarikçi firma ile sözleşme imzalanacaktır";
        let b = "Tedarikçi firma ile görüşme yapılacaktır";
        let sim = similarity(a, b);
        assert!(sim > 0.3 && sim < 1.0);
    }

    #[test]
    fn test_terms_include_bigrams() {
        let t = terms("onay limiti kontrolü");
        assert!(t.contains(&"onay".to_string()));
        assert!(t.contains(&"onay limiti".to_string()));
        assert!(t.contains(&"limiti kontrolü".to_string()));
    }
}
