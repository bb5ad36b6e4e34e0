//! TF-IDF sentence ranking over unigram and bigram terms.

use std::collections::{HashMap, HashSet};

use crate::sentence::terms;

/// Rank sentences by mean TF-IDF weight of their terms and return the top
/// `limit`, highest score first. Ties keep document order.
pub fn rank(sentences: &[String], limit: usize) -> Vec<String> {
    if sentences.is_empty() {
        return Vec::new();
    }

    let docs: Vec<Vec<String>> = sentences.iter().map(|s| terms(s)).collect();
    let n = docs.len() as f64;

    let mut doc_freq: HashMap<&str, f64> = HashMap::new();
    for doc in &docs {
        let unique: HashSet<&str> = doc.iter().map(String::as_str).collect();
        for term in unique {
            *doc_freq.entry(term).or_insert(0.0) += 1.0;
        }
    }

    let mut scored: Vec<(usize, f64)> = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            if doc.is_empty() {
                return (i, 0.0);
            }
            let mut tf: HashMap<&str, f64> = HashMap::new();
            for term in doc {
                *tf.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
            let len = doc.len() as f64;
            let score: f64 = tf
                .iter()
                .map(|(term, count)| {
                    let idf = (n / (1.0 + doc_freq[term])).ln() + 1.0;
                    (count / len) * idf
                })
                .sum();
            (i, score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
    scored
        .into_iter()
        .take(limit)
        .map(|(i, _)| sentences[i].clone())
        .collect()
}
