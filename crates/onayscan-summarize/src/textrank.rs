//! TextRank sentence ranking on a similarity graph.
//!
//! Sentences are nodes, cosine similarity gives edge weights, and a damped
//! power iteration distributes rank. Degenerate inputs (fewer than two
//! sentences, or no edges at all) return `None` so the caller can fall
//! back to TF-IDF.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::sentence::similarity;

const DAMPING: f64 = 0.85;
const MAX_ITERATIONS: usize = 50;
const CONVERGENCE: f64 = 1e-6;

pub fn rank(sentences: &[String], limit: usize) -> Option<Vec<String>> {
    if sentences.len() < 2 {
        return None;
    }

    let mut graph: UnGraph<usize, f64> = UnGraph::new_undirected();
    let nodes: Vec<NodeIndex> = (0..sentences.len()).map(|i| graph.add_node(i)).collect();

    for i in 0..sentences.len() {
        for j in (i + 1)..sentences.len() {
            let weight = similarity(&sentences[i], &sentences[j]);
            if weight > 0.0 {
                graph.add_edge(nodes[i], nodes[j], weight);
            }
        }
    }

    if graph.edge_count() == 0 {
        debug!("textrank: similarity graph has no edges");
        return None;
    }

    let n = sentences.len();
    let weight_sums: Vec<f64> = nodes
        .iter()
        .map(|&ni| graph.edges(ni).map(|e| *e.weight()).sum())
        .collect();

    let mut scores = vec![1.0 / n as f64; n];
    for _ in 0..MAX_ITERATIONS {
        let mut next = vec![(1.0 - DAMPING) / n as f64; n];
        for (i, &ni) in nodes.iter().enumerate() {
            for edge in graph.edges(ni) {
                let j = graph[if edge.source() == ni { edge.target() } else { edge.source() }];
                if weight_sums[j] > 0.0 {
                    next[i] += DAMPING * scores[j] * edge.weight() / weight_sums[j];
                }
            }
        }
        let delta: f64 = scores
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;
        if delta < CONVERGENCE {
            break;
        }
    }

    let mut ranked: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));

    Some(
        ranked
            .into_iter()
            .take(limit)
            .map(|(i, _)| sentences[i].clone())
            .collect(),
    )
}
