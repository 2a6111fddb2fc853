//! Teleport (random-jump) distributions
//!
//! A [`TeleportVector`] says where the random surfer lands when it does not
//! follow a link, and where mass leaving dangling pages goes. Uniform gives
//! classic PageRank; a relevance-biased vector gives topic-specific PageRank.
//!
//! The builder never looks at page text. Relevance comes in precomputed, one
//! value per node (see [`crate::relevance`] for a keyword matcher).

use crate::errors::{RankError, Result};
use crate::graph::csr::CsrGraph;
use rustc_hash::FxHashMap;

/// A probability distribution over graph nodes, indexed by node index
#[derive(Debug, Clone, PartialEq)]
pub struct TeleportVector {
    weights: Vec<f64>,
    uniform_fallback: bool,
}

impl TeleportVector {
    /// `1/n` for every node
    pub fn uniform(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }
        Ok(Self {
            weights: vec![1.0 / n as f64; n],
            uniform_fallback: false,
        })
    }

    /// Normalize a per-node relevance signal into a distribution
    ///
    /// Negative and non-finite values count as zero. When nothing is
    /// relevant the uniform vector is returned instead of an all-zero one.
    pub fn biased(graph: &CsrGraph, relevance: &[f64]) -> Result<Self> {
        trace_stage!("teleport");
        let n = graph.num_nodes;
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }
        if relevance.len() != n {
            return Err(RankError::LengthMismatch {
                expected: n,
                actual: relevance.len(),
            });
        }

        let raw: Vec<f64> = relevance
            .iter()
            .enumerate()
            .map(|(_i, &w)| {
                if w.is_finite() && w >= 0.0 {
                    w
                } else {
                    log_warn!(
                        node = graph.node_id(_i as u32),
                        weight = w,
                        "relevance clamped to 0"
                    );
                    0.0
                }
            })
            .collect();

        // Scale by the largest weight first so the sum cannot overflow
        let max = raw.iter().copied().fold(0.0, f64::max);
        if max > 0.0 {
            let scaled: Vec<f64> = raw.iter().map(|&w| w / max).collect();
            let sum: f64 = scaled.iter().sum();
            Ok(Self {
                weights: scaled.iter().map(|&w| w / sum).collect(),
                uniform_fallback: false,
            })
        } else {
            log_debug!(nodes = n, "no relevant node, teleport falls back to uniform");
            let mut uniform = Self::uniform(n)?;
            uniform.uniform_fallback = true;
            Ok(uniform)
        }
    }

    /// Id-keyed variant of [`TeleportVector::biased`]
    ///
    /// Nodes absent from `weights` get zero; ids unknown to the graph are
    /// ignored.
    pub fn from_id_weights(graph: &CsrGraph, weights: &FxHashMap<String, f64>) -> Result<Self> {
        let relevance: Vec<f64> = graph
            .ids
            .iter()
            .map(|id| weights.get(id).copied().unwrap_or(0.0))
            .collect();
        Self::biased(graph, &relevance)
    }

    /// Weight of one node
    pub fn weight(&self, node: u32) -> f64 {
        self.weights.get(node as usize).copied().unwrap_or(0.0)
    }

    /// All weights, indexed by node
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Number of nodes covered
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// True for a zero-length vector (never produced by the constructors)
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Whether a biased build found nothing relevant and fell back to uniform
    pub fn is_uniform_fallback(&self) -> bool {
        self.uniform_fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_graph() -> CsrGraph {
        CsrGraph::from_adjacency([("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]).unwrap()
    }

    #[test]
    fn test_uniform() {
        let t = TeleportVector::uniform(4).unwrap();
        assert_eq!(t.len(), 4);
        assert!(t.as_slice().iter().all(|&w| (w - 0.25).abs() < 1e-12));
        assert!(!t.is_uniform_fallback());
    }

    #[test]
    fn test_uniform_empty_fails() {
        assert!(matches!(
            TeleportVector::uniform(0),
            Err(RankError::EmptyGraph)
        ));
    }

    #[test]
    fn test_biased_normalizes() {
        let graph = build_graph();
        let t = TeleportVector::biased(&graph, &[1.0, 0.0, 3.0]).unwrap();

        assert!((t.weight(0) - 0.25).abs() < 1e-12);
        assert_eq!(t.weight(1), 0.0);
        assert!((t.weight(2) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_relevance_equals_uniform() {
        let graph = build_graph();
        let t = TeleportVector::biased(&graph, &[0.0, 0.0, 0.0]).unwrap();
        let uniform = TeleportVector::uniform(3).unwrap();

        assert_eq!(t.as_slice(), uniform.as_slice());
        assert!(t.is_uniform_fallback());
    }

    #[test]
    fn test_invalid_relevance_counts_as_zero() {
        let graph = build_graph();
        let t = TeleportVector::biased(&graph, &[-2.0, f64::NAN, 1.0]).unwrap();

        assert_eq!(t.as_slice(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_huge_relevance_stays_normalized() {
        let graph = build_graph();
        let t = TeleportVector::biased(&graph, &[f64::MAX, 1e308, 0.0]).unwrap();

        let sum: f64 = t.as_slice().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(t.weight(0) > t.weight(1));
        assert_eq!(t.weight(2), 0.0);
        assert!(!t.is_uniform_fallback());
    }

    #[test]
    fn test_length_mismatch() {
        let graph = build_graph();
        let err = TeleportVector::biased(&graph, &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            RankError::LengthMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_from_id_weights() {
        let graph = build_graph();
        let mut weights = FxHashMap::default();
        weights.insert("B".to_string(), 2.0);
        weights.insert("unknown".to_string(), 5.0);

        let t = TeleportVector::from_id_weights(&graph, &weights).unwrap();
        assert_eq!(t.as_slice(), &[0.0, 1.0, 0.0]);
    }
}
