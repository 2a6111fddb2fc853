//! PageRank algorithms
//!
//! This module provides the shared power-iteration solver and its standard
//! and personalized (topic-specific) front ends.

pub mod observer;
pub mod personalized;
pub mod solver;
pub mod standard;

use crate::graph::csr::CsrGraph;
use std::collections::HashMap;

/// Result of a PageRank computation
#[derive(Debug, Clone)]
pub struct PageRankResult {
    /// Scores for each node (indexed by node index), summing to 1
    pub scores: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Final convergence delta (L1 distance of the last iteration)
    pub delta: f64,
    /// Whether the delta fell below the tolerance within the budget
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get top N nodes by score
    pub fn top_n(&self, n: usize) -> Vec<(u32, f64)> {
        let mut indexed: Vec<_> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as u32, s))
            .collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        indexed.truncate(n);
        indexed
    }

    /// Get the score for a specific node
    pub fn score(&self, node: u32) -> f64 {
        self.scores.get(node as usize).copied().unwrap_or(0.0)
    }

    /// Get the score for a page id
    pub fn score_of(&self, graph: &CsrGraph, id: &str) -> Option<f64> {
        graph.index_of(id).map(|node| self.score(node))
    }

    /// Id-keyed view of the scores
    pub fn to_map(&self, graph: &CsrGraph) -> HashMap<String, f64> {
        graph
            .ids
            .iter()
            .cloned()
            .zip(self.scores.iter().copied())
            .collect()
    }

    /// Total rank mass
    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }
}
