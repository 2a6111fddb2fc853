//! Standard PageRank algorithm
//!
//! Classic PageRank: uniform teleportation, with dangling-node mass spread
//! uniformly as well.

use super::solver;
use super::PageRankResult;
use crate::config::RankConfig;
use crate::errors::Result;
use crate::graph::csr::CsrGraph;
use crate::teleport::TeleportVector;

/// Standard PageRank implementation
#[derive(Debug, Clone)]
pub struct StandardPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the L1 delta
    pub tolerance: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self::from_config(&RankConfig::classic())
    }
}

impl StandardPageRank {
    /// Create a new StandardPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every numeric option from a config
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The options as a [`RankConfig`]
    pub fn config(&self) -> RankConfig {
        RankConfig {
            damping: self.damping,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }

    /// Run PageRank on a graph
    ///
    /// Returns the result even if convergence wasn't achieved, with `converged=false`.
    pub fn run(&self, graph: &CsrGraph) -> Result<PageRankResult> {
        let teleport = TeleportVector::uniform(graph.num_nodes)?;
        solver::solve(graph, &teleport, &self.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RankError;

    fn build_cycle_graph() -> CsrGraph {
        CsrGraph::from_adjacency([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]).unwrap()
    }

    fn build_star_graph() -> CsrGraph {
        // Three spokes all linking to the hub
        CsrGraph::from_adjacency([
            ("hub", vec![]),
            ("s1", vec!["hub"]),
            ("s2", vec!["hub"]),
            ("s3", vec!["hub"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_cycle_graph_equal_scores() {
        let graph = build_cycle_graph();
        let result = StandardPageRank::new().run(&graph).unwrap();

        assert!(result.converged);
        let expected = 1.0 / 3.0;
        for score in &result.scores {
            assert!((score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_star_graph_hub_highest() {
        let graph = build_star_graph();
        let result = StandardPageRank::new().run(&graph).unwrap();

        assert!(result.converged);
        let hub_score = result.scores[0];
        for &score in &result.scores[1..] {
            assert!(hub_score > score);
        }
    }

    #[test]
    fn test_scores_sum_to_one() {
        let graph = build_star_graph();
        let result = StandardPageRank::new().run(&graph).unwrap();

        assert!((result.sum() - 1.0).abs() < 1e-9);
        assert!(result.scores.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn test_empty_graph() {
        let result = StandardPageRank::new().run(&CsrGraph::default());
        assert!(matches!(result, Err(RankError::EmptyGraph)));
    }

    #[test]
    fn test_max_iterations_returns_partial() {
        let graph = build_star_graph();
        let result = StandardPageRank::new()
            .with_max_iterations(1)
            .with_tolerance(1e-300)
            .run(&graph)
            .unwrap();

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
    }

    #[test]
    fn test_damping_factor() {
        let graph = build_star_graph();

        // Lower damping = more teleportation = more uniform scores
        let result_low = StandardPageRank::new().with_damping(0.5).run(&graph).unwrap();
        let result_high = StandardPageRank::new().with_damping(0.95).run(&graph).unwrap();

        let hub_advantage_low = result_low.scores[0] - result_low.scores[1];
        let hub_advantage_high = result_high.scores[0] - result_high.scores[1];

        assert!(hub_advantage_high > hub_advantage_low);
    }

    #[test]
    fn test_top_n() {
        let graph = build_star_graph();
        let result = StandardPageRank::new().run(&graph).unwrap();

        let top_2 = result.top_n(2);
        assert_eq!(top_2.len(), 2);
        assert_eq!(top_2[0].0, 0);
    }

    #[test]
    fn test_invalid_damping_rejected() {
        let graph = build_cycle_graph();
        let result = StandardPageRank::new().with_damping(1.2).run(&graph);
        assert!(matches!(result, Err(RankError::InvalidConfig(_))));
    }
}
