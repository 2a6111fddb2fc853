//! Personalized (topic-specific) PageRank
//!
//! PPR uses a custom teleport distribution instead of uniform teleportation.
//! Dangling mass follows the same distribution, which keeps the random walk
//! inside the topic's teleport set even when it hits a sink.

use super::solver;
use super::PageRankResult;
use crate::config::RankConfig;
use crate::errors::Result;
use crate::graph::csr::CsrGraph;
use crate::teleport::TeleportVector;
use std::borrow::Cow;

#[derive(Debug, Clone)]
enum Personalization {
    /// Raw per-node weights, normalized at run time
    Weights(Vec<f64>),
    /// A ready-made distribution
    Vector(TeleportVector),
}

/// Personalized PageRank implementation
#[derive(Debug, Clone)]
pub struct PersonalizedPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the L1 delta
    pub tolerance: f64,
    personalization: Option<Personalization>,
}

impl Default for PersonalizedPageRank {
    fn default() -> Self {
        Self::from_config(&RankConfig::topic())
    }
}

impl PersonalizedPageRank {
    /// Create a new PersonalizedPageRank with the topic-run defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every numeric option from a config
    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            personalization: None,
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

    /// Set the personalization vector (relevance per node)
    ///
    /// The vector should have one entry per node. It is normalized at run
    /// time; an all-zero vector falls back to uniform.
    pub fn with_personalization(mut self, personalization: Vec<f64>) -> Self {
        self.personalization = Some(Personalization::Weights(personalization));
        self
    }

    /// Set personalization from a sparse representation
    ///
    /// Takes a list of (node, weight) pairs and the total number of nodes.
    /// Nodes not in the list get weight 0.
    pub fn with_sparse_personalization(self, biases: &[(u32, f64)], num_nodes: usize) -> Self {
        let mut personalization = vec![0.0; num_nodes];
        for &(node, weight) in biases {
            if (node as usize) < num_nodes {
                personalization[node as usize] = weight;
            }
        }
        self.with_personalization(personalization)
    }

    /// Use an already-built teleport vector
    pub fn with_teleport(mut self, teleport: TeleportVector) -> Self {
        self.personalization = Some(Personalization::Vector(teleport));
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

    /// Run Personalized PageRank on a graph
    pub fn run(&self, graph: &CsrGraph) -> Result<PageRankResult> {
        let teleport = self.prepare_teleport(graph)?;
        solver::solve(graph, &teleport, &self.config())
    }

    /// Resolve the teleport vector for this graph
    fn prepare_teleport(&self, graph: &CsrGraph) -> Result<Cow<'_, TeleportVector>> {
        match &self.personalization {
            Some(Personalization::Vector(t)) => Ok(Cow::Borrowed(t)),
            Some(Personalization::Weights(w)) => {
                Ok(Cow::Owned(TeleportVector::biased(graph, w)?))
            }
            // Uniform distribution (equivalent to standard PageRank)
            None => Ok(Cow::Owned(TeleportVector::uniform(graph.num_nodes)?)),
        }
    }
}
