//! One-call ranking runs.
//!
//! [`LinkRanker`] wires the teleport builder and the solver together for the
//! two supported variants, so callers only bring a graph, options and (for
//! topic runs) a relevance signal.

use crate::config::{RankConfig, RankSpec, RankVariant};
use crate::errors::Result;
use crate::graph::csr::CsrGraph;
use crate::pagerank::observer::{IterationObserver, NoopObserver};
use crate::pagerank::{solver, PageRankResult};
use crate::relevance::{KeywordMatcher, PageMeta};
use crate::teleport::TeleportVector;
use rustc_hash::FxHashMap;

/// Runs classic or topic-specific PageRank with fixed options
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkRanker {
    config: RankConfig,
}

impl LinkRanker {
    pub fn new(config: RankConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Classic PageRank
    pub fn rank_classic(&self, graph: &CsrGraph) -> Result<PageRankResult> {
        self.rank_classic_observed(graph, &mut NoopObserver)
    }

    pub fn rank_classic_observed(
        &self,
        graph: &CsrGraph,
        observer: &mut impl IterationObserver,
    ) -> Result<PageRankResult> {
        let teleport = TeleportVector::uniform(graph.num_nodes)?;
        solver::solve_observed(graph, &teleport, &self.config, observer)
    }

    /// Topic-specific PageRank from one relevance value per node
    pub fn rank_topic(&self, graph: &CsrGraph, relevance: &[f64]) -> Result<PageRankResult> {
        self.rank_topic_observed(graph, relevance, &mut NoopObserver)
    }

    pub fn rank_topic_observed(
        &self,
        graph: &CsrGraph,
        relevance: &[f64],
        observer: &mut impl IterationObserver,
    ) -> Result<PageRankResult> {
        let teleport = TeleportVector::biased(graph, relevance)?;
        solver::solve_observed(graph, &teleport, &self.config, observer)
    }

    /// Run whatever a validated spec asks for
    ///
    /// Topic runs match the spec's keywords against `pages`; pages missing
    /// from the map are never relevant. The spec's options replace this
    /// ranker's own.
    pub fn rank_with_spec(
        graph: &CsrGraph,
        spec: &RankSpec,
        pages: &FxHashMap<String, PageMeta>,
    ) -> Result<PageRankResult> {
        let ranker = Self::new(spec.resolve()?);
        match spec.variant {
            RankVariant::Classic => ranker.rank_classic(graph),
            RankVariant::Topic => {
                let relevance = KeywordMatcher::new(&spec.keywords).relevance_for(graph, pages);
                ranker.rank_topic(graph, &relevance)
            }
        }
    }
}
