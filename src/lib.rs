//! # linkrank
//!
//! Link-analysis ranking over directed page graphs.
//!
//! The crate computes classic PageRank and topic-specific (personalized)
//! PageRank with a shared power-iteration solver. Dangling pages hand their
//! mass back through the teleport distribution, so topic bias survives sinks.
//!
//! ## Layout
//!
//! - [`graph`]: id-keyed builder and the frozen CSR graph with its inbound index
//! - [`teleport`]: uniform and relevance-biased teleport vectors
//! - [`pagerank`]: the solver and its standard/personalized front ends
//! - [`relevance`], [`formats`], [`report`]: collaborators around the engine
//! - [`config`]: numeric options plus the validated JSON rank spec
//! - [`ranker`]: one-call classic and topic runs
//!
//! ```
//! use linkrank::{CsrGraph, StandardPageRank};
//!
//! let graph = CsrGraph::from_adjacency([
//!     ("A", vec!["B", "C"]),
//!     ("B", vec!["C"]),
//!     ("C", vec!["A"]),
//! ])
//! .unwrap();
//! let result = StandardPageRank::new().run(&graph).unwrap();
//! assert!(result.converged);
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod errors;
pub mod formats;
pub mod graph;
pub mod pagerank;
pub mod ranker;
pub mod relevance;
pub mod report;
pub mod teleport;

// Re-export commonly used types
pub use config::{RankConfig, RankSpec, RankVariant};
pub use errors::{RankError, Result};
pub use graph::{builder::GraphBuilder, csr::CsrGraph, csr::InLinkIndex};
pub use pagerank::{
    observer::{ConvergenceTrace, IterationObserver, NoopObserver},
    personalized::PersonalizedPageRank,
    standard::StandardPageRank,
    PageRankResult,
};
pub use ranker::LinkRanker;
pub use relevance::{KeywordMatcher, PageMeta};
pub use report::{NetworkStats, RankedPage};
pub use teleport::TeleportVector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
