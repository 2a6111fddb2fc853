//! Error types for graph construction, configuration and solving.
//!
//! Non-convergence is not represented here: a solve that runs out of
//! iterations still returns `Ok` with `converged == false`.

use thiserror::Error;

use crate::config::validation::ValidationReport;

/// Errors raised by the ranking engine.
#[derive(Debug, Error)]
pub enum RankError {
    /// The graph has no nodes, so no stationary distribution exists.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// An edge list contained an invalid node identifier.
    #[error("malformed graph: {reason}")]
    MalformedGraph { reason: String },

    /// A numeric option is outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A per-node vector does not cover exactly the graph's nodes.
    #[error("expected {expected} per-node values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// JSON input could not be decoded.
    #[error("failed to parse input: {0}")]
    Parse(#[from] serde_json::Error),

    /// A rank spec failed validation; the report lists every problem.
    #[error("invalid rank spec ({} error(s))", .0.errors().count())]
    InvalidSpec(ValidationReport),
}

impl RankError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedGraph {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(RankError::EmptyGraph.to_string(), "graph has no nodes");
        assert_eq!(
            RankError::malformed("empty target id in links of \"A\"").to_string(),
            "malformed graph: empty target id in links of \"A\""
        );
        assert_eq!(
            RankError::LengthMismatch {
                expected: 3,
                actual: 2
            }
            .to_string(),
            "expected 3 per-node values, got 2"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let err: RankError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, RankError::Parse(_)));
    }
}
