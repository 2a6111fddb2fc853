//! Solver options and the declarative rank specification.
//!
//! ## Submodules
//!
//! - [`spec`]: JSON-facing [`RankSpec`]
//! - [`validation`]: rule engine collecting every diagnostic at once
//! - [`error_code`] / [`errors`]: stable codes and structured diagnostics

pub mod error_code;
pub mod errors;
pub mod spec;
pub mod validation;

pub use error_code::ErrorCode;
pub use errors::SpecError;
pub use spec::{RankSpec, RankVariant};
pub use validation::{Severity, ValidationDiagnostic, ValidationEngine, ValidationReport};

use crate::errors::{RankError, Result};
use serde::{Deserialize, Serialize};

/// Default damping factor: probability of following a link
pub const DEFAULT_DAMPING: f64 = 0.85;
/// Default L1 convergence tolerance for classic runs
pub const DEFAULT_TOLERANCE: f64 = 1e-6;
/// Default iteration budget for classic runs
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
/// Tolerance used by the topic-specific preset
pub const TOPIC_TOLERANCE: f64 = 1e-8;
/// Iteration budget used by the topic-specific preset
pub const TOPIC_MAX_ITERATIONS: usize = 200;

/// Numeric options shared by every solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Probability of following an outbound link rather than teleporting
    pub damping: f64,
    /// Stop once the L1 delta between iterations drops below this
    pub tolerance: f64,
    /// Hard bound on the number of iterations
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RankConfig {
    /// Classic PageRank defaults
    pub fn classic() -> Self {
        Self::default()
    }

    /// Topic-specific defaults: tighter tolerance, larger budget
    pub fn topic() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            tolerance: TOPIC_TOLERANCE,
            max_iterations: TOPIC_MAX_ITERATIONS,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check the solver preconditions on the numeric options
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(RankError::InvalidConfig(format!(
                "damping must be in [0, 1), got {}",
                self.damping
            )));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(RankError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(RankError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
