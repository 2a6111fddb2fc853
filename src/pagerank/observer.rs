//! Solver observer: hooks for logging, profiling, and debugging.
//!
//! Observers are notified after every iteration and once at the end, without
//! coupling to the update loop. Both hooks default to no-ops.

use super::PageRankResult;

/// Receives progress callbacks from the power iteration.
pub trait IterationObserver {
    /// Called after each iteration with its 1-based number and L1 delta.
    fn on_iteration(&mut self, _iteration: usize, _delta: f64) {}

    /// Called once with the normalized result.
    fn on_finish(&mut self, _result: &PageRankResult) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IterationObserver for NoopObserver {}

/// Records the delta of every iteration.
#[derive(Debug, Clone, Default)]
pub struct ConvergenceTrace {
    pub deltas: Vec<f64>,
    pub converged: Option<bool>,
}

impl ConvergenceTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta of the last recorded iteration
    pub fn last_delta(&self) -> Option<f64> {
        self.deltas.last().copied()
    }
}

impl IterationObserver for ConvergenceTrace {
    fn on_iteration(&mut self, _iteration: usize, delta: f64) {
        self.deltas.push(delta);
    }

    fn on_finish(&mut self, result: &PageRankResult) {
        self.converged = Some(result.converged);
    }
}

impl<O: IterationObserver + ?Sized> IterationObserver for &mut O {
    fn on_iteration(&mut self, iteration: usize, delta: f64) {
        (**self).on_iteration(iteration, delta);
    }

    fn on_finish(&mut self, result: &PageRankResult) {
        (**self).on_finish(result);
    }
}
