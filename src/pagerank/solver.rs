//! Power-iteration solver shared by every PageRank variant
//!
//! One iteration, for every node `p`:
//!
//! ```text
//! new(p) = (1 - d) * t(p) + d * ( sum_{q -> p} rank(q) / out(q) + dangling * t(p) )
//! ```
//!
//! where `t` is the teleport vector and `dangling` is the rank held by nodes
//! without outbound links. Dangling mass goes back out through `t`, so a
//! biased teleport vector keeps its bias when the walk passes through sinks.
//!
//! Updates are Jacobi-style: the next vector is written into a second buffer
//! and only read after every node has been computed.

use super::observer::{IterationObserver, NoopObserver};
use super::PageRankResult;
use crate::config::RankConfig;
use crate::errors::{RankError, Result};
use crate::graph::csr::{CsrGraph, InLinkIndex};
use crate::teleport::TeleportVector;
use rayon::prelude::*;

/// Node count from which the per-node update runs on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Solve from a uniform starting vector
pub fn solve(
    graph: &CsrGraph,
    teleport: &TeleportVector,
    config: &RankConfig,
) -> Result<PageRankResult> {
    solve_observed(graph, teleport, config, &mut NoopObserver)
}

/// [`solve`] with progress callbacks
pub fn solve_observed(
    graph: &CsrGraph,
    teleport: &TeleportVector,
    config: &RankConfig,
    observer: &mut impl IterationObserver,
) -> Result<PageRankResult> {
    check_inputs(graph, teleport, config)?;
    let initial = vec![1.0 / graph.num_nodes as f64; graph.num_nodes];
    Ok(power_iterate(
        graph,
        teleport,
        config,
        initial,
        graph.num_nodes >= PARALLEL_THRESHOLD,
        observer,
    ))
}

/// Solve from a caller-supplied starting vector (warm start)
///
/// `initial` must hold one finite, non-negative value per node with a
/// positive sum; it is renormalized before the first iteration.
pub fn solve_from(
    graph: &CsrGraph,
    teleport: &TeleportVector,
    config: &RankConfig,
    initial: &[f64],
) -> Result<PageRankResult> {
    check_inputs(graph, teleport, config)?;
    if initial.len() != graph.num_nodes {
        return Err(RankError::LengthMismatch {
            expected: graph.num_nodes,
            actual: initial.len(),
        });
    }
    if initial.iter().any(|&x| !x.is_finite() || x < 0.0) {
        return Err(RankError::InvalidConfig(
            "initial rank vector must be finite and non-negative".to_string(),
        ));
    }
    let sum: f64 = initial.iter().sum();
    if sum <= 0.0 {
        return Err(RankError::InvalidConfig(
            "initial rank vector has no mass".to_string(),
        ));
    }
    let initial = initial.iter().map(|&x| x / sum).collect();

    Ok(power_iterate(
        graph,
        teleport,
        config,
        initial,
        graph.num_nodes >= PARALLEL_THRESHOLD,
        &mut NoopObserver,
    ))
}

fn check_inputs(graph: &CsrGraph, teleport: &TeleportVector, config: &RankConfig) -> Result<()> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }
    config.validate()?;
    if teleport.len() != graph.num_nodes {
        return Err(RankError::LengthMismatch {
            expected: graph.num_nodes,
            actual: teleport.len(),
        });
    }
    Ok(())
}

/// Read-only state for one solve
struct Step<'a> {
    in_links: &'a InLinkIndex,
    out_degree: &'a [u32],
    teleport: &'a [f64],
    damping: f64,
}

impl Step<'_> {
    #[inline]
    fn next_rank(&self, node: usize, scores: &[f64], dangling_mass: f64) -> f64 {
        let link_mass: f64 = self
            .in_links
            .sources(node as u32)
            .iter()
            .map(|&q| scores[q as usize] / self.out_degree[q as usize] as f64)
            .sum();
        let t = self.teleport[node];
        (1.0 - self.damping) * t + self.damping * (link_mass + dangling_mass * t)
    }
}

/// Inputs are assumed checked. `initial` must sum to 1.
pub(crate) fn power_iterate(
    graph: &CsrGraph,
    teleport: &TeleportVector,
    config: &RankConfig,
    initial: Vec<f64>,
    parallel: bool,
    observer: &mut impl IterationObserver,
) -> PageRankResult {
    trace_stage!("rank");
    let n = graph.num_nodes;

    // Built once; the graph does not change during a solve
    let in_links = graph.in_links();
    let dangling_nodes = graph.dangling_nodes();
    let step = Step {
        in_links: &in_links,
        out_degree: &graph.out_degree,
        teleport: teleport.as_slice(),
        damping: config.damping,
    };

    let mut scores = initial;
    let mut new_scores = vec![0.0; n];
    let mut iterations = 0;
    let mut delta = f64::INFINITY;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        let dangling_mass: f64 = dangling_nodes.iter().map(|&d| scores[d as usize]).sum();

        if parallel {
            new_scores
                .par_iter_mut()
                .enumerate()
                .for_each(|(p, slot)| *slot = step.next_rank(p, &scores, dangling_mass));
        } else {
            for (p, slot) in new_scores.iter_mut().enumerate() {
                *slot = step.next_rank(p, &scores, dangling_mass);
            }
        }

        // Calculate convergence delta (L1 norm)
        delta = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        // Swap buffers
        std::mem::swap(&mut scores, &mut new_scores);
        observer.on_iteration(iterations, delta);

        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    // Remove floating-point drift
    let sum: f64 = scores.iter().sum();
    if sum > 0.0 {
        for score in &mut scores {
            *score /= sum;
        }
    }

    if converged {
        log_debug!(iterations, delta, nodes = n, "pagerank converged");
    } else {
        log_warn!(
            iterations,
            delta,
            tolerance = config.tolerance,
            "pagerank stopped at iteration budget without converging"
        );
    }

    let result = PageRankResult::new(scores, iterations, delta, converged);
    observer.on_finish(&result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagerank::observer::ConvergenceTrace;

    fn build_example_graph() -> CsrGraph {
        CsrGraph::from_adjacency([
            ("A", vec!["B", "C"]),
            ("B", vec!["C"]),
            ("C", vec!["A"]),
            ("D", vec!["C"]),
            ("E", vec!["A", "D"]),
        ])
        .unwrap()
    }

    fn uniform(graph: &CsrGraph) -> TeleportVector {
        TeleportVector::uniform(graph.num_nodes).unwrap()
    }

    #[test]
    fn test_example_graph_converges() {
        let graph = build_example_graph();
        let cfg = RankConfig::default();
        let result = solve(&graph, &uniform(&graph), &cfg).unwrap();

        assert!(result.converged);
        assert!(result.iterations < 100);
        assert!(result.delta < 1e-6);

        let c = result.score_of(&graph, "C").unwrap();
        let d = result.score_of(&graph, "D").unwrap();
        assert!(c > d);
        assert!((result.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_example_graph_known_values() {
        let graph = build_example_graph();
        let result = solve(&graph, &uniform(&graph), &RankConfig::default()).unwrap();

        // E has no inbound links: it only ever receives the random jump
        let e = result.score_of(&graph, "E").unwrap();
        assert!((e - 0.15 / 5.0).abs() < 1e-6);
        // D is fed by half of E
        let d = result.score_of(&graph, "D").unwrap();
        assert!((d - (0.03 + 0.85 * 0.03 / 2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_single_dangling_node() {
        let graph = CsrGraph::from_adjacency([("X", Vec::<&str>::new())]).unwrap();

        for teleport in [
            TeleportVector::uniform(1).unwrap(),
            TeleportVector::biased(&graph, &[0.0]).unwrap(),
            TeleportVector::biased(&graph, &[7.0]).unwrap(),
        ] {
            let result = solve(&graph, &teleport, &RankConfig::default()).unwrap();
            assert_eq!(result.scores, vec![1.0]);
            assert!(result.converged);
        }
    }

    #[test]
    fn test_two_nodes_with_dangling_sink() {
        // A -> B, B dangling. Fixed point: a = 0.075 + 0.425 b, a + b = 1
        let graph = CsrGraph::from_adjacency([("A", vec!["B"]), ("B", vec![])]).unwrap();
        let cfg = RankConfig::default().with_tolerance(1e-12).with_max_iterations(500);
        let result = solve(&graph, &uniform(&graph), &cfg).unwrap();

        let a = 0.5 / 1.425;
        assert!(result.converged);
        assert!((result.score(0) - a).abs() < 1e-9);
        assert!((result.score(1) - (1.0 - a)).abs() < 1e-9);
    }

    #[test]
    fn test_all_nodes_dangling() {
        let graph = CsrGraph::from_adjacency([
            ("A", Vec::<&str>::new()),
            ("B", vec![]),
            ("C", vec![]),
        ])
        .unwrap();
        let teleport = TeleportVector::biased(&graph, &[1.0, 1.0, 2.0]).unwrap();
        let result = solve(&graph, &teleport, &RankConfig::default()).unwrap();

        // With no links at all the stationary vector is the teleport vector
        for (score, weight) in result.scores.iter().zip(teleport.as_slice()) {
            assert!((score - weight).abs() < 1e-9);
        }
    }

    #[test]
    fn test_budget_exhaustion_is_not_an_error() {
        let graph = build_example_graph();
        let cfg = RankConfig::default().with_max_iterations(2);
        let result = solve(&graph, &uniform(&graph), &cfg).unwrap();

        assert_eq!(result.iterations, 2);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 5);
        assert!((result.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_warm_start_from_converged_vector() {
        let graph = build_example_graph();
        let teleport = uniform(&graph);
        let cfg = RankConfig::default().with_tolerance(1e-10).with_max_iterations(500);
        let first = solve(&graph, &teleport, &cfg).unwrap();
        assert!(first.converged);

        let again = solve_from(&graph, &teleport, &cfg, &first.scores).unwrap();
        assert_eq!(again.iterations, 1);
        assert!(again.delta < 1e-9);
    }

    #[test]
    fn test_warm_start_validation() {
        let graph = build_example_graph();
        let teleport = uniform(&graph);
        let cfg = RankConfig::default();

        assert!(matches!(
            solve_from(&graph, &teleport, &cfg, &[1.0]),
            Err(RankError::LengthMismatch { .. })
        ));
        assert!(matches!(
            solve_from(&graph, &teleport, &cfg, &[0.0; 5]),
            Err(RankError::InvalidConfig(_))
        ));
        assert!(matches!(
            solve_from(&graph, &teleport, &cfg, &[1.0, -1.0, 1.0, 1.0, 1.0]),
            Err(RankError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let graph = build_example_graph();
        let teleport = TeleportVector::biased(&graph, &[1.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
        let cfg = RankConfig::topic();
        let start = vec![0.2; 5];

        let seq = power_iterate(&graph, &teleport, &cfg, start.clone(), false, &mut NoopObserver);
        let par = power_iterate(&graph, &teleport, &cfg, start, true, &mut NoopObserver);

        assert_eq!(seq.iterations, par.iterations);
        for (s, p) in seq.scores.iter().zip(par.scores.iter()) {
            assert!((s - p).abs() < 1e-15);
        }
    }

    #[test]
    fn test_observer_sees_every_iteration() {
        let graph = build_example_graph();
        let mut trace = ConvergenceTrace::new();
        let result =
            solve_observed(&graph, &uniform(&graph), &RankConfig::default(), &mut trace).unwrap();

        assert_eq!(trace.deltas.len(), result.iterations);
        assert_eq!(trace.last_delta(), Some(result.delta));
        assert_eq!(trace.converged, Some(true));
    }

    #[test]
    fn test_precondition_errors() {
        let graph = build_example_graph();
        let teleport = uniform(&graph);

        assert!(matches!(
            solve(&CsrGraph::default(), &teleport, &RankConfig::default()),
            Err(RankError::EmptyGraph)
        ));
        assert!(matches!(
            solve(&graph, &teleport, &RankConfig::default().with_damping(1.0)),
            Err(RankError::InvalidConfig(_))
        ));
        assert!(matches!(
            solve(&graph, &TeleportVector::uniform(2).unwrap(), &RankConfig::default()),
            Err(RankError::LengthMismatch { expected: 5, actual: 2 })
        ));
    }

    #[test]
    fn test_zero_damping_returns_teleport() {
        let graph = build_example_graph();
        let teleport = TeleportVector::biased(&graph, &[0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
        let result = solve(&graph, &teleport, &RankConfig::default().with_damping(0.0)).unwrap();

        assert!((result.score(2) - 1.0).abs() < 1e-12);
        assert!(result.converged);
    }
}
