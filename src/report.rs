//! Ranking report: pages by descending score, with link statistics.
//!
//! This is data only; printing is left to the caller.

use crate::graph::csr::CsrGraph;
use crate::pagerank::PageRankResult;
use serde::Serialize;

/// One page in a ranking listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPage {
    pub id: String,
    pub score: f64,
    pub in_degree: usize,
    pub out_degree: usize,
}

/// Whole-graph summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub pages: usize,
    pub links: usize,
    pub average_rank: f64,
}

/// Every page sorted by descending score, ties broken by id
pub fn ranked_pages(graph: &CsrGraph, result: &PageRankResult) -> Vec<RankedPage> {
    let in_links = graph.in_links();
    let mut pages: Vec<RankedPage> = (0..graph.num_nodes as u32)
        .map(|node| RankedPage {
            id: graph.node_id(node).to_string(),
            score: result.score(node),
            in_degree: in_links.in_degree(node),
            out_degree: graph.degree(node) as usize,
        })
        .collect();
    pages.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    pages
}

pub fn network_stats(graph: &CsrGraph, result: &PageRankResult) -> NetworkStats {
    let average_rank = if graph.is_empty() {
        0.0
    } else {
        result.sum() / graph.num_nodes as f64
    };
    NetworkStats {
        pages: graph.num_nodes,
        links: graph.num_links(),
        average_rank,
    }
}
