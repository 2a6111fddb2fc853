//! Compressed Sparse Row (CSR) link graph
//!
//! CSR keeps every node's outbound links contiguous. The solver works on the
//! reverse view, [`InLinkIndex`], which is derived once per solve and never
//! mutated while iterating.

use super::builder::GraphBuilder;
use crate::errors::Result;
use rustc_hash::FxHashMap;

/// A directed graph in Compressed Sparse Row format
///
/// Immutable once built; share it freely between concurrent solves.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    /// Number of nodes
    pub num_nodes: usize,
    /// Row pointers: node i's links are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each link
    pub col_idx: Vec<u32>,
    /// Out-degree for each node
    pub out_degree: Vec<u32>,
    /// Page id for each node
    pub ids: Vec<String>,
    id_to_index: FxHashMap<String, u32>,
}

impl CsrGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(builder.link_count());
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut ids = Vec::with_capacity(num_nodes);

        row_ptr.push(0);

        for (_, node) in builder.nodes() {
            ids.push(node.id.clone());
            out_degree.push(node.links.len() as u32);
            col_idx.extend_from_slice(&node.links);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            out_degree,
            ids,
            id_to_index: builder.into_index(),
        }
    }

    /// Build a graph from `page id -> outbound target ids`
    ///
    /// Node order is first appearance: each key, then its unseen targets.
    /// Targets never declared as keys become dangling nodes.
    pub fn from_adjacency<I, K, T, S>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        trace_stage!("graph");
        let mut builder = GraphBuilder::new();
        for (id, targets) in edges {
            builder.add_page(id.as_ref(), targets)?;
        }
        let graph = Self::from_builder(builder);
        log_debug!(
            nodes = graph.num_nodes,
            links = graph.num_links(),
            "built link graph"
        );
        Ok(graph)
    }

    /// Iterate over the outbound targets of a node
    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = u32> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        self.col_idx[start..end].iter().copied()
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: u32) -> u32 {
        self.out_degree[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the total number of links
    pub fn num_links(&self) -> usize {
        self.col_idx.len()
    }

    /// Find dangling nodes (nodes with no outbound links)
    pub fn dangling_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.out_degree[n as usize] == 0)
            .collect()
    }

    /// Get the page id of a node
    pub fn node_id(&self, node: u32) -> &str {
        &self.ids[node as usize]
    }

    /// Look up a node index by page id
    pub fn index_of(&self, id: &str) -> Option<u32> {
        self.id_to_index.get(id).copied()
    }

    /// Build the reverse adjacency index
    pub fn in_links(&self) -> InLinkIndex {
        InLinkIndex::from_graph(self)
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            out_degree: Vec::new(),
            ids: Vec::new(),
            id_to_index: FxHashMap::default(),
        }
    }
}

/// Reverse adjacency in CSR form: for every node, the nodes linking to it
///
/// One entry per link, so a page linking twice to the same target appears
/// twice in that target's row.
#[derive(Debug, Clone)]
pub struct InLinkIndex {
    row_ptr: Vec<usize>,
    sources: Vec<u32>,
}

impl InLinkIndex {
    /// Derive the index from the graph's outbound rows
    pub fn from_graph(graph: &CsrGraph) -> Self {
        let n = graph.num_nodes;

        let mut counts = vec![0usize; n + 1];
        for &target in &graph.col_idx {
            counts[target as usize + 1] += 1;
        }
        for i in 0..n {
            counts[i + 1] += counts[i];
        }
        let row_ptr = counts;

        // Sources are filled in ascending order, so rows come out sorted
        let mut cursor = row_ptr.clone();
        let mut sources = vec![0u32; graph.col_idx.len()];
        for source in 0..n as u32 {
            for target in graph.neighbors(source) {
                let slot = &mut cursor[target as usize];
                sources[*slot] = source;
                *slot += 1;
            }
        }

        Self { row_ptr, sources }
    }

    /// Nodes linking to `node`
    pub fn sources(&self, node: u32) -> &[u32] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.sources[start..end]
    }

    /// Number of inbound links of `node`
    pub fn in_degree(&self, node: u32) -> usize {
        self.sources(node).len()
    }

    /// Number of nodes covered by the index
    pub fn num_nodes(&self) -> usize {
        self.row_ptr.len() - 1
    }
}
