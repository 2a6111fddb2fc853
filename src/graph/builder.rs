//! Graph builder with id interning
//!
//! This module provides a mutable, directed link-graph builder that uses
//! FxHashMap for O(1) id lookups during construction.

use crate::errors::{RankError, Result};
use rustc_hash::FxHashMap;

/// A node in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The page identifier for this node
    pub id: String,
    /// Outbound links in insertion order (duplicates are parallel edges)
    pub links: Vec<u32>,
}

impl BuilderNode {
    /// Create a new node with no outbound links
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            links: Vec::new(),
        }
    }
}

/// A mutable directed graph builder optimized for incremental construction
///
/// Link targets that were never declared as pages are added on first sight
/// with an empty outbound list, so the node set is always closed under
/// "appears as a link target".
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps page id -> node index
    id_to_index: FxHashMap<String, u32>,
    /// Node storage, indexed by node index
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            id_to_index: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            id_to_index: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given id, returning its index
    ///
    /// Blank ids (empty or whitespace-only) are rejected.
    pub fn get_or_create_node(&mut self, id: &str) -> Result<u32> {
        validate_id(id)?;
        Ok(self.intern(id))
    }

    fn intern(&mut self, id: &str) -> u32 {
        if let Some(&index) = self.id_to_index.get(id) {
            return index;
        }

        let index = self.nodes.len() as u32;
        self.id_to_index.insert(id.to_string(), index);
        self.nodes.push(BuilderNode::new(id));
        index
    }

    /// Add a directed link between two existing nodes
    ///
    /// Out-of-range indices are ignored.
    pub fn add_link(&mut self, from: u32, to: u32) {
        if (to as usize) >= self.nodes.len() {
            return;
        }
        if let Some(node) = self.nodes.get_mut(from as usize) {
            node.links.push(to);
        }
    }

    /// Declare a page together with its outbound targets
    ///
    /// Declaring the same page twice appends the new targets to its row.
    /// Nothing is added when any id is blank.
    pub fn add_page<I, S>(&mut self, id: &str, targets: I) -> Result<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        validate_id(id)?;
        let targets: Vec<S> = targets.into_iter().collect();
        for target in &targets {
            let target = target.as_ref();
            if target.trim().is_empty() {
                return Err(RankError::malformed(format!(
                    "blank target id in links of {id:?}"
                )));
            }
        }

        let from = self.intern(id);
        for target in &targets {
            let to = self.intern(target.as_ref());
            self.add_link(from, to);
        }
        Ok(from)
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of links (parallel edges counted separately)
    pub fn link_count(&self) -> usize {
        self.nodes.iter().map(|n| n.links.len()).sum()
    }

    /// Get a node by index
    pub fn get_node(&self, index: u32) -> Option<&BuilderNode> {
        self.nodes.get(index as usize)
    }

    /// Get a node index by id
    pub fn get_node_index(&self, id: &str) -> Option<u32> {
        self.id_to_index.get(id).copied()
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_index(self) -> FxHashMap<String, u32> {
        self.id_to_index
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(RankError::malformed("blank node id"));
    }
    Ok(())
}
