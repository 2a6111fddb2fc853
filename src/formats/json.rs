//! JSON link-graph formats.
//!
//! Two shapes are accepted:
//!
//! - adjacency: `{"A": ["B", "C"], "B": ["C"]}`
//! - page documents, which also carry text for topic relevance:
//!
//! ```json
//! { "pages": [
//!     { "id": "A", "title": "Intro", "content": "...", "links": ["B", "C"] }
//! ] }
//! ```

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{RankError, Result};
use crate::graph::builder::GraphBuilder;
use crate::graph::csr::CsrGraph;
use crate::relevance::PageMeta;
use rustc_hash::FxHashMap;

/// Parse an adjacency object into a graph
///
/// Keys are visited in sorted order, so node indices do not depend on the
/// layout of the source text.
pub fn graph_from_json(json: &str) -> Result<CsrGraph> {
    let value: Value = serde_json::from_str(json)?;
    let object = value
        .as_object()
        .ok_or_else(|| RankError::malformed("adjacency must be a JSON object"))?;

    let mut edges = Vec::with_capacity(object.len());
    for (id, targets) in object {
        let targets = targets
            .as_array()
            .ok_or_else(|| RankError::malformed(format!("links of {id:?} must be an array")))?;
        let targets = targets
            .iter()
            .map(|t| {
                t.as_str().ok_or_else(|| {
                    RankError::malformed(format!("non-string link target {t} in links of {id:?}"))
                })
            })
            .collect::<Result<Vec<&str>>>()?;
        edges.push((id.as_str(), targets));
    }

    CsrGraph::from_adjacency(edges)
}

#[derive(Debug, Deserialize)]
struct PagesDocument {
    pages: Vec<PageRecord>,
}

#[derive(Debug, Deserialize)]
struct PageRecord {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    links: Vec<String>,
}

/// Parse a page document into a graph plus per-page text
///
/// Ids, titles, contents and links are trimmed; blank links are skipped.
/// A page declared twice keeps its first position but only its last
/// declaration's text and links.
pub fn pages_from_json(json: &str) -> Result<(CsrGraph, FxHashMap<String, PageMeta>)> {
    trace_stage!("graph");
    let doc: PagesDocument = serde_json::from_str(json)?;

    let mut slots: FxHashMap<String, usize> = FxHashMap::default();
    let mut records: Vec<PageRecord> = Vec::with_capacity(doc.pages.len());
    for record in doc.pages {
        match slots.get(record.id.trim()) {
            Some(&slot) => {
                log_debug!(id = record.id.trim(), "page redeclared, last declaration wins");
                records[slot] = record;
            }
            None => {
                slots.insert(record.id.trim().to_string(), records.len());
                records.push(record);
            }
        }
    }

    let mut builder = GraphBuilder::with_capacity(records.len());
    let mut pages = FxHashMap::default();
    for record in &records {
        let id = record.id.trim();
        let links = record
            .links
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty());
        builder.add_page(id, links)?;
        pages.insert(
            id.to_string(),
            PageMeta::new(record.title.trim(), record.content.trim()),
        );
    }

    let graph = CsrGraph::from_builder(builder);
    log_debug!(
        nodes = graph.num_nodes,
        pages = pages.len(),
        links = graph.num_links(),
        "loaded page document"
    );
    Ok((graph, pages))
}
