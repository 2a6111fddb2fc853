//! Keyword relevance signal for topic-specific runs
//!
//! A page is relevant when its title or content contains any topic keyword,
//! compared case-insensitively as plain substrings. The output is one value
//! per node, ready for [`crate::teleport::TeleportVector::biased`].

use crate::graph::csr::CsrGraph;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Keywords used when a caller supplies none
pub const DEFAULT_TOPIC_KEYWORDS: &[&str] = &["machine learning", "pagerank", "ranking"];

/// Page-level text attached to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PageMeta {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Case-insensitive any-keyword matcher
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Keywords are trimmed and lowercased; blank ones are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Matcher over [`DEFAULT_TOPIC_KEYWORDS`]
    pub fn default_topic() -> Self {
        Self::new(DEFAULT_TOPIC_KEYWORDS)
    }

    /// Parse a comma-separated keyword list, e.g. `"machine learning, pagerank"`
    pub fn from_csv(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Whether `text` contains any keyword
    pub fn matches(&self, text: &str) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Whether a page's title or content contains any keyword
    pub fn matches_page(&self, page: &PageMeta) -> bool {
        self.matches(&format!("{} {}", page.title, page.content))
    }

    /// One value per node: 1.0 when the page matches, 0.0 otherwise
    ///
    /// Nodes without metadata (link targets never declared as pages) get 0.0.
    pub fn relevance_for(&self, graph: &CsrGraph, pages: &FxHashMap<String, PageMeta>) -> Vec<f64> {
        graph
            .ids
            .iter()
            .map(|id| match pages.get(id) {
                Some(page) if self.matches_page(page) => 1.0,
                _ => 0.0,
            })
            .collect()
    }
}
