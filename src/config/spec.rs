//! Rank specification types.
//!
//! A [`RankSpec`] picks the ranking variant, overrides numeric options and
//! (for topic runs) names the topic keywords. These types are the input to
//! the [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "variant": "topic",
//!   "damping": 0.85,
//!   "tolerance": 1e-8,
//!   "max_iterations": 200,
//!   "keywords": ["machine learning", "pagerank"],
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::validation::ValidationEngine;
use super::RankConfig;
use crate::errors::{RankError, Result};

/// Current spec version
pub const SPEC_VERSION: u32 = 1;

/// Top-level rank specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    /// Which ranking to run. Defaults to classic.
    #[serde(default)]
    pub variant: RankVariant,

    /// Overrides the variant's default damping.
    #[serde(default)]
    pub damping: Option<f64>,

    /// Overrides the variant's default tolerance.
    #[serde(default)]
    pub tolerance: Option<f64>,

    /// Overrides the variant's default iteration budget.
    #[serde(default)]
    pub max_iterations: Option<usize>,

    /// Topic keywords used to build the relevance signal.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Ranking variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankVariant {
    /// Uniform teleportation.
    #[default]
    Classic,
    /// Teleportation biased toward topic-relevant pages.
    Topic,
}

impl RankVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Topic => "topic",
        }
    }

    /// Default numeric options for this variant
    pub fn default_config(&self) -> RankConfig {
        match self {
            Self::Classic => RankConfig::classic(),
            Self::Topic => RankConfig::topic(),
        }
    }
}

impl RankSpec {
    /// A spec with no overrides
    pub fn new(variant: RankVariant) -> Self {
        Self {
            v: SPEC_VERSION,
            variant,
            damping: None,
            tolerance: None,
            max_iterations: None,
            keywords: Vec::new(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }

    /// Parse a spec from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Variant defaults with this spec's overrides applied, unvalidated
    pub fn config(&self) -> RankConfig {
        let base = self.variant.default_config();
        RankConfig {
            damping: self.damping.unwrap_or(base.damping),
            tolerance: self.tolerance.unwrap_or(base.tolerance),
            max_iterations: self.max_iterations.unwrap_or(base.max_iterations),
        }
    }

    /// Validate with the default rules and produce the effective config
    ///
    /// Warnings are logged and tolerated; any error fails with
    /// [`RankError::InvalidSpec`] carrying the full report.
    pub fn resolve(&self) -> Result<RankConfig> {
        let report = ValidationEngine::with_defaults().validate(self);
        if report.has_errors() {
            return Err(RankError::InvalidSpec(report));
        }
        for _warning in report.warnings() {
            log_warn!(warning = %_warning, "rank spec warning");
        }
        Ok(self.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec = RankSpec::from_json(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.variant, RankVariant::Classic);
        assert!(spec.keywords.is_empty());
        assert!(!spec.strict);
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "variant": "topic",
            "damping": 0.9,
            "max_iterations": 50,
            "keywords": ["pagerank"],
            "strict": true
        }"#;
        let spec = RankSpec::from_json(json).unwrap();
        assert_eq!(spec.variant, RankVariant::Topic);
        assert_eq!(spec.keywords, vec!["pagerank"]);
        assert!(spec.strict);

        let cfg = spec.config();
        assert_eq!(cfg.damping, 0.9);
        assert_eq!(cfg.tolerance, 1e-8);
        assert_eq!(cfg.max_iterations, 50);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let spec = RankSpec::from_json(r#"{ "v": 1, "bogus": 42 }"#).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus"));
    }

    #[test]
    fn test_unknown_variant_is_parse_error() {
        let err = RankSpec::from_json(r#"{ "v": 1, "variant": "hits" }"#).unwrap_err();
        assert!(matches!(err, RankError::Parse(_)));
    }

    #[test]
    fn test_resolve_valid_spec() {
        let cfg = RankSpec::new(RankVariant::Classic).resolve().unwrap();
        assert_eq!(cfg, RankConfig::classic());
    }

    #[test]
    fn test_resolve_reports_all_errors() {
        let spec = RankSpec::from_json(r#"{ "v": 2, "damping": 1.5, "tolerance": 0 }"#).unwrap();
        match spec.resolve() {
            Err(RankError::InvalidSpec(report)) => assert_eq!(report.errors().count(), 3),
            other => panic!("expected InvalidSpec, got {other:?}"),
        }
    }
}
