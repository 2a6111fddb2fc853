//! Validation engine for rank specifications.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`RankSpec`] and collects every diagnostic into a [`ValidationReport`]; it
//! never short-circuits on the first error, so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust
//! use linkrank::config::{RankSpec, ValidationEngine};
//!
//! let spec = RankSpec::from_json(r#"{ "v": 1, "damping": 2.0 }"#).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! for err in report.errors() {
//!     eprintln!("{err}");
//! }
//! assert!(report.has_errors());
//! ```

use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::SpecError;
use super::spec::{RankSpec, RankVariant, SPEC_VERSION};

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding attached to a [`SpecError`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: SpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: SpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: SpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &SpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`RankSpec`] and returns zero or
/// more diagnostics.
///
/// Rules are stateless and `Send + Sync` so one engine can serve many threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"damping_range"`).
    fn name(&self) -> &str;

    /// Inspect `spec` and return any findings.
    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`RankSpec`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(DampingRangeRule));
        engine.add_rule(Box::new(ToleranceRule));
        engine.add_rule(Box::new(IterationBudgetRule));
        engine.add_rule(Box::new(TopicKeywordsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &RankSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Known version ───────────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        if spec.v == SPEC_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            SpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported spec version {}", spec.v),
            )
            .with_hint(format!("Set \"v\": {SPEC_VERSION}")),
        )]
    }
}

// ─── 2. 0 <= damping < 1 ────────────────────────────────────────────────────

struct DampingRangeRule;

impl ValidationRule for DampingRangeRule {
    fn name(&self) -> &str {
        "damping_range"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        match spec.damping {
            Some(d) if !(0.0..1.0).contains(&d) => vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::OutOfRange,
                    "/damping",
                    format!("damping must be in [0, 1), got {d}"),
                )
                .with_hint("0.85 is the usual choice"),
            )],
            _ => vec![],
        }
    }
}

// ─── 3. tolerance > 0 ───────────────────────────────────────────────────────

struct ToleranceRule;

impl ValidationRule for ToleranceRule {
    fn name(&self) -> &str {
        "tolerance"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        match spec.tolerance {
            Some(t) if t.is_nan() || t <= 0.0 => vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::OutOfRange,
                    "/tolerance",
                    format!("tolerance must be positive, got {t}"),
                )
                .with_hint("Remove tolerance to use the variant default"),
            )],
            _ => vec![],
        }
    }
}

// ─── 4. max_iterations >= 1 ─────────────────────────────────────────────────

struct IterationBudgetRule;

impl ValidationRule for IterationBudgetRule {
    fn name(&self) -> &str {
        "iteration_budget"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        if spec.max_iterations == Some(0) {
            vec![ValidationDiagnostic::error(
                SpecError::new(
                    ErrorCode::OutOfRange,
                    "/max_iterations",
                    "max_iterations must be greater than 0",
                )
                .with_hint("Remove max_iterations to use the variant default"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 5. topic runs without keywords degrade to classic ─────────────────────

struct TopicKeywordsRule;

impl ValidationRule for TopicKeywordsRule {
    fn name(&self) -> &str {
        "topic_keywords"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        let has_keyword = spec.keywords.iter().any(|k| !k.trim().is_empty());
        if spec.variant == RankVariant::Topic && !has_keyword {
            vec![ValidationDiagnostic::warning(
                SpecError::new(
                    ErrorCode::MissingInput,
                    "/keywords",
                    "topic variant without keywords teleports uniformly",
                )
                .with_hint("Add keywords, or use the classic variant"),
            )]
        } else {
            vec![]
        }
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &RankSpec) -> Vec<ValidationDiagnostic> {
        let diag_fn = if spec.strict {
            ValidationDiagnostic::error
        } else {
            ValidationDiagnostic::warning
        };
        let mut keys: Vec<&String> = spec.unknown_fields.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                diag_fn(
                    SpecError::new(
                        ErrorCode::UnknownField,
                        format!("/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
