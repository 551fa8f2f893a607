//! Shared metric types: the validated `MetricScore`, tunables, calculator inputs
//! and the `MetricCalculator` trait every scorer implements.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::keywords::models::{ExtractionHints, ExtractionResult};
use crate::matching::matcher::MatchRecord;
use crate::matching::sections::{DocumentSections, SectionRange};

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("pattern compile failed: {0}")]
    Pattern(#[from] regex::Error),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("calculator panicked: {0}")]
    Panicked(String),
}

// ────────────────────────────────────────────────────────────────────────────
// MetricKind
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Authenticity,
    RoleAlignment,
    Ats,
    Length,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Authenticity,
        MetricKind::RoleAlignment,
        MetricKind::Ats,
        MetricKind::Length,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Authenticity => "authenticity",
            MetricKind::RoleAlignment => "role_alignment",
            MetricKind::Ats => "ats",
            MetricKind::Length => "length",
        }
    }

    /// Contribution to the overall score. Sums to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            MetricKind::Authenticity => 0.35,
            MetricKind::RoleAlignment => 0.30,
            MetricKind::Ats => 0.25,
            MetricKind::Length => 0.10,
        }
    }

    /// Critical metrics gate `overall_passed`; the others are advisory.
    pub fn is_critical(self) -> bool {
        matches!(self, MetricKind::Authenticity | MetricKind::RoleAlignment)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// MetricScore
// ────────────────────────────────────────────────────────────────────────────

/// Result of one calculator. Fields are private so `passed` can only be
/// derived from `score` and `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricScore {
    name: String,
    score: f64,
    passed: bool,
    threshold: f64,
    details: Value,
    recommendations: Vec<String>,
}

impl MetricScore {
    /// Clamps `score` and `threshold` into [0, 1] (NaN becomes 0) and sets
    /// `passed = score >= threshold`.
    pub fn new(
        name: &str,
        score: f64,
        threshold: f64,
        details: Value,
        recommendations: Vec<String>,
    ) -> Self {
        let score = unit_interval(score);
        let threshold = unit_interval(threshold);
        Self {
            name: name.to_string(),
            score,
            passed: score >= threshold,
            threshold,
            details,
            recommendations,
        }
    }

    /// Zero score carrying the failure reason in `details.error`.
    pub fn failed(name: &str, threshold: f64, error: &str) -> Self {
        Self::new(
            name,
            0.0,
            threshold,
            json!({ "error": error }),
            vec![format!("The {name} check could not be completed: {error}")],
        )
    }

    /// Degenerate zero score for blank input.
    pub fn empty_input(name: &str, threshold: f64) -> Self {
        Self::new(
            name,
            0.0,
            threshold,
            json!({ "reason": "empty_input" }),
            vec!["Provide resume text to score".to_string()],
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn details(&self) -> &Value {
        &self.details
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

fn unit_interval(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Every tunable of the engine. Defaults are the documented constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub authenticity_threshold: f64,
    pub role_alignment_threshold: f64,
    pub ats_threshold: f64,
    pub length_threshold: f64,
    pub target_pages: f64,
    pub page_tolerance: f64,
    /// Optimal keyword density band, in percent of resume words.
    pub density_min_pct: f64,
    pub density_max_pct: f64,
    /// Relative tolerance when comparing a claimed number to an original one.
    pub claim_tolerance: f64,
    /// Minimum content-token overlap for a claim to count as a rephrasing.
    pub rephrase_overlap: f64,
    pub max_missing_listed: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            authenticity_threshold: 0.90,
            role_alignment_threshold: 0.70,
            ats_threshold: 0.80,
            length_threshold: 0.95,
            target_pages: 2.0,
            page_tolerance: 0.5,
            density_min_pct: 2.0,
            density_max_pct: 8.0,
            claim_tolerance: 0.10,
            rephrase_overlap: 0.5,
            max_missing_listed: 5,
        }
    }
}

impl MetricsConfig {
    pub fn threshold(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Authenticity => self.authenticity_threshold,
            MetricKind::RoleAlignment => self.role_alignment_threshold,
            MetricKind::Ats => self.ats_threshold,
            MetricKind::Length => self.length_threshold,
        }
    }

    /// Fails when `kind`'s threshold lies outside [0, 1].
    pub fn check_threshold(&self, kind: MetricKind) -> Result<f64, MetricError> {
        let t = self.threshold(kind);
        if !(0.0..=1.0).contains(&t) {
            return Err(MetricError::InvalidConfig(format!(
                "{} threshold must be within [0, 1], got {t}",
                kind.name()
            )));
        }
        Ok(t)
    }
}

/// Per-request overrides. Unset fields keep the service defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsOverrides {
    pub authenticity_threshold: Option<f64>,
    pub role_alignment_threshold: Option<f64>,
    pub ats_threshold: Option<f64>,
    pub length_threshold: Option<f64>,
    pub target_pages: Option<f64>,
    pub page_tolerance: Option<f64>,
    pub density_min_pct: Option<f64>,
    pub density_max_pct: Option<f64>,
    pub claim_tolerance: Option<f64>,
    pub rephrase_overlap: Option<f64>,
    pub max_missing_listed: Option<usize>,
}

impl MetricsOverrides {
    pub fn apply(&self, base: &MetricsConfig) -> MetricsConfig {
        MetricsConfig {
            authenticity_threshold: self
                .authenticity_threshold
                .unwrap_or(base.authenticity_threshold),
            role_alignment_threshold: self
                .role_alignment_threshold
                .unwrap_or(base.role_alignment_threshold),
            ats_threshold: self.ats_threshold.unwrap_or(base.ats_threshold),
            length_threshold: self.length_threshold.unwrap_or(base.length_threshold),
            target_pages: self.target_pages.unwrap_or(base.target_pages),
            page_tolerance: self.page_tolerance.unwrap_or(base.page_tolerance),
            density_min_pct: self.density_min_pct.unwrap_or(base.density_min_pct),
            density_max_pct: self.density_max_pct.unwrap_or(base.density_max_pct),
            claim_tolerance: self.claim_tolerance.unwrap_or(base.claim_tolerance),
            rephrase_overlap: self.rephrase_overlap.unwrap_or(base.rephrase_overlap),
            max_missing_listed: self.max_missing_listed.unwrap_or(base.max_missing_listed),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Layout facts known to the caller (e.g. from the document converter).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutHints {
    pub has_tables: bool,
    pub column_count: Option<u32>,
    pub has_images: bool,
}

/// Optional structured hints accompanying a scoring request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredHints {
    #[serde(flatten)]
    pub skills: ExtractionHints,
    /// Resume section line ranges. Detected from headers when empty.
    pub sections: Vec<SectionRange>,
    pub layout: LayoutHints,
}

/// Everything a calculator may read. Built once per (job, resume) pair and
/// shared read-only by all four calculators.
#[derive(Debug, Clone, Copy)]
pub struct MetricInput<'a> {
    pub job_text: &'a str,
    pub resume_text: &'a str,
    pub original_resume_text: &'a str,
    pub job_keywords: &'a ExtractionResult,
    pub matches: &'a [MatchRecord],
    pub sections: &'a DocumentSections,
    pub hints: &'a StructuredHints,
    pub config: &'a MetricsConfig,
}

/// A side-effect-free scorer. Implementations must be deterministic.
pub trait MetricCalculator: Send + Sync {
    fn kind(&self) -> MetricKind;

    fn calculate(&self, input: &MetricInput<'_>) -> Result<MetricScore, MetricError>;
}

/// Rounds for display in `details`; scores themselves are never rounded.
pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
