//! Metrics Service: scores one (job, resume) pair with every calculator and
//! folds the four scores into a `MetricsResult`.
//!
//! The only suspension point is job keyword extraction. Everything after it is
//! synchronous and pure, so batch scoring runs each pair's scoring on the
//! blocking pool. A calculator that errors or panics never fails the run: it
//! contributes a zero score carrying the error in `details.error`.

use std::collections::{BTreeMap, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::keywords::extractor::KeywordExtractor;
use crate::keywords::models::{ExtractionMethod, ExtractionResult};
use crate::matching::coverage::{analyze_usage, summarize, CoverageSummary};
use crate::matching::matcher::match_keywords;
use crate::matching::sections::DocumentSections;
use crate::metrics::ats::AtsCalculator;
use crate::metrics::authenticity::AuthenticityCalculator;
use crate::metrics::base::{
    MetricCalculator, MetricError, MetricInput, MetricKind, MetricScore, MetricsConfig,
    MetricsOverrides, StructuredHints,
};
use crate::metrics::length::LengthCalculator;
use crate::metrics::role_alignment::RoleAlignmentCalculator;
use crate::text::normalize;

/// Token-set similarity above which two recommendations count as the same.
const DUPLICATE_SIMILARITY: f64 = 0.9;

// ────────────────────────────────────────────────────────────────────────────
// Request / result types
// ────────────────────────────────────────────────────────────────────────────

/// One (job, resume) pair to score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub job_text: String,
    pub resume_text: String,
    /// Pre-optimization resume. When absent the resume is its own original.
    #[serde(default)]
    pub original_resume_text: Option<String>,
    #[serde(default)]
    pub hints: StructuredHints,
    #[serde(default)]
    pub options: MetricsOverrides,
}

impl ScoringRequest {
    pub fn original(&self) -> &str {
        self.original_resume_text
            .as_deref()
            .unwrap_or(&self.resume_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Failed critical metrics are critical; failed advisory metrics rank by
    /// their weight; advice from passing metrics is low.
    pub fn for_score(kind: MetricKind, passed: bool) -> Self {
        match (passed, kind) {
            (true, _) => Severity::Low,
            (false, k) if k.is_critical() => Severity::Critical,
            (false, MetricKind::Ats) => Severity::High,
            (false, _) => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub severity: Severity,
    pub metric: MetricKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    pub authenticity: MetricScore,
    pub role_alignment: MetricScore,
    pub ats: MetricScore,
    pub length: MetricScore,
    /// Weighted mean of the four scores.
    pub overall_score: f64,
    /// Authenticity and role alignment both passed.
    pub overall_passed: bool,
    pub failed_metrics: Vec<String>,
    /// Critical first, near-duplicates removed.
    pub recommendations: Vec<Recommendation>,
    pub keyword_coverage: CoverageSummary,
    pub extraction_method: ExtractionMethod,
}

impl MetricsResult {
    fn from_scores(
        mut scores: BTreeMap<MetricKind, MetricScore>,
        config: &MetricsConfig,
        keyword_coverage: CoverageSummary,
        extraction_method: ExtractionMethod,
    ) -> Self {
        let mut take = |kind: MetricKind| {
            scores.remove(&kind).unwrap_or_else(|| {
                MetricScore::failed(kind.name(), config.threshold(kind), "no calculator registered")
            })
        };
        let authenticity = take(MetricKind::Authenticity);
        let role_alignment = take(MetricKind::RoleAlignment);
        let ats = take(MetricKind::Ats);
        let length = take(MetricKind::Length);

        let mut result = Self {
            authenticity,
            role_alignment,
            ats,
            length,
            overall_score: 0.0,
            overall_passed: false,
            failed_metrics: Vec::new(),
            recommendations: Vec::new(),
            keyword_coverage,
            extraction_method,
        };

        result.overall_score = MetricKind::ALL
            .iter()
            .map(|&k| k.weight() * result.score(k).score())
            .sum();
        result.overall_passed = MetricKind::ALL
            .iter()
            .filter(|k| k.is_critical())
            .all(|&k| result.score(k).passed());
        result.failed_metrics = MetricKind::ALL
            .iter()
            .filter(|&&k| !result.score(k).passed())
            .map(|k| k.name().to_string())
            .collect();
        result.recommendations = merge_recommendations(&result);
        result
    }

    /// Every metric failed with `reason`.
    fn unavailable(config: &MetricsConfig, reason: &str) -> Self {
        Self::from_scores(
            MetricKind::ALL
                .iter()
                .map(|&k| (k, MetricScore::failed(k.name(), config.threshold(k), reason)))
                .collect(),
            config,
            CoverageSummary::default(),
            ExtractionMethod::RuleBased,
        )
    }

    pub fn score(&self, kind: MetricKind) -> &MetricScore {
        match kind {
            MetricKind::Authenticity => &self.authenticity,
            MetricKind::RoleAlignment => &self.role_alignment,
            MetricKind::Ats => &self.ats,
            MetricKind::Length => &self.length,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendations
// ────────────────────────────────────────────────────────────────────────────

fn merge_recommendations(result: &MetricsResult) -> Vec<Recommendation> {
    let mut all: Vec<Recommendation> = MetricKind::ALL
        .iter()
        .flat_map(|&kind| {
            let score = result.score(kind);
            let severity = Severity::for_score(kind, score.passed());
            score.recommendations().iter().map(move |message| Recommendation {
                severity,
                metric: kind,
                message: message.clone(),
            })
        })
        .collect();
    // Stable: metric order is kept within a severity.
    all.sort_by_key(|r| r.severity);

    let mut kept: Vec<(Recommendation, HashSet<String>)> = Vec::new();
    for rec in all {
        let tokens = token_set(&rec.message);
        if kept
            .iter()
            .any(|(_, seen)| jaccard(seen, &tokens) >= DUPLICATE_SIMILARITY)
        {
            continue;
        }
        kept.push((rec, tokens));
    }
    kept.into_iter().map(|(rec, _)| rec).collect()
}

fn token_set(message: &str) -> HashSet<String> {
    normalize(message)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    a.intersection(b).count() as f64 / a.union(b).count() as f64
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

pub struct MetricsService {
    extractor: Arc<KeywordExtractor>,
    config: MetricsConfig,
    calculators: Vec<Arc<dyn MetricCalculator>>,
}

impl MetricsService {
    /// Service with the four standard calculators.
    pub fn new(extractor: Arc<KeywordExtractor>, config: MetricsConfig) -> Self {
        Self::with_calculators(
            extractor,
            config,
            vec![
                Arc::new(AuthenticityCalculator),
                Arc::new(RoleAlignmentCalculator),
                Arc::new(AtsCalculator),
                Arc::new(LengthCalculator),
            ],
        )
    }

    pub fn with_calculators(
        extractor: Arc<KeywordExtractor>,
        config: MetricsConfig,
        calculators: Vec<Arc<dyn MetricCalculator>>,
    ) -> Self {
        Self {
            extractor,
            config,
            calculators,
        }
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Scores one pair with the service defaults.
    pub async fn calculate_all(
        &self,
        job_text: &str,
        resume_text: &str,
        original_resume_text: &str,
        hints: &StructuredHints,
    ) -> MetricsResult {
        let job = self.extractor.extract(job_text, &hints.skills).await;
        self.score(
            job_text,
            resume_text,
            original_resume_text,
            hints,
            &self.config,
            job,
        )
    }

    /// Scores one request, applying its per-request overrides.
    pub async fn calculate(&self, request: &ScoringRequest) -> MetricsResult {
        let config = request.options.apply(&self.config);
        let job = self
            .extractor
            .extract(&request.job_text, &request.hints.skills)
            .await;
        self.score_request(request, &config, job)
    }

    /// Scores many pairs concurrently. Results keep the input order.
    pub async fn calculate_batch(self: &Arc<Self>, requests: Vec<ScoringRequest>) -> Vec<MetricsResult> {
        let total = requests.len();
        let mut set = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let service = Arc::clone(self);
            set.spawn(async move {
                let config = request.options.apply(&service.config);
                let job = service
                    .extractor
                    .extract(&request.job_text, &request.hints.skills)
                    .await;
                let scored = tokio::task::spawn_blocking(move || {
                    service.score_request(&request, &config, job)
                })
                .await;
                (index, scored)
            });
        }

        let mut results: Vec<Option<MetricsResult>> = vec![None; total];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, Ok(result))) => results[index] = Some(result),
                Ok((index, Err(e))) => error!(index, "Batch scoring task failed: {e}"),
                Err(e) => error!("Batch scoring task failed: {e}"),
            }
        }

        info!(pairs = total, "Batch scoring complete");
        results
            .into_iter()
            .map(|r| r.unwrap_or_else(|| MetricsResult::unavailable(&self.config, "scoring task failed")))
            .collect()
    }

    fn score_request(
        &self,
        request: &ScoringRequest,
        config: &MetricsConfig,
        job: ExtractionResult,
    ) -> MetricsResult {
        self.score(
            &request.job_text,
            &request.resume_text,
            request.original(),
            &request.hints,
            config,
            job,
        )
    }

    /// The synchronous part of a run: match, then run every calculator.
    fn score(
        &self,
        job_text: &str,
        resume_text: &str,
        original_resume_text: &str,
        hints: &StructuredHints,
        config: &MetricsConfig,
        job: ExtractionResult,
    ) -> MetricsResult {
        let sections = DocumentSections::resolve(resume_text, &hints.sections);
        let matched = match_keywords(&job, resume_text, &sections).map_err(|e| {
            error!("Keyword matching failed: {e}");
            e
        });
        let matches = matched.as_deref().unwrap_or_default();
        let coverage = summarize(&analyze_usage(&job, matches));

        let input = MetricInput {
            job_text,
            resume_text,
            original_resume_text,
            job_keywords: &job,
            matches,
            sections: &sections,
            hints,
            config,
        };

        let scores: BTreeMap<MetricKind, MetricScore> = self
            .calculators
            .iter()
            .map(|calculator| {
                let kind = calculator.kind();
                let score = match (&matched, kind) {
                    (Err(e), MetricKind::RoleAlignment | MetricKind::Ats) => {
                        MetricScore::failed(kind.name(), config.threshold(kind), &e.to_string())
                    }
                    _ => run_guarded(calculator.as_ref(), &input),
                };
                (kind, score)
            })
            .collect();

        let result = MetricsResult::from_scores(scores, config, coverage, job.method);
        info!(
            overall_score = result.overall_score,
            overall_passed = result.overall_passed,
            failed = ?result.failed_metrics,
            "Metrics calculated"
        );
        result
    }
}

/// Runs one calculator, turning an error or a panic into a failed score.
fn run_guarded(calculator: &dyn MetricCalculator, input: &MetricInput<'_>) -> MetricScore {
    let kind = calculator.kind();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| calculator.calculate(input)))
        .unwrap_or_else(|payload| Err(MetricError::Panicked(panic_message(payload.as_ref()))));
    match outcome {
        Ok(score) => score,
        Err(e) => {
            error!(metric = kind.name(), "Metric calculation failed: {e}");
            MetricScore::failed(kind.name(), input.config.threshold(kind), &e.to_string())
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
