// Scoring engine: four independent calculators behind `MetricCalculator`,
// composed fail-soft by `MetricsService`.

pub mod ats;
pub mod authenticity;
pub mod base;
pub mod claims;
pub mod handlers;
pub mod length;
pub mod role_alignment;
pub mod service;

pub use base::{
    MetricCalculator, MetricError, MetricInput, MetricKind, MetricScore, MetricsConfig,
    MetricsOverrides, StructuredHints,
};
pub use service::{MetricsResult, MetricsService, Recommendation, ScoringRequest, Severity};
