//! Resume-to-job matching and scoring.
//!
//! Extracts categorized keywords from a job posting, locates them in a resume,
//! and scores the resume on authenticity, role alignment, ATS compatibility
//! and length. The HTTP surface in `routes` is a thin layer over
//! `metrics::MetricsService` and `keywords::KeywordExtractor`.

pub mod config;
pub mod errors;
pub mod keywords;
pub mod llm_client;
pub mod matching;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod text;
