//! Axum route handlers for the Keywords API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{check_text_size, AppError};
use crate::keywords::models::{ExtractionHints, ExtractionResult};
use crate::matching::coverage::{analyze_usage, summarize, CoverageSummary, KeywordUsage};
use crate::matching::matcher::{match_keywords, MatchRecord};
use crate::matching::sections::{DocumentSections, SectionRange};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
    #[serde(default)]
    pub hints: ExtractionHints,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub keywords: ExtractionResult,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_text: String,
    pub resume_text: String,
    #[serde(default)]
    pub hints: ExtractionHints,
    /// Resume section line ranges; detected from headers when empty.
    #[serde(default)]
    pub sections: Vec<SectionRange>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub keywords: ExtractionResult,
    pub matches: Vec<MatchRecord>,
    pub usage: Vec<KeywordUsage>,
    pub summary: CoverageSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/keywords/extract
///
/// Categorizes and weights the keywords of one document.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    check_text_size("text", &request.text, state.config.max_text_bytes)?;

    let keywords = state.extractor.extract(&request.text, &request.hints).await;

    Ok(Json(ExtractResponse { keywords }))
}

/// POST /api/v1/keywords/match
///
/// Extracts the job's keywords and locates each one in the resume, with
/// per-keyword usage status and suggested variants for the gaps.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }
    check_text_size("job_text", &request.job_text, state.config.max_text_bytes)?;
    check_text_size("resume_text", &request.resume_text, state.config.max_text_bytes)?;

    let keywords = state
        .extractor
        .extract(&request.job_text, &request.hints)
        .await;
    let sections = DocumentSections::resolve(&request.resume_text, &request.sections);
    let matches = match_keywords(&keywords, &request.resume_text, &sections)
        .map_err(|e| AppError::Validation(format!("keyword pattern rejected: {e}")))?;
    let usage = analyze_usage(&keywords, &matches);
    let summary = summarize(&usage);

    Ok(Json(MatchResponse {
        keywords,
        matches,
        usage,
        summary,
    }))
}
