//! Length compliance: estimated page count against a target.

use serde_json::json;

use crate::metrics::base::{
    round3, MetricCalculator, MetricError, MetricInput, MetricKind, MetricScore,
};
use crate::text::tokenizer::line_count;
use crate::text::word_count;

/// Typical single-spaced page.
pub const CHARS_PER_PAGE: f64 = 3000.0;
pub const WORDS_PER_PAGE: f64 = 500.0;
pub const LINES_PER_PAGE: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageEstimate {
    pub by_chars: f64,
    pub by_words: f64,
    pub by_lines: f64,
}

impl PageEstimate {
    pub fn of(text: &str) -> Self {
        Self {
            by_chars: text.chars().count() as f64 / CHARS_PER_PAGE,
            by_words: word_count(text) as f64 / WORDS_PER_PAGE,
            by_lines: line_count(text) as f64 / LINES_PER_PAGE,
        }
    }

    pub fn pages(&self) -> f64 {
        (self.by_chars + self.by_words + self.by_lines) / 3.0
    }
}

/// 1.0 within `tolerance` of `target`; linear to 0 at twice the tolerance.
pub fn length_score(pages: f64, target: f64, tolerance: f64) -> f64 {
    let off = (pages - target).abs();
    if off <= tolerance {
        1.0
    } else {
        (1.0 - (off - tolerance) / tolerance).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LengthCalculator;

impl MetricCalculator for LengthCalculator {
    fn kind(&self) -> MetricKind {
        MetricKind::Length
    }

    fn calculate(&self, input: &MetricInput<'_>) -> Result<MetricScore, MetricError> {
        let name = self.kind().name();
        let threshold = input.config.check_threshold(self.kind())?;
        let (target, tolerance) = (input.config.target_pages, input.config.page_tolerance);
        if !(target > 0.0 && tolerance > 0.0) {
            return Err(MetricError::InvalidConfig(format!(
                "target_pages and page_tolerance must be positive, got {target} and {tolerance}"
            )));
        }
        if input.resume_text.trim().is_empty() {
            return Ok(MetricScore::empty_input(name, threshold));
        }

        let estimate = PageEstimate::of(input.resume_text);
        let pages = estimate.pages();
        let score = length_score(pages, target, tolerance);

        let mut recommendations = Vec::new();
        if pages > target + tolerance {
            recommendations.push(format!(
                "Trim content: the resume runs about {pages:.1} pages against a {target}-page target"
            ));
        } else if pages < target - tolerance {
            recommendations.push(format!(
                "Expand content: the resume fills about {pages:.1} pages against a {target}-page target"
            ));
        }

        let details = json!({
            "estimated_pages": round3(pages),
            "pages_by_chars": round3(estimate.by_chars),
            "pages_by_words": round3(estimate.by_words),
            "pages_by_lines": round3(estimate.by_lines),
            "target_pages": target,
            "tolerance": tolerance,
            "char_count": input.resume_text.chars().count(),
            "word_count": word_count(input.resume_text),
            "line_count": line_count(input.resume_text),
        });

        Ok(MetricScore::new(name, score, threshold, details, recommendations))
    }
}
