//! Role alignment: weighted keyword coverage per category.

use std::collections::BTreeMap;

use serde_json::json;

use crate::keywords::models::KeywordCategory;
use crate::matching::matcher::MatchRecord;
use crate::metrics::base::{
    round3, MetricCalculator, MetricError, MetricInput, MetricKind, MetricScore,
};

/// Category contributions to the score. Soft skills are reported but not scored.
const CATEGORY_WEIGHTS: [(KeywordCategory, f64); 4] = [
    (KeywordCategory::HardSkill, 0.40),
    (KeywordCategory::ToolOrTechnology, 0.40),
    (KeywordCategory::Certification, 0.15),
    (KeywordCategory::DomainTerm, 0.05),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAlignmentCalculator;

#[derive(Debug)]
struct CategoryCoverage<'a> {
    rate: f64,
    found: usize,
    total: usize,
    missing: Vec<&'a MatchRecord>,
}

/// Found weight over total weight; 1.0 when the category is empty.
fn coverage<'a>(matches: &'a [MatchRecord], category: KeywordCategory) -> CategoryCoverage<'a> {
    let in_category: Vec<&MatchRecord> = matches
        .iter()
        .filter(|m| m.category == category)
        .collect();
    let total_weight: f64 = in_category.iter().map(|m| m.weight).sum();
    let found_weight: f64 = in_category.iter().filter(|m| m.found).map(|m| m.weight).sum();
    CategoryCoverage {
        rate: if total_weight > 0.0 {
            found_weight / total_weight
        } else {
            1.0
        },
        found: in_category.iter().filter(|m| m.found).count(),
        total: in_category.len(),
        missing: in_category.into_iter().filter(|m| !m.found).collect(),
    }
}

impl MetricCalculator for RoleAlignmentCalculator {
    fn kind(&self) -> MetricKind {
        MetricKind::RoleAlignment
    }

    fn calculate(&self, input: &MetricInput<'_>) -> Result<MetricScore, MetricError> {
        let name = self.kind().name();
        let threshold = input.config.check_threshold(self.kind())?;
        if input.resume_text.trim().is_empty() {
            return Ok(MetricScore::empty_input(name, threshold));
        }

        let mut score = 0.0;
        let mut categories = BTreeMap::new();
        let mut recommendations = Vec::new();

        for (category, weight) in CATEGORY_WEIGHTS {
            let cov = coverage(input.matches, category);
            score += weight * cov.rate;

            let mut missing = cov.missing.clone();
            // Highest weight first, then most frequent in the posting, then alphabetical.
            missing.sort_by(|a, b| {
                b.weight
                    .total_cmp(&a.weight)
                    .then_with(|| {
                        input
                            .job_keywords
                            .frequency(&b.keyword)
                            .cmp(&input.job_keywords.frequency(&a.keyword))
                    })
                    .then_with(|| a.keyword.cmp(&b.keyword))
            });
            let listed: Vec<&str> = missing
                .iter()
                .take(input.config.max_missing_listed)
                .map(|m| m.keyword.as_str())
                .collect();

            if cov.rate < input.config.role_alignment_threshold && !listed.is_empty() {
                recommendations.push(format!(
                    "Improve {} coverage ({:.0}%): add {} where they reflect real experience",
                    category.label(),
                    cov.rate * 100.0,
                    listed.join(", ")
                ));
            }

            categories.insert(
                category.key(),
                json!({
                    "match_rate": round3(cov.rate),
                    "weight": weight,
                    "found": cov.found,
                    "total": cov.total,
                    "missing": listed,
                }),
            );
        }

        let soft = coverage(input.matches, KeywordCategory::SoftSkill);
        let details = json!({
            "categories": categories,
            "soft_skill_match_rate": round3(soft.rate),
            "matched_keywords": input.matches.iter().filter(|m| m.found).count(),
            "total_keywords": input.matches.len(),
        });

        Ok(MetricScore::new(name, score, threshold, details, recommendations))
    }
}
