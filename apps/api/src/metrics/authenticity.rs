//! Authenticity: every claim in the candidate resume must be backed by a fact
//! in the original resume.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use serde_json::json;

use crate::matching::matcher::count_occurrences;
use crate::metrics::base::{MetricCalculator, MetricError, MetricInput, MetricKind, MetricScore};
use crate::metrics::claims::{extract_claims, Claim};

/// Role titles whose appearance without support changes how a career reads.
const ROLE_TITLES: &[&str] = &[
    "engineer",
    "developer",
    "manager",
    "lead",
    "director",
    "analyst",
    "architect",
    "designer",
    "scientist",
    "specialist",
    "consultant",
];

/// Red flags quoted individually in the recommendations.
const MAX_QUOTED_FLAGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagSeverity {
    /// The claim introduces a quantity or entity the original never states.
    High,
    /// The claim restates the original more strongly, or has no close counterpart.
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedFlag {
    pub claim: String,
    pub line: usize,
    pub severity: FlagSeverity,
    pub reason: String,
    pub new_quantities: Vec<String>,
    pub new_entities: Vec<String>,
    pub added_markers: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticityCalculator;

/// `None` when `claim` is supported by `facts`.
fn assess(
    claim: &Claim,
    facts: &[Claim],
    original: &str,
    tolerance: f64,
    rephrase_overlap: f64,
) -> Option<RedFlag> {
    if facts.iter().any(|f| f.normalized == claim.normalized) {
        return None;
    }

    let new_quantities: Vec<String> = claim
        .quantities
        .iter()
        .filter(|q| {
            !facts
                .iter()
                .flat_map(|f| &f.quantities)
                .any(|fact| q.within(fact, tolerance))
        })
        .map(|q| q.raw.clone())
        .collect();

    let new_entities: Vec<String> = claim
        .entities
        .iter()
        .filter(|e| count_occurrences(original, e) == 0)
        .cloned()
        .collect();

    let best = facts
        .iter()
        .map(|f| (f, claim.overlap(f)))
        .fold(None::<(&Claim, f64)>, |acc, (f, o)| match acc {
            Some((_, best)) if best >= o => acc,
            _ => Some((f, o)),
        });
    let overlap = best.map_or(0.0, |(_, o)| o);
    let added_markers: Vec<String> = match best {
        Some((fact, _)) => claim.markers.difference(&fact.markers).cloned().collect(),
        None => claim.markers.iter().cloned().collect(),
    };

    if new_quantities.is_empty()
        && new_entities.is_empty()
        && added_markers.is_empty()
        && overlap >= rephrase_overlap
    {
        return None;
    }

    let (severity, reason) = if !new_quantities.is_empty() || !new_entities.is_empty() {
        let introduced: Vec<&str> = new_quantities
            .iter()
            .chain(&new_entities)
            .map(String::as_str)
            .collect();
        (
            FlagSeverity::High,
            format!("introduces {} not found in the original", introduced.join(", ")),
        )
    } else if !added_markers.is_empty() {
        (
            FlagSeverity::Medium,
            format!("overstates the original with {}", added_markers.join(", ")),
        )
    } else {
        (
            FlagSeverity::Medium,
            format!("no close counterpart in the original ({:.0}% overlap)", overlap * 100.0),
        )
    };

    Some(RedFlag {
        claim: claim.text.clone(),
        line: claim.line,
        severity,
        reason,
        new_quantities,
        new_entities,
        added_markers,
    })
}

/// Role titles used in `candidate` that `original` never mentions.
fn new_role_titles(candidate: &str, original: &str) -> Vec<&'static str> {
    ROLE_TITLES
        .iter()
        .copied()
        .filter(|t| count_occurrences(candidate, t) > 0 && count_occurrences(original, t) == 0)
        .collect()
}

impl MetricCalculator for AuthenticityCalculator {
    fn kind(&self) -> MetricKind {
        MetricKind::Authenticity
    }

    fn calculate(&self, input: &MetricInput<'_>) -> Result<MetricScore, MetricError> {
        let name = self.kind().name();
        let threshold = input.config.check_threshold(self.kind())?;
        let (tolerance, overlap) = (input.config.claim_tolerance, input.config.rephrase_overlap);
        if !(tolerance >= 0.0) || !(0.0..=1.0).contains(&overlap) {
            return Err(MetricError::InvalidConfig(format!(
                "claim_tolerance must be non-negative and rephrase_overlap within [0, 1], got {tolerance} and {overlap}"
            )));
        }
        if input.resume_text.trim().is_empty() {
            return Ok(MetricScore::empty_input(name, threshold));
        }

        // Skills the candidate declared in their own profile are not new.
        let declared: HashSet<String> = input
            .hints
            .skills
            .candidate_skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .collect();

        let claims = extract_claims(input.resume_text, &declared);
        let facts = extract_claims(input.original_resume_text, &declared);

        let mut flags: Vec<RedFlag> = claims
            .iter()
            .filter_map(|c| assess(c, &facts, input.original_resume_text, tolerance, overlap))
            .collect();
        flags.sort_by(|a, b| a.severity.cmp(&b.severity).then(a.line.cmp(&b.line)));

        let total = claims.len();
        let supported = total - flags.len();
        let score = if total == 0 {
            1.0
        } else {
            supported as f64 / total as f64
        };

        let mut recommendations: Vec<String> = flags
            .iter()
            .take(MAX_QUOTED_FLAGS)
            .map(|f| match f.severity {
                FlagSeverity::High => {
                    format!("Remove or substantiate \"{}\": {}", f.claim, f.reason)
                }
                FlagSeverity::Medium => format!("Tone down \"{}\": {}", f.claim, f.reason),
            })
            .collect();
        if flags.len() > MAX_QUOTED_FLAGS {
            recommendations.push(format!(
                "Review {} more claims that the original resume does not support",
                flags.len() - MAX_QUOTED_FLAGS
            ));
        }

        let titles = new_role_titles(input.resume_text, input.original_resume_text);
        if !titles.is_empty() {
            recommendations.push(format!(
                "Check role titles that the original resume does not use: {}",
                titles.join(", ")
            ));
        }

        let high = flags
            .iter()
            .filter(|f| f.severity == FlagSeverity::High)
            .count();
        let details = json!({
            "total_claims": total,
            "supported_claims": supported,
            "unsupported_claims": flags.len(),
            "high_severity_flags": high,
            "facts": facts.len(),
            "red_flags": flags,
            "new_role_titles": titles,
            "entities_checked": claims
                .iter()
                .flat_map(|c| c.entities.iter().cloned())
                .collect::<BTreeSet<_>>(),
        });

        Ok(MetricScore::new(name, score, threshold, details, recommendations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::models::{ExtractionHints, ExtractionMethod, ExtractionResult};
    use crate::matching::sections::DocumentSections;
    use crate::metrics::base::{MetricsConfig, StructuredHints};

    fn run_with(candidate: &str, original: &str, hints: &StructuredHints) -> MetricScore {
        let job = ExtractionResult::empty(ExtractionMethod::RuleBased);
        let sections = DocumentSections::default();
        let config = MetricsConfig::default();
        let input = MetricInput {
            job_text: "",
            resume_text: candidate,
            original_resume_text: original,
            job_keywords: &job,
            matches: &[],
            sections: &sections,
            hints,
            config: &config,
        };
        AuthenticityCalculator.calculate(&input).unwrap()
    }

    fn run(candidate: &str, original: &str) -> MetricScore {
        run_with(candidate, original, &StructuredHints::default())
    }

    fn flags(score: &MetricScore) -> &Vec<serde_json::Value> {
        score.details()["red_flags"].as_array().expect("red_flags array")
    }

    #[test]
    fn test_fabricated_claim_is_high_severity() {
        let score = run(
            "Architected an award-winning platform serving 1M+ users",
            "Built a web application",
        );
        assert_eq!(score.score(), 0.0);
        assert!(!score.passed());
        let flags = flags(&score);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0]["severity"], "high");
        assert_eq!(flags[0]["new_quantities"][0], "1M+");
        assert!(score.recommendations()[0].starts_with("Remove or substantiate"));
    }

    #[test]
    fn test_identical_text_is_fully_supported() {
        let text = "- Reduced latency by 40% using Redis\n- Migrated billing to AWS";
        let score = run(text, text);
        assert_eq!(score.score(), 1.0);
        assert_eq!(score.details()["total_claims"], 2);
    }

    #[test]
    fn test_numbers_within_tolerance_are_supported() {
        let score = run(
            "Reduced latency by 42% using Redis",
            "Reduced latency by 40% using Redis",
        );
        assert_eq!(score.score(), 1.0);

        let inflated = run(
            "Reduced latency by 50% using Redis",
            "Reduced latency by 40% using Redis",
        );
        assert_eq!(inflated.score(), 0.0);
        assert_eq!(flags(&inflated)[0]["severity"], "high");
    }

    #[test]
    fn test_stronger_rephrasing_is_medium_severity() {
        let score = run(
            "Spearheaded Python services for payments",
            "Built Python services for payments",
        );
        assert_eq!(score.score(), 0.0);
        let flags = flags(&score);
        assert_eq!(flags[0]["severity"], "medium");
        assert_eq!(flags[0]["added_markers"][0], "spearheaded");
    }

    #[test]
    fn test_new_entity_is_flagged() {
        let score = run("Reporting on Snowflake", "Reporting on SQL");
        assert_eq!(flags(&score)[0]["new_entities"][0], "snowflake");
    }

    #[test]
    fn test_declared_candidate_skills_are_not_new() {
        let hints = StructuredHints {
            skills: ExtractionHints {
                candidate_skills: vec!["Snowflake".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let score = run_with("Reporting on Snowflake", "Reporting on SQL", &hints);
        assert_eq!(score.score(), 1.0);
        assert_eq!(score.details()["total_claims"], 0);
    }

    #[test]
    fn test_no_claims_scores_one() {
        let score = run("Worked on a team", "Worked on a team");
        assert_eq!(score.score(), 1.0);
        assert!(score.passed());
    }

    #[test]
    fn test_partial_support_is_a_ratio() {
        let original = "- Reduced latency by 40% using Redis\n- Migrated billing to AWS";
        let candidate = "- Reduced latency by 40% using Redis\n- Migrated billing to AWS\n- Cut costs by $2M";
        let score = run(candidate, original);
        assert!((score.score() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_role_titles_are_reported() {
        let score = run("Staff Architect", "Software Engineer");
        assert_eq!(score.details()["new_role_titles"][0], "architect");
        assert!(score
            .recommendations()
            .iter()
            .any(|r| r.contains("role titles")));
    }

    #[test]
    fn test_empty_candidate() {
        let score = run("", "Built things");
        assert_eq!(score.score(), 0.0);
        assert_eq!(score.details()["reason"], "empty_input");
    }
}
