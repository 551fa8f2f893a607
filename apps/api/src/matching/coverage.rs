//! Per-keyword usage analysis: target frequency bands, status and placement quality.

use serde::Serialize;

use crate::keywords::models::{ExtractionResult, KeywordCategory};
use crate::keywords::variations::variations_of;
use crate::matching::matcher::MatchRecord;
use crate::matching::sections::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    Missing,
    Underutilized,
    Optimal,
    Overstuffed,
}

/// Inclusive occurrence band a resume should hit for one keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetBand {
    pub min: usize,
    pub max: usize,
}

impl TargetBand {
    /// Band derived from how often the job posting itself uses the keyword.
    /// Keywords that only came from hints count as mentioned once.
    pub fn for_job_frequency(job_frequency: usize) -> Self {
        let freq = job_frequency.max(1);
        let min = (freq * 3 / 2).max(1);
        let max = (min + 3).min(freq * 5).max(min);
        Self { min, max }
    }

    pub fn status(&self, occurrences: usize) -> UsageStatus {
        if occurrences == 0 {
            UsageStatus::Missing
        } else if occurrences < self.min {
            UsageStatus::Underutilized
        } else if occurrences <= self.max {
            UsageStatus::Optimal
        } else {
            UsageStatus::Overstuffed
        }
    }

    /// 1.0 up to `max`, falling linearly to 0.0 at twice `max`.
    pub fn stuffing_factor(&self, occurrences: usize) -> f64 {
        if occurrences <= self.max {
            return 1.0;
        }
        let over = (occurrences - self.max) as f64;
        (1.0 - over / self.max as f64).max(0.0)
    }
}

/// Weighted placement quality: summary 0.4, experience 0.4, skills 0.2.
pub fn placement_quality(record: &MatchRecord) -> f64 {
    record
        .sections_present
        .iter()
        .map(|s| match s {
            Section::Summary | Section::Experience => 0.4,
            Section::Skills => 0.2,
        })
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordUsage {
    pub keyword: String,
    pub category: KeywordCategory,
    pub job_frequency: usize,
    pub occurrences: usize,
    pub target: TargetBand,
    pub status: UsageStatus,
    pub placement_quality: f64,
    pub recommendation: Option<String>,
    /// Alternative phrasings the resume could use, excluding forms it already uses.
    pub suggested_variants: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub total: usize,
    pub missing: usize,
    pub underutilized: usize,
    pub optimal: usize,
    pub overstuffed: usize,
    /// Share of keywords found at all.
    pub coverage: f64,
    /// Share of keywords inside their target band.
    pub optimal_share: f64,
    pub mean_placement_quality: f64,
    /// Hard skills and tools with no occurrence.
    pub critical_missing: Vec<String>,
}

const MAX_SUGGESTED_VARIANTS: usize = 3;

pub fn analyze_usage(job: &ExtractionResult, records: &[MatchRecord]) -> Vec<KeywordUsage> {
    records
        .iter()
        .map(|record| {
            let job_frequency = job.frequency(&record.keyword);
            let target = TargetBand::for_job_frequency(job_frequency);
            let status = target.status(record.occurrences);
            let suggested_variants = variations_of(&record.keyword)
                .into_iter()
                .skip(1)
                .filter(|v| !record.matched_forms.contains(v))
                .take(MAX_SUGGESTED_VARIANTS)
                .collect();
            KeywordUsage {
                keyword: record.keyword.clone(),
                category: record.category,
                job_frequency,
                occurrences: record.occurrences,
                target,
                status,
                placement_quality: placement_quality(record),
                recommendation: usage_recommendation(
                    &record.keyword,
                    status,
                    record.occurrences,
                    target,
                ),
                suggested_variants,
            }
        })
        .collect()
}

fn usage_recommendation(
    keyword: &str,
    status: UsageStatus,
    occurrences: usize,
    target: TargetBand,
) -> Option<String> {
    match status {
        UsageStatus::Missing => Some(format!(
            "Add '{keyword}' {} time(s) where it reflects real experience",
            target.min
        )),
        UsageStatus::Underutilized => Some(format!(
            "Mention '{keyword}' {} more time(s)",
            target.min - occurrences
        )),
        UsageStatus::Optimal => None,
        UsageStatus::Overstuffed => Some(format!(
            "Reduce '{keyword}' by {} mention(s) to avoid keyword stuffing",
            occurrences - target.max
        )),
    }
}

pub fn summarize(usage: &[KeywordUsage]) -> CoverageSummary {
    let mut summary = CoverageSummary {
        total: usage.len(),
        ..Default::default()
    };
    if usage.is_empty() {
        summary.coverage = 1.0;
        return summary;
    }
    for u in usage {
        match u.status {
            UsageStatus::Missing => {
                summary.missing += 1;
                if matches!(
                    u.category,
                    KeywordCategory::HardSkill | KeywordCategory::ToolOrTechnology
                ) {
                    summary.critical_missing.push(u.keyword.clone());
                }
            }
            UsageStatus::Underutilized => summary.underutilized += 1,
            UsageStatus::Optimal => summary.optimal += 1,
            UsageStatus::Overstuffed => summary.overstuffed += 1,
        }
    }
    let n = usage.len() as f64;
    summary.coverage = (usage.len() - summary.missing) as f64 / n;
    summary.optimal_share = summary.optimal as f64 / n;
    summary.mean_placement_quality = usage.iter().map(|u| u.placement_quality).sum::<f64>() / n;
    summary
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn record(keyword: &str, category: KeywordCategory, occurrences: usize) -> MatchRecord {
        MatchRecord {
            keyword: keyword.to_string(),
            category,
            weight: category.weight(),
            found: occurrences > 0,
            occurrences,
            sections_present: BTreeSet::new(),
            matched_forms: vec![],
        }
    }

    #[test]
    fn test_target_band() {
        assert_eq!(TargetBand::for_job_frequency(1), TargetBand { min: 1, max: 4 });
        assert_eq!(TargetBand::for_job_frequency(0), TargetBand { min: 1, max: 4 });
        assert_eq!(TargetBand::for_job_frequency(2), TargetBand { min: 3, max: 6 });
        assert_eq!(TargetBand::for_job_frequency(4), TargetBand { min: 6, max: 9 });
    }

    #[test]
    fn test_status_bands() {
        let band = TargetBand { min: 2, max: 5 };
        assert_eq!(band.status(0), UsageStatus::Missing);
        assert_eq!(band.status(1), UsageStatus::Underutilized);
        assert_eq!(band.status(5), UsageStatus::Optimal);
        assert_eq!(band.status(6), UsageStatus::Overstuffed);
    }

    #[test]
    fn test_stuffing_factor() {
        let band = TargetBand { min: 2, max: 5 };
        assert_eq!(band.stuffing_factor(5), 1.0);
        assert!((band.stuffing_factor(7) - 0.6).abs() < 1e-9);
        assert_eq!(band.stuffing_factor(15), 0.0);
    }

    #[test]
    fn test_placement_quality() {
        let mut r = record("rust", KeywordCategory::HardSkill, 3);
        r.sections_present = BTreeSet::from([Section::Experience, Section::Skills]);
        assert!((placement_quality(&r) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_counts_and_critical() {
        let job = ExtractionResult::empty(crate::keywords::models::ExtractionMethod::RuleBased);
        let records = vec![
            record("rust", KeywordCategory::HardSkill, 0),
            record("teamwork", KeywordCategory::SoftSkill, 0),
            record("kafka", KeywordCategory::ToolOrTechnology, 3),
        ];
        let usage = analyze_usage(&job, &records);
        let summary = summarize(&usage);
        assert_eq!(summary.missing, 2);
        assert_eq!(summary.optimal, 1);
        assert_eq!(summary.critical_missing, vec!["rust".to_string()]);
        assert!((summary.coverage - 1.0 / 3.0).abs() < 1e-9);
        assert!((summary.optimal_share - 1.0 / 3.0).abs() < 1e-9);
        assert!(usage[0].recommendation.as_deref().unwrap().contains("Add 'rust'"));
        assert!(usage[2].recommendation.is_none());
    }

    #[test]
    fn test_suggested_variants_skip_used_forms() {
        let job = ExtractionResult::empty(crate::keywords::models::ExtractionMethod::RuleBased);
        let mut r = record("kubernetes", KeywordCategory::ToolOrTechnology, 1);
        r.matched_forms = vec!["k8s".into()];
        let usage = analyze_usage(&job, &[r]);
        assert!(usage[0].suggested_variants.is_empty());
    }
}
