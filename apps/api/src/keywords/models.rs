//! Keyword data model shared by both extraction strategies and every scorer.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::matching::matcher::count_occurrences;

// ────────────────────────────────────────────────────────────────────────────
// Categories and entries
// ────────────────────────────────────────────────────────────────────────────

/// Mutually exclusive keyword classification. Declaration order is also the
/// precedence used when one term is reported under two categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    HardSkill,
    ToolOrTechnology,
    Certification,
    SoftSkill,
    DomainTerm,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 5] = [
        KeywordCategory::HardSkill,
        KeywordCategory::ToolOrTechnology,
        KeywordCategory::Certification,
        KeywordCategory::SoftSkill,
        KeywordCategory::DomainTerm,
    ];

    /// Fixed importance weight. Never overridden per keyword.
    pub fn weight(self) -> f64 {
        match self {
            KeywordCategory::HardSkill | KeywordCategory::ToolOrTechnology => 3.0,
            KeywordCategory::Certification => 2.0,
            KeywordCategory::SoftSkill | KeywordCategory::DomainTerm => 1.0,
        }
    }

    /// Wire name, as serialized.
    pub fn key(self) -> &'static str {
        match self {
            KeywordCategory::HardSkill => "hard_skill",
            KeywordCategory::ToolOrTechnology => "tool_or_technology",
            KeywordCategory::Certification => "certification",
            KeywordCategory::SoftSkill => "soft_skill",
            KeywordCategory::DomainTerm => "domain_term",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KeywordCategory::HardSkill => "hard skills",
            KeywordCategory::ToolOrTechnology => "tools and technologies",
            KeywordCategory::Certification => "certifications",
            KeywordCategory::SoftSkill => "soft skills",
            KeywordCategory::DomainTerm => "domain terms",
        }
    }
}

/// A single categorized keyword. `text` is lower-cased, trimmed and
/// whitespace-collapsed; `weight` always equals `category.weight()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordEntry {
    text: String,
    category: KeywordCategory,
    weight: f64,
}

impl KeywordEntry {
    /// Returns `None` for blank text.
    pub fn new(text: &str, category: KeywordCategory) -> Option<Self> {
        let text = normalize_keyword(text);
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text,
            category,
            weight: category.weight(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> KeywordCategory {
        self.category
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

pub fn normalize_keyword(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs and wire shapes
// ────────────────────────────────────────────────────────────────────────────

/// Optional pre-parsed skill lists supplied by the surrounding workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionHints {
    pub required_skills: Vec<String>,
    pub preferred_skills: Vec<String>,
    /// Skills already listed by the candidate's own structured profile.
    /// Never part of the job's keyword set.
    pub candidate_skills: Vec<String>,
}

impl ExtractionHints {
    /// True when no job-side skills were supplied.
    pub fn is_empty(&self) -> bool {
        self.required_skills.is_empty() && self.preferred_skills.is_empty()
    }

    /// Required then preferred skills.
    pub fn job_skills(&self) -> impl Iterator<Item = &String> {
        self.required_skills.iter().chain(&self.preferred_skills)
    }
}

/// The five-array shape both strategies produce. The delegated collaborator
/// must return exactly this object; missing or extra fields are a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorizedKeywords {
    pub hard_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools_technologies: Vec<String>,
    pub certifications: Vec<String>,
    pub domain_terms: Vec<String>,
}

impl CategorizedKeywords {
    fn list(&self, category: KeywordCategory) -> &[String] {
        match category {
            KeywordCategory::HardSkill => &self.hard_skills,
            KeywordCategory::ToolOrTechnology => &self.tools_technologies,
            KeywordCategory::Certification => &self.certifications,
            KeywordCategory::SoftSkill => &self.soft_skills,
            KeywordCategory::DomainTerm => &self.domain_terms,
        }
    }

    /// Folds the job-side hint skills into `hard_skills`.
    pub fn merge_hints(&mut self, hints: &ExtractionHints) {
        self.hard_skills.extend(hints.job_skills().cloned());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Delegated,
    RuleBased,
}

// ────────────────────────────────────────────────────────────────────────────
// ExtractionResult
// ────────────────────────────────────────────────────────────────────────────

/// Categorized, weighted keyword set for one document. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub hard_skills: Vec<KeywordEntry>,
    pub soft_skills: Vec<KeywordEntry>,
    pub tools_technologies: Vec<KeywordEntry>,
    pub certifications: Vec<KeywordEntry>,
    pub domain_terms: Vec<KeywordEntry>,
    /// canonical text → weight
    pub weighted_keywords: BTreeMap<String, f64>,
    pub all_keywords: Vec<String>,
    /// canonical text → boundary-safe occurrences in the source text
    pub keyword_frequencies: BTreeMap<String, usize>,
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    pub fn empty(method: ExtractionMethod) -> Self {
        Self {
            hard_skills: vec![],
            soft_skills: vec![],
            tools_technologies: vec![],
            certifications: vec![],
            domain_terms: vec![],
            weighted_keywords: BTreeMap::new(),
            all_keywords: vec![],
            keyword_frequencies: BTreeMap::new(),
            method,
        }
    }

    /// Normalizes and weights raw category lists.
    ///
    /// A term listed under several categories is kept once, under the
    /// category that comes first in `KeywordCategory::ALL`.
    pub fn from_categorized(
        raw: &CategorizedKeywords,
        method: ExtractionMethod,
        source_text: &str,
    ) -> Self {
        let mut result = Self::empty(method);
        let mut seen: HashSet<String> = HashSet::new();

        for category in KeywordCategory::ALL {
            for text in raw.list(category) {
                let Some(entry) = KeywordEntry::new(text, category) else {
                    continue;
                };
                if !seen.insert(entry.text.clone()) {
                    continue;
                }
                result
                    .weighted_keywords
                    .insert(entry.text.clone(), entry.weight);
                result.all_keywords.push(entry.text.clone());
                result.keyword_frequencies.insert(
                    entry.text.clone(),
                    count_occurrences(source_text, &entry.text),
                );
                result.list_mut(category).push(entry);
            }
        }
        result
    }

    fn list_mut(&mut self, category: KeywordCategory) -> &mut Vec<KeywordEntry> {
        match category {
            KeywordCategory::HardSkill => &mut self.hard_skills,
            KeywordCategory::ToolOrTechnology => &mut self.tools_technologies,
            KeywordCategory::Certification => &mut self.certifications,
            KeywordCategory::SoftSkill => &mut self.soft_skills,
            KeywordCategory::DomainTerm => &mut self.domain_terms,
        }
    }

    pub fn by_category(&self, category: KeywordCategory) -> &[KeywordEntry] {
        match category {
            KeywordCategory::HardSkill => &self.hard_skills,
            KeywordCategory::ToolOrTechnology => &self.tools_technologies,
            KeywordCategory::Certification => &self.certifications,
            KeywordCategory::SoftSkill => &self.soft_skills,
            KeywordCategory::DomainTerm => &self.domain_terms,
        }
    }

    /// All entries, in category precedence order.
    pub fn entries(&self) -> impl Iterator<Item = &KeywordEntry> {
        KeywordCategory::ALL
            .into_iter()
            .flat_map(move |c| self.by_category(c).iter())
    }

    pub fn len(&self) -> usize {
        self.all_keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_keywords.is_empty()
    }

    pub fn frequency(&self, keyword: &str) -> usize {
        self.keyword_frequencies.get(keyword).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_weights_are_fixed() {
        assert_eq!(KeywordCategory::HardSkill.weight(), 3.0);
        assert_eq!(KeywordCategory::ToolOrTechnology.weight(), 3.0);
        assert_eq!(KeywordCategory::Certification.weight(), 2.0);
        assert_eq!(KeywordCategory::SoftSkill.weight(), 1.0);
        assert_eq!(KeywordCategory::DomainTerm.weight(), 1.0);
    }

    #[test]
    fn test_entry_normalizes_text() {
        let e = KeywordEntry::new("  Machine   Learning ", KeywordCategory::HardSkill).unwrap();
        assert_eq!(e.text(), "machine learning");
        assert_eq!(e.weight(), 3.0);
        assert!(KeywordEntry::new("   ", KeywordCategory::SoftSkill).is_none());
    }

    #[test]
    fn test_from_categorized_dedupes_by_precedence() {
        let raw = CategorizedKeywords {
            hard_skills: vec!["AWS".into(), "python".into()],
            tools_technologies: vec!["aws".into(), "docker".into()],
            soft_skills: vec!["Leadership".into()],
            ..Default::default()
        };
        let r = ExtractionResult::from_categorized(
            &raw,
            ExtractionMethod::RuleBased,
            "Python and AWS, AWS again",
        );
        assert_eq!(r.hard_skills.len(), 2);
        assert_eq!(r.tools_technologies.len(), 1, "aws kept only as hard skill");
        assert_eq!(r.weighted_keywords["aws"], 3.0);
        assert_eq!(r.weighted_keywords["leadership"], 1.0);
        assert_eq!(r.frequency("aws"), 2);
        assert_eq!(r.frequency("docker"), 0);
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn test_delegated_shape_rejects_missing_category() {
        let json = r#"{"hard_skills": [], "soft_skills": [], "tools_technologies": [], "certifications": []}"#;
        assert!(serde_json::from_str::<CategorizedKeywords>(json).is_err());
    }

    #[test]
    fn test_delegated_shape_rejects_unknown_field() {
        let json = r#"{"hard_skills": [], "soft_skills": [], "tools_technologies": [],
            "certifications": [], "domain_terms": [], "extra": []}"#;
        assert!(serde_json::from_str::<CategorizedKeywords>(json).is_err());
    }

    #[test]
    fn test_merge_hints_adds_hard_skills() {
        let mut raw = CategorizedKeywords::default();
        raw.merge_hints(&ExtractionHints {
            required_skills: vec!["python".into()],
            preferred_skills: vec!["go".into()],
            candidate_skills: vec![],
        });
        assert_eq!(raw.hard_skills, vec!["python".to_string(), "go".to_string()]);
    }

    #[test]
    fn test_merge_hints_ignores_candidate_skills() {
        let mut raw = CategorizedKeywords::default();
        let hints = ExtractionHints {
            candidate_skills: vec!["rust".into(), "excel".into()],
            ..Default::default()
        };
        assert!(hints.is_empty());
        raw.merge_hints(&hints);
        assert!(raw.hard_skills.is_empty());
    }
}
