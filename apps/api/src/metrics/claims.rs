//! Claim extraction for authenticity checks.
//!
//! A claim is a sentence or bullet carrying a quantity (number, percentage,
//! currency, multiplier) or a named entity (technology, organization,
//! acronym). The same extraction run over the original resume yields the
//! facts that claims are checked against.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::keywords::models::KeywordCategory;
use crate::keywords::patterns::dictionary_terms;
use crate::matching::matcher::TermPattern;
use crate::text::{content_tokens, is_stopword, normalize, segments};

static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\$)?\b(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)(?:\s?(k|mm|m|bn|b|thousand|million|billion)\b)?(\s?%|x\b|\+)?(\s+(?:years?|yrs?)\b)?",
    )
    .expect("static regex")
});

/// Runs of capitalized words, including acronyms ("AWS", "Goldman Sachs").
static CAPITALIZED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][\w&]*(?:[ \t]+[A-Z][\w&]*)*").expect("static regex")
});

/// Verbs that assert sole ownership of the work.
const SOLE_OWNER_VERBS: &[&str] = &[
    "architected",
    "spearheaded",
    "owned",
    "drove",
    "led",
    "built",
    "designed",
];

#[rustfmt::skip]
const OVERSTATEMENTS: &[&str] = &[
    "award-winning", "world-class", "industry-leading", "best-in-class", "first-ever",
    "record-breaking", "single-handedly", "pioneered", "revolutionized", "groundbreaking",
    "top-performing", "#1", "sole", "visionary",
];

static STRENGTH_MARKERS: LazyLock<Vec<(&'static str, TermPattern)>> = LazyLock::new(|| {
    SOLE_OWNER_VERBS
        .iter()
        .chain(OVERSTATEMENTS)
        .filter_map(|m| TermPattern::exact(m).ok().map(|p| (*m, p)))
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    Percent,
    Currency,
    Multiplier,
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: QuantityUnit,
    pub raw: String,
}

impl Quantity {
    /// Same unit and within `tolerance` (relative) of `fact`.
    pub fn within(&self, fact: &Quantity, tolerance: f64) -> bool {
        if self.unit != fact.unit {
            return false;
        }
        if fact.value == 0.0 {
            return self.value == 0.0;
        }
        (self.value - fact.value).abs() <= tolerance * fact.value.abs()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claim {
    pub text: String,
    pub line: usize,
    #[serde(skip)]
    pub normalized: String,
    pub quantities: Vec<Quantity>,
    pub entities: BTreeSet<String>,
    #[serde(skip)]
    pub tokens: BTreeSet<String>,
    pub markers: BTreeSet<String>,
}

impl Claim {
    /// Share of this claim's content tokens that also occur in `other`.
    pub fn overlap(&self, other: &Claim) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        self.tokens.intersection(&other.tokens).count() as f64 / self.tokens.len() as f64
    }
}

/// Extracts claims from every sentence and bullet of `text`. Entities in
/// `excluded` (lower-case) are ignored.
pub fn extract_claims(text: &str, excluded: &HashSet<String>) -> Vec<Claim> {
    segments(text)
        .into_iter()
        .filter_map(|seg| {
            let quantities = quantities(&seg.text);
            let entities = entities(&seg.text, excluded);
            if quantities.is_empty() && entities.is_empty() {
                return None;
            }
            Some(Claim {
                normalized: normalize(&seg.text),
                tokens: content_tokens(&seg.text).into_iter().collect(),
                markers: strength_markers(&seg.text),
                text: seg.text,
                line: seg.line,
                quantities,
                entities,
            })
        })
        .collect()
}

/// Quantities in `text`. Durations in years and bare calendar years are skipped.
pub fn quantities(text: &str) -> Vec<Quantity> {
    let mut out = Vec::new();
    for caps in QUANTITY_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if text[whole.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric())
        {
            continue;
        }
        if caps.get(5).is_some() {
            continue;
        }
        let Some(number) = caps.get(2) else { continue };
        let Ok(mut value) = number.as_str().replace(',', "").parse::<f64>() else {
            continue;
        };
        let currency = caps.get(1).is_some();
        let scale = caps.get(3).map(|m| m.as_str().to_lowercase());
        let suffix = caps.get(4).map(|m| m.as_str().trim().to_lowercase());

        let is_calendar_year = !currency
            && scale.is_none()
            && suffix.is_none()
            && number.as_str().len() == 4
            && (1900.0..=2099.0).contains(&value);
        if is_calendar_year {
            continue;
        }

        value *= match scale.as_deref() {
            Some("k") | Some("thousand") => 1e3,
            Some("m") | Some("mm") | Some("million") => 1e6,
            Some("b") | Some("bn") | Some("billion") => 1e9,
            _ => 1.0,
        };
        let unit = match suffix.as_deref() {
            Some("%") => QuantityUnit::Percent,
            Some("x") => QuantityUnit::Multiplier,
            _ if currency => QuantityUnit::Currency,
            _ => QuantityUnit::Count,
        };
        out.push(Quantity {
            value,
            unit,
            raw: whole.as_str().trim().to_string(),
        });
    }
    out
}

/// Named technologies, certifications, organizations and acronyms in `text`.
pub fn entities(text: &str, excluded: &HashSet<String>) -> BTreeSet<String> {
    let mut out = BTreeSet::new();

    let found = dictionary_terms(text);
    for category in [
        KeywordCategory::HardSkill,
        KeywordCategory::ToolOrTechnology,
        KeywordCategory::Certification,
    ] {
        out.extend(found.get(&category).into_iter().flatten().cloned());
    }

    let trimmed = text.trim_start();
    let offset = text.len() - trimmed.len();
    for m in CAPITALIZED_RE.find_iter(text) {
        let mut words: Vec<&str> = m.as_str().split_whitespace().collect();
        // The first word of a sentence is capitalized regardless.
        if m.start() == offset && !words.is_empty() {
            words.remove(0);
        }
        while words.first().is_some_and(|w| is_stopword(w)) {
            words.remove(0);
        }
        while words.last().is_some_and(|w| is_stopword(w)) {
            words.pop();
        }
        if words.is_empty() {
            continue;
        }
        out.insert(words.join(" ").to_lowercase());
    }

    out.retain(|e| !excluded.contains(e));
    out
}

/// Sole-ownership verbs and superlatives present in `text`.
pub fn strength_markers(text: &str) -> BTreeSet<String> {
    STRENGTH_MARKERS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(marker, _)| marker.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> Vec<(f64, QuantityUnit)> {
        quantities(text).into_iter().map(|q| (q.value, q.unit)).collect()
    }

    #[test]
    fn test_quantity_forms() {
        assert_eq!(values("Cut costs 40%"), vec![(40.0, QuantityUnit::Percent)]);
        assert_eq!(values("Saved $5M a year"), vec![(5e6, QuantityUnit::Currency)]);
        assert_eq!(values("Serving 1M+ users"), vec![(1e6, QuantityUnit::Count)]);
        assert_eq!(values("Made it 3x faster"), vec![(3.0, QuantityUnit::Multiplier)]);
        assert_eq!(values("Handled 12,500 requests"), vec![(12500.0, QuantityUnit::Count)]);
        assert_eq!(values("A $2.5 million deal"), vec![(2.5e6, QuantityUnit::Currency)]);
    }

    #[test]
    fn test_quantities_skip_years_and_identifiers() {
        assert!(values("5 years of Rust").is_empty());
        assert!(values("Joined in 2019").is_empty());
        assert!(values("Ran K8s on S3 with p99 targets").is_empty());
        assert!(values("Finished 3rd").is_empty());
    }

    #[test]
    fn test_within_tolerance() {
        let fact = Quantity {
            value: 40.0,
            unit: QuantityUnit::Percent,
            raw: "40%".into(),
        };
        let near = Quantity {
            value: 43.0,
            ..fact.clone()
        };
        let far = Quantity {
            value: 45.0,
            ..fact.clone()
        };
        assert!(near.within(&fact, 0.10));
        assert!(!far.within(&fact, 0.10));
        let count = Quantity {
            unit: QuantityUnit::Count,
            ..fact.clone()
        };
        assert!(!count.within(&fact, 0.10), "units must agree");
    }

    #[test]
    fn test_entities() {
        let e = entities("Migrated Goldman Sachs trading to AWS and Kafka", &HashSet::new());
        assert!(e.contains("goldman sachs"));
        assert!(e.contains("aws"));
        assert!(e.contains("kafka"));
        assert!(!e.contains("migrated"), "sentence-initial word is not an entity");
    }

    #[test]
    fn test_excluded_entities() {
        let excluded = HashSet::from(["snowflake".to_string()]);
        assert!(entities("Reporting on Snowflake", &excluded).is_empty());
    }

    #[test]
    fn test_extract_claims_keeps_only_claim_shaped_segments() {
        let text = "- Built a web application\n- Reduced latency by 40% using Redis";
        let claims = extract_claims(text, &HashSet::new());
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].line, 1);
        assert!(claims[0].entities.contains("redis"));
        assert_eq!(claims[0].markers, BTreeSet::new());
    }

    #[test]
    fn test_strength_markers() {
        let m = strength_markers("Architected an award-winning platform");
        assert_eq!(
            m,
            BTreeSet::from(["architected".to_string(), "award-winning".to_string()])
        );
    }
}
