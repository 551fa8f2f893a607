//! Pattern dictionaries behind rule-based extraction.
//!
//! Technical terms are stored by canonical name and matched through their
//! variation sets, so "K8s" in a posting yields "kubernetes".

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::keywords::models::KeywordCategory;
use crate::keywords::variations::{is_ambiguous, variations_of};
use crate::matching::matcher::TermPattern;
use crate::matching::sections::header_kind;
use crate::text::{is_stopword, tokenizer::words};

// ────────────────────────────────────────────────────────────────────────────
// Dictionaries
// ────────────────────────────────────────────────────────────────────────────

/// Languages, disciplines and methodologies.
#[rustfmt::skip]
const HARD_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "golang", "rust", "c++", "c#", "ruby",
    "php", "scala", "kotlin", "sql", "html", "css", "bash", "objective-c",
    "machine learning", "deep learning", "artificial intelligence", "natural language processing",
    "computer vision", "data science", "data analysis", "data engineering", "data modeling",
    "statistics", "distributed systems", "system design", "microservices", "rest", "graphql",
    "api", "ci/cd", "devops", "test-driven development", "unit testing",
    "object-oriented programming", "algorithms", "data structures", "etl", "cloud computing",
    "networking", "agile", "scrum", "kanban", "user experience", "user interface",
    "quality assurance", "product management", "project management", "a/b testing",
    "performance optimization", "site reliability engineering", "infrastructure as code",
];

/// Frameworks, libraries, data stores, platforms and tooling.
#[rustfmt::skip]
const TOOLS_TECHNOLOGIES: &[&str] = &[
    "react", "angular", "vue", "node.js", "next.js", "django", "flask", "fastapi",
    "spring boot", "express.js", "ruby on rails", ".net", "tensorflow", "pytorch",
    "scikit-learn", "pandas", "numpy", "apache spark", "hadoop", "kafka", "airflow",
    "postgresql", "mysql", "mongodb", "redis", "elasticsearch", "cassandra", "dynamodb",
    "snowflake", "sql server", "bigquery", "redshift", "rabbitmq", "aws", "gcp", "azure",
    "docker", "kubernetes", "terraform", "ansible", "jenkins", "github actions", "gitlab",
    "git", "linux", "nginx", "grafana", "prometheus", "datadog", "tableau", "power bi",
    "looker", "dbt", "jira", "confluence", "figma", "salesforce", "webpack", "jest",
    "selenium", "cypress", "graphql apollo", "helm", "istio", "openshift", "heroku",
    "vercel", "firebase", "supabase", "celery", "grpc", "protobuf", "splunk", "new relic",
];

#[rustfmt::skip]
const SOFT_SKILLS: &[&str] = &[
    "communication", "leadership", "teamwork", "collaboration", "problem solving",
    "critical thinking", "time management", "mentoring", "stakeholder management",
    "adaptability", "attention to detail", "creativity", "decision making", "negotiation",
    "presentation skills", "public speaking", "conflict resolution", "emotional intelligence",
    "interpersonal skills", "self-motivated", "ownership", "accountability",
    "organizational skills", "analytical skills", "strategic thinking", "customer focus",
    "cross-functional", "initiative", "empathy", "multitasking", "prioritization",
];

#[rustfmt::skip]
const CERTIFICATIONS: &[&str] = &[
    "aws certified solutions architect", "aws certified developer", "aws certified sysops administrator",
    "google professional cloud architect", "azure fundamentals", "azure administrator",
    "certified kubernetes administrator", "certified kubernetes application developer",
    "certified scrum master", "pmp", "cissp", "cism", "cisa", "comptia security+",
    "comptia network+", "comptia a+", "ccna", "ccnp", "cka", "ckad", "itil", "six sigma",
    "cpa", "cfa", "oscp", "rhce", "safe agilist", "prince2",
];

const MAX_DOMAIN_TERMS: usize = 50;
const MIN_DOMAIN_TOKEN_CHARS: usize = 4;

// ────────────────────────────────────────────────────────────────────────────
// Compiled patterns
// ────────────────────────────────────────────────────────────────────────────

struct DictionaryTerm {
    canonical: &'static str,
    category: KeywordCategory,
    pattern: TermPattern,
}

fn unambiguous_pattern(term: &str) -> Option<TermPattern> {
    let forms: Vec<String> = variations_of(term)
        .into_iter()
        .filter(|f| !is_ambiguous(f))
        .collect();
    TermPattern::with_forms(forms).ok()
}

static DICTIONARY: LazyLock<Vec<DictionaryTerm>> = LazyLock::new(|| {
    let tagged = HARD_SKILLS
        .iter()
        .map(|t| (*t, KeywordCategory::HardSkill))
        .chain(TOOLS_TECHNOLOGIES.iter().map(|t| (*t, KeywordCategory::ToolOrTechnology)))
        .chain(SOFT_SKILLS.iter().map(|t| (*t, KeywordCategory::SoftSkill)));
    let mut terms: Vec<DictionaryTerm> = tagged
        .filter_map(|(canonical, category)| {
            unambiguous_pattern(canonical).map(|pattern| DictionaryTerm {
                canonical,
                category,
                pattern,
            })
        })
        .collect();
    terms.extend(CERTIFICATIONS.iter().filter_map(|canonical| {
        TermPattern::exact(canonical).ok().map(|pattern| DictionaryTerm {
            canonical,
            category: KeywordCategory::Certification,
            pattern,
        })
    }));
    terms
});

/// Upper-case acronym directly before or after a certification word.
static CERT_ACRONYM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z][A-Z0-9+]{1,6})\s+[Cc]ertifi(?:ed|cation|cate)\b|\b[Cc]ertifi(?:ed|cation|cate)(?:\s+in)?\s+([A-Z][A-Z0-9+]{1,6})\b",
    )
    .expect("static regex")
});

/// Two to four capitalized words in a row.
static CAPITALIZED_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,3}\b").expect("static regex")
});

// ────────────────────────────────────────────────────────────────────────────
// Finders
// ────────────────────────────────────────────────────────────────────────────

/// Dictionary terms present in `text`, grouped by category in dictionary order.
pub fn dictionary_terms(text: &str) -> HashMap<KeywordCategory, Vec<String>> {
    let mut out: HashMap<KeywordCategory, Vec<String>> = HashMap::new();
    for term in DICTIONARY.iter() {
        if term.pattern.is_match(text) {
            out.entry(term.category)
                .or_default()
                .push(term.canonical.to_string());
        }
    }
    out
}

/// Acronyms attached to "certified" / "certification", e.g. "PMP certification".
pub fn certification_acronyms(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for caps in CERT_ACRONYM_RE.captures_iter(text) {
        let Some(m) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };
        let acronym = m.as_str().to_lowercase();
        if !out.contains(&acronym) {
            out.push(acronym);
        }
    }
    out
}

/// Domain vocabulary not covered by the dictionaries: capitalized phrases,
/// then content words repeated at least twice. `known` holds terms already
/// extracted; their words are not reported again.
pub fn domain_terms(text: &str, known: &[String]) -> Vec<String> {
    let known_words: HashSet<String> = known
        .iter()
        .flat_map(|k| k.split_whitespace().map(str::to_string))
        .collect();
    let mut out: Vec<String> = Vec::new();
    let push = |term: String, out: &mut Vec<String>| {
        if out.len() < MAX_DOMAIN_TERMS && !out.contains(&term) && !known.contains(&term) {
            out.push(term);
        }
    };

    for m in CAPITALIZED_PHRASE_RE.find_iter(text) {
        let phrase = m.as_str().to_lowercase();
        let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        if header_kind(&phrase).is_some()
            || phrase.split(' ').any(|w| is_stopword(w) || known_words.contains(w))
        {
            continue;
        }
        push(phrase, &mut out);
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for w in words(text) {
        let lower = w.to_lowercase();
        if lower.chars().count() < MIN_DOMAIN_TOKEN_CHARS
            || !lower.starts_with(|c: char| c.is_alphabetic())
            || is_stopword(&lower)
            || known_words.contains(&lower)
        {
            continue;
        }
        let count = counts.entry(lower.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(lower);
        }
    }
    for token in order {
        push(token, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_is_large_enough() {
        assert!(DICTIONARY.len() >= 100);
    }

    #[test]
    fn test_dictionary_terms_by_category() {
        let found = dictionary_terms("We run Python services on K8s and value clear communication.");
        assert_eq!(found[&KeywordCategory::HardSkill], vec!["python".to_string()]);
        assert_eq!(
            found[&KeywordCategory::ToolOrTechnology],
            vec!["kubernetes".to_string()]
        );
        assert_eq!(found[&KeywordCategory::SoftSkill], vec!["communication".to_string()]);
    }

    #[test]
    fn test_ambiguous_forms_do_not_trigger() {
        let found = dictionary_terms("Ready to go the extra mile and rest on weekends");
        assert!(found.get(&KeywordCategory::HardSkill).is_none());
        let found = dictionary_terms("Backend in Go and Golang tooling, REST API design");
        let hard = &found[&KeywordCategory::HardSkill];
        assert!(hard.contains(&"golang".to_string()));
        assert!(hard.contains(&"rest".to_string()));
    }

    #[test]
    fn test_certifications() {
        let found = dictionary_terms("Holds the CKA and CompTIA Security+ credentials");
        let certs = &found[&KeywordCategory::Certification];
        assert!(certs.contains(&"cka".to_string()));
        assert!(certs.contains(&"comptia security+".to_string()));
        assert_eq!(
            certification_acronyms("PMP certification preferred; certified in SAFE"),
            vec!["pmp".to_string(), "safe".to_string()]
        );
    }

    #[test]
    fn test_domain_terms() {
        let text = "Payments platform for Supply Chain Finance. Payments volume grows; \
                    reconciliation matters and reconciliation is hard. Python python.";
        let terms = domain_terms(text, &["python".to_string()]);
        assert!(terms.contains(&"supply chain finance".to_string()));
        assert!(terms.contains(&"payments".to_string()));
        assert!(terms.contains(&"reconciliation".to_string()));
        assert!(!terms.contains(&"python".to_string()));
    }
}
