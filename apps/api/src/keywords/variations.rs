//! Semantic variation table: canonical term → accepted surface forms.
//!
//! Every set contains its canonical key (reflexive), and lookups work from
//! any member (symmetric): "k8s" resolves to the same set as "kubernetes".

use std::collections::HashMap;
use std::sync::LazyLock;

/// Canonical term and its equivalent forms. The canonical is listed again
/// by `variations_of`, so it is not repeated here.
#[rustfmt::skip]
const VARIATION_TABLE: &[(&str, &[&str])] = &[
    // Languages
    ("javascript", &["js", "ecmascript", "es6", "javascript es6"]),
    ("typescript", &["ts"]),
    ("python", &["python3", "python 3"]),
    ("golang", &["go lang", "go"]),
    ("c++", &["cpp", "cplusplus"]),
    ("c#", &["csharp", "c sharp"]),
    ("objective-c", &["objc", "obj-c"]),
    ("sql", &["structured query language"]),
    // Frameworks and runtimes
    ("react", &["reactjs", "react.js"]),
    ("node.js", &["nodejs", "node", "node js"]),
    ("vue", &["vue.js", "vuejs"]),
    ("angular", &["angularjs", "angular.js"]),
    ("next.js", &["nextjs", "next js"]),
    (".net", &["dotnet", "dot net"]),
    ("ruby on rails", &["rails", "ror"]),
    ("scikit-learn", &["sklearn", "scikit learn"]),
    // Data stores
    ("postgresql", &["postgres", "psql"]),
    ("mongodb", &["mongo"]),
    ("elasticsearch", &["elastic search", "elk"]),
    ("sql server", &["mssql", "microsoft sql server"]),
    // Cloud and infrastructure
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("azure", &["microsoft azure"]),
    ("kubernetes", &["k8s"]),
    ("ci/cd", &["ci cd", "cicd", "continuous integration", "continuous delivery", "continuous deployment"]),
    ("terraform", &["hashicorp terraform"]),
    // Concepts and methodologies
    ("machine learning", &["ml"]),
    ("artificial intelligence", &["ai"]),
    ("natural language processing", &["nlp"]),
    ("rest", &["rest api", "restful", "restful api", "rest apis"]),
    ("api", &["apis"]),
    ("microservices", &["microservice", "micro-services", "micro services"]),
    ("test-driven development", &["tdd", "test driven development"]),
    ("user experience", &["ux"]),
    ("user interface", &["ui"]),
    ("quality assurance", &["qa"]),
    ("git", &["git version control"]),
    ("agile", &["agile methodology", "agile development"]),
    // Soft-skill phrasings
    ("communication", &["communication skills", "communicating"]),
    ("leadership", &["leading teams", "team leadership", "led teams"]),
    ("problem solving", &["problem-solving", "troubleshooting"]),
    ("collaboration", &["collaborative", "collaborated", "cross-functional collaboration"]),
    ("mentoring", &["mentorship", "mentored", "coaching"]),
    ("stakeholder management", &["stakeholder communication", "managing stakeholders"]),
];

/// Surface forms too close to ordinary English to count as evidence on their own.
pub const AMBIGUOUS_FORMS: &[&str] = &["go", "node", "rest", "rails", "ai", "ui", "qa", "ts", "ml"];

pub fn is_ambiguous(form: &str) -> bool {
    AMBIGUOUS_FORMS.contains(&form)
}

static CANONICAL: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| VARIATION_TABLE.iter().copied().collect());

/// Reverse index: any member (canonical included) → canonical keys of the sets it belongs to.
static MEMBER_TO_CANONICAL: LazyLock<HashMap<&'static str, Vec<&'static str>>> =
    LazyLock::new(|| {
        let mut index: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for &(canonical, variants) in VARIATION_TABLE {
            index.entry(canonical).or_default().push(canonical);
            for &v in variants {
                index.entry(v).or_default().push(canonical);
            }
        }
        index
    });

/// Returns the full ordered variation set for `term` (lower-cased).
///
/// The term itself is always the first element. Terms absent from the
/// table get automatic singular/plural forms.
pub fn variations_of(term: &str) -> Vec<String> {
    let term = term.trim().to_lowercase();
    let mut out = vec![term.clone()];

    let mut push = |s: &str| {
        if !out.iter().any(|e| e == s) {
            out.push(s.to_string());
        }
    };

    match MEMBER_TO_CANONICAL.get(term.as_str()) {
        Some(canonicals) => {
            for &canonical in canonicals {
                push(canonical);
                if let Some(&variants) = CANONICAL.get(canonical) {
                    for &v in variants {
                        push(v);
                    }
                }
            }
        }
        None => {
            for form in number_forms(&term) {
                push(&form);
            }
        }
    }
    out
}

/// Forms that count as evidence for `term`: its variation set without the
/// ambiguous short forms. The term itself is kept even when ambiguous.
pub fn evidence_forms(term: &str) -> Vec<String> {
    let mut forms = variations_of(term);
    let own = forms.remove(0);
    forms.retain(|f| !is_ambiguous(f));
    forms.insert(0, own);
    forms
}

/// Canonical form of `term` when it belongs to the table, otherwise the term itself.
pub fn canonical_of(term: &str) -> String {
    let term = term.trim().to_lowercase();
    MEMBER_TO_CANONICAL
        .get(term.as_str())
        .and_then(|c| c.first())
        .map(|c| c.to_string())
        .unwrap_or(term)
}

pub fn is_known(term: &str) -> bool {
    MEMBER_TO_CANONICAL.contains_key(term.trim().to_lowercase().as_str())
}

/// Naive singular/plural pair for single alphabetic words of four letters or more.
fn number_forms(term: &str) -> Vec<String> {
    if term.contains(' ') || term.len() < 4 || !term.chars().all(|c| c.is_ascii_alphabetic()) {
        return vec![];
    }
    if let Some(stem) = term.strip_suffix("ies") {
        vec![format!("{stem}y")]
    } else if term.ends_with("ss") {
        vec![format!("{term}es")]
    } else if let Some(stem) = term.strip_suffix('s') {
        vec![stem.to_string()]
    } else if let Some(stem) = term.strip_suffix('y') {
        vec![format!("{stem}ies")]
    } else {
        vec![format!("{term}s")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_are_reflexive() {
        for (canonical, _) in VARIATION_TABLE {
            let set = variations_of(canonical);
            assert_eq!(set[0], *canonical);
        }
    }

    #[test]
    fn test_lookup_is_symmetric() {
        assert!(variations_of("kubernetes").contains(&"k8s".to_string()));
        assert!(variations_of("k8s").contains(&"kubernetes".to_string()));
        assert!(variations_of("Amazon Web Services").contains(&"aws".to_string()));
    }

    #[test]
    fn test_variant_lookup_includes_siblings() {
        let set = variations_of("reactjs");
        assert!(set.contains(&"react".to_string()));
        assert!(set.contains(&"react.js".to_string()));
    }

    #[test]
    fn test_canonical_of() {
        assert_eq!(canonical_of("K8s"), "kubernetes");
        assert_eq!(canonical_of("postgres"), "postgresql");
        assert_eq!(canonical_of("fortran"), "fortran");
    }

    #[test]
    fn test_unknown_terms_get_number_forms() {
        assert_eq!(variations_of("pipeline"), vec!["pipeline", "pipelines"]);
        assert_eq!(variations_of("dashboards"), vec!["dashboards", "dashboard"]);
        assert_eq!(variations_of("strategy"), vec!["strategy", "strategies"]);
        assert_eq!(variations_of("go"), vec!["go", "golang", "go lang"]);
        assert_eq!(variations_of("data modeling"), vec!["data modeling"]);
    }

    #[test]
    fn test_evidence_forms_drop_ambiguous_siblings() {
        assert_eq!(evidence_forms("golang"), vec!["golang", "go lang"]);
        assert_eq!(evidence_forms("go"), vec!["go", "golang", "go lang"]);
        assert!(!evidence_forms("restful").contains(&"rest".to_string()));
        assert!(!evidence_forms("machine learning").contains(&"ml".to_string()));
        assert_eq!(evidence_forms("pipeline"), variations_of("pipeline"));
    }
}
