//! Keyword Extractor: pluggable strategies with a deterministic fallback.
//!
//! Strategies are tried in order. The delegated (model-backed) strategy is
//! bounded by a hard timeout; any failure falls through to the rule-based
//! strategy, which cannot fail. Weighting happens once, after whichever
//! strategy answered, so scorers never see a difference between them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::keywords::models::{
    CategorizedKeywords, ExtractionHints, ExtractionMethod, ExtractionResult, KeywordCategory,
};
use crate::keywords::patterns::{certification_acronyms, dictionary_terms, domain_terms};
use crate::keywords::prompts::{build_extraction_prompt, extraction_system};
use crate::llm_client::{LlmClient, LlmError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(4000);

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("delegated extraction failed: {0}")]
    Llm(#[from] LlmError),

    #[error("{strategy} extraction timed out after {timeout_ms}ms")]
    Timeout {
        strategy: &'static str,
        timeout_ms: u128,
    },

    #[error("malformed extraction response: {0}")]
    Malformed(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy trait
// ────────────────────────────────────────────────────────────────────────────

/// One way of turning text into the five category lists.
///
/// Carried by `KeywordExtractor` as `Arc<dyn ExtractionStrategy>` so the
/// delegated backend can be swapped (or stubbed in tests) without touching
/// callers.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn method(&self) -> ExtractionMethod;

    async fn extract(
        &self,
        text: &str,
        hints: &ExtractionHints,
    ) -> Result<CategorizedKeywords, ExtractionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Delegated strategy
// ────────────────────────────────────────────────────────────────────────────

pub struct DelegatedStrategy {
    llm: LlmClient,
}

impl DelegatedStrategy {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ExtractionStrategy for DelegatedStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Delegated
    }

    async fn extract(
        &self,
        text: &str,
        hints: &ExtractionHints,
    ) -> Result<CategorizedKeywords, ExtractionError> {
        let prompt = build_extraction_prompt(text, hints);
        let raw: CategorizedKeywords = self.llm.call_json(&prompt, &extraction_system()).await?;
        validate_shape(&raw)?;
        Ok(raw)
    }
}

/// Rejects responses that parse but cannot be real keyword lists.
fn validate_shape(raw: &CategorizedKeywords) -> Result<(), ExtractionError> {
    let lists = [
        &raw.hard_skills,
        &raw.soft_skills,
        &raw.tools_technologies,
        &raw.certifications,
        &raw.domain_terms,
    ];
    if let Some(bad) = lists
        .iter()
        .flat_map(|l| l.iter())
        .find(|k| k.contains('\n') || k.chars().count() > 80)
    {
        return Err(ExtractionError::Malformed(format!(
            "keyword is not a short phrase: {:.40}",
            bad
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Rule-based strategy
// ────────────────────────────────────────────────────────────────────────────

/// Dictionary and heuristic extraction. Pure and infallible.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedStrategy;

impl RuleBasedStrategy {
    pub fn categorize(&self, text: &str) -> CategorizedKeywords {
        let mut found = dictionary_terms(text);
        let mut take = |c: KeywordCategory| found.remove(&c).unwrap_or_default();

        let hard_skills = take(KeywordCategory::HardSkill);
        let tools_technologies = take(KeywordCategory::ToolOrTechnology);
        let soft_skills = take(KeywordCategory::SoftSkill);
        let mut certifications = take(KeywordCategory::Certification);
        for acronym in certification_acronyms(text) {
            if !certifications.contains(&acronym) {
                certifications.push(acronym);
            }
        }

        let known: Vec<String> = hard_skills
            .iter()
            .chain(&tools_technologies)
            .chain(&soft_skills)
            .chain(&certifications)
            .cloned()
            .collect();
        let domain_terms = domain_terms(text, &known);

        CategorizedKeywords {
            hard_skills,
            soft_skills,
            tools_technologies,
            certifications,
            domain_terms,
        }
    }
}

#[async_trait]
impl ExtractionStrategy for RuleBasedStrategy {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::RuleBased
    }

    async fn extract(
        &self,
        text: &str,
        _hints: &ExtractionHints,
    ) -> Result<CategorizedKeywords, ExtractionError> {
        Ok(self.categorize(text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

/// Runs the configured strategies in order and weights the first answer.
#[derive(Clone)]
pub struct KeywordExtractor {
    primary: Option<Arc<dyn ExtractionStrategy>>,
    fallback: RuleBasedStrategy,
    timeout: Duration,
}

impl KeywordExtractor {
    /// Extractor that only uses the rule-based strategy.
    pub fn rule_based() -> Self {
        Self {
            primary: None,
            fallback: RuleBasedStrategy,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Extractor that tries `primary` first, bounded by `timeout`.
    pub fn with_primary(primary: Arc<dyn ExtractionStrategy>, timeout: Duration) -> Self {
        Self {
            primary: Some(primary),
            fallback: RuleBasedStrategy,
            timeout,
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Extracts keywords from `text`. Never fails: blank input gives an empty
    /// result and any primary-strategy failure falls back to rules.
    pub async fn extract(&self, text: &str, hints: &ExtractionHints) -> ExtractionResult {
        if text.trim().is_empty() && hints.is_empty() {
            return ExtractionResult::empty(ExtractionMethod::RuleBased);
        }

        if let Some(primary) = &self.primary {
            match self.run_primary(primary.as_ref(), text, hints).await {
                Ok(raw) => {
                    let result = finish(raw, primary.method(), text, hints);
                    info!(
                        method = ?result.method,
                        keywords = result.len(),
                        "Keyword extraction complete"
                    );
                    return result;
                }
                Err(e) => warn!("Delegated keyword extraction failed, using rules: {e}"),
            }
        }

        self.extract_rule_based(text, hints)
    }

    /// The deterministic path alone. Synchronous and infallible.
    pub fn extract_rule_based(&self, text: &str, hints: &ExtractionHints) -> ExtractionResult {
        let raw = self.fallback.categorize(text);
        let result = finish(raw, ExtractionMethod::RuleBased, text, hints);
        debug!(keywords = result.len(), "Rule-based keyword extraction complete");
        result
    }

    async fn run_primary(
        &self,
        primary: &dyn ExtractionStrategy,
        text: &str,
        hints: &ExtractionHints,
    ) -> Result<CategorizedKeywords, ExtractionError> {
        match tokio::time::timeout(self.timeout, primary.extract(text, hints)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionError::Timeout {
                strategy: "delegated",
                timeout_ms: self.timeout.as_millis(),
            }),
        }
    }
}

fn finish(
    mut raw: CategorizedKeywords,
    method: ExtractionMethod,
    text: &str,
    hints: &ExtractionHints,
) -> ExtractionResult {
    raw.merge_hints(hints);
    ExtractionResult::from_categorized(&raw, method, text)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const JOB: &str = "Senior Backend Engineer\n\
        We need strong Python and AWS experience, plus Kubernetes (k8s) in production.\n\
        PMP certification is a plus. Excellent communication required.\n\
        You will own payments reconciliation and improve reconciliation tooling.";

    struct FixedStrategy(CategorizedKeywords);

    #[async_trait]
    impl ExtractionStrategy for FixedStrategy {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::Delegated
        }

        async fn extract(
            &self,
            _text: &str,
            _hints: &ExtractionHints,
        ) -> Result<CategorizedKeywords, ExtractionError> {
            Ok(self.0.clone())
        }
    }

    struct FailingStrategy(AtomicUsize);

    #[async_trait]
    impl ExtractionStrategy for FailingStrategy {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::Delegated
        }

        async fn extract(
            &self,
            _text: &str,
            _hints: &ExtractionHints,
        ) -> Result<CategorizedKeywords, ExtractionError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(ExtractionError::Malformed("missing domain_terms".into()))
        }
    }

    struct HangingStrategy;

    #[async_trait]
    impl ExtractionStrategy for HangingStrategy {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::Delegated
        }

        async fn extract(
            &self,
            _text: &str,
            _hints: &ExtractionHints,
        ) -> Result<CategorizedKeywords, ExtractionError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_empty_text_yields_empty_result() {
        let result = KeywordExtractor::rule_based()
            .extract("   \n", &ExtractionHints::default())
            .await;
        assert!(result.is_empty());
        assert!(result.weighted_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_rule_based_categories() {
        let result = KeywordExtractor::rule_based()
            .extract(JOB, &ExtractionHints::default())
            .await;
        assert_eq!(result.method, ExtractionMethod::RuleBased);
        let texts = |c: KeywordCategory| -> Vec<String> {
            result
                .by_category(c)
                .iter()
                .map(|e| e.text().to_string())
                .collect()
        };
        assert!(texts(KeywordCategory::HardSkill).contains(&"python".to_string()));
        assert!(texts(KeywordCategory::ToolOrTechnology).contains(&"aws".to_string()));
        assert!(texts(KeywordCategory::ToolOrTechnology).contains(&"kubernetes".to_string()));
        assert!(texts(KeywordCategory::Certification).contains(&"pmp".to_string()));
        assert!(texts(KeywordCategory::SoftSkill).contains(&"communication".to_string()));
        assert!(texts(KeywordCategory::DomainTerm).contains(&"reconciliation".to_string()));
        assert_eq!(result.weighted_keywords["python"], 3.0);
        assert_eq!(result.weighted_keywords["pmp"], 2.0);
        assert_eq!(result.frequency("kubernetes"), 2, "k8s counts toward kubernetes");
    }

    #[tokio::test]
    async fn test_hints_are_merged_as_hard_skills() {
        let hints = ExtractionHints {
            required_skills: vec!["Event Sourcing".into()],
            ..Default::default()
        };
        let result = KeywordExtractor::rule_based().extract("", &hints).await;
        assert_eq!(result.hard_skills.len(), 1);
        assert_eq!(result.hard_skills[0].text(), "event sourcing");
    }

    #[tokio::test]
    async fn test_primary_answer_is_used_and_weighted() {
        let raw = CategorizedKeywords {
            tools_technologies: vec!["Snowflake".into()],
            domain_terms: vec!["ledger".into()],
            ..Default::default()
        };
        let extractor =
            KeywordExtractor::with_primary(Arc::new(FixedStrategy(raw)), DEFAULT_TIMEOUT);
        let result = extractor.extract("Snowflake ledger", &Default::default()).await;
        assert_eq!(result.method, ExtractionMethod::Delegated);
        assert_eq!(result.weighted_keywords["snowflake"], 3.0);
        assert_eq!(result.weighted_keywords["ledger"], 1.0);
        assert_eq!(result.frequency("snowflake"), 1);
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back() {
        let failing = Arc::new(FailingStrategy(AtomicUsize::new(0)));
        let extractor = KeywordExtractor::with_primary(failing.clone(), DEFAULT_TIMEOUT);
        let result = extractor.extract(JOB, &Default::default()).await;
        assert_eq!(failing.0.load(Ordering::SeqCst), 1);
        assert_eq!(result.method, ExtractionMethod::RuleBased);
        assert!(result.weighted_keywords.contains_key("python"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_timeout_falls_back() {
        let extractor =
            KeywordExtractor::with_primary(Arc::new(HangingStrategy), Duration::from_millis(50));
        let result = extractor.extract(JOB, &Default::default()).await;
        assert_eq!(result.method, ExtractionMethod::RuleBased);
        assert!(!result.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_matches_rule_based_path() {
        let failing = Arc::new(FailingStrategy(AtomicUsize::new(0)));
        let via_fallback = KeywordExtractor::with_primary(failing, DEFAULT_TIMEOUT)
            .extract(JOB, &Default::default())
            .await;
        let direct = KeywordExtractor::rule_based().extract_rule_based(JOB, &Default::default());
        assert_eq!(via_fallback.all_keywords, direct.all_keywords);
    }

    #[test]
    fn test_validate_shape_rejects_paragraphs() {
        let raw = CategorizedKeywords {
            hard_skills: vec!["line one\nline two".into()],
            ..Default::default()
        };
        assert!(matches!(
            validate_shape(&raw),
            Err(ExtractionError::Malformed(_))
        ));
        assert!(validate_shape(&CategorizedKeywords::default()).is_ok());
    }
}
