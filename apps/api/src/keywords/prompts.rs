// Prompt constants for delegated keyword extraction.

use crate::keywords::models::ExtractionHints;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM_SUFFIX;

/// System prompt for keyword extraction. Fixes the five-array output shape.
pub fn extraction_system() -> String {
    format!(
        "You are an ATS keyword extraction specialist. \
        Extract meaningful, professionally relevant keywords from the text you are given. \
        Exclude common English words, generic verbs (make, do, have), generic adjectives \
        (good, great, strong), generic nouns (company, team, role) and function words. \
        {JSON_ONLY_SYSTEM_SUFFIX}"
    )
}

/// Extraction prompt template. Replace `{hints}` and `{text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract keywords from the document below.

Return a JSON object with this EXACT schema (no extra fields, every field required):
{
  "hard_skills": ["specific technical abilities and domain expertise"],
  "soft_skills": ["leadership, communication, teamwork and similar"],
  "tools_technologies": ["languages, frameworks, software, platforms"],
  "certifications": ["professional certifications, licenses, qualifications"],
  "domain_terms": ["industry-specific terminology"]
}

Use an empty array for a category with no keywords. Do not repeat a keyword across categories.
{hints}
Document:
{text}"#;

pub fn build_extraction_prompt(text: &str, hints: &ExtractionHints) -> String {
    let mut hint_lines = String::new();
    if !hints.required_skills.is_empty() {
        hint_lines.push_str(&format!(
            "\nPre-identified required skills: {}\n",
            hints.required_skills.join(", ")
        ));
    }
    if !hints.preferred_skills.is_empty() {
        hint_lines.push_str(&format!(
            "\nPre-identified preferred skills: {}\n",
            hints.preferred_skills.join(", ")
        ));
    }
    EXTRACTION_PROMPT_TEMPLATE
        .replace("{hints}", &hint_lines)
        .replace("{text}", text)
}
