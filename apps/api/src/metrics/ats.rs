//! ATS compatibility: keyword density, format simplicity, section structure and readability.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};

use crate::matching::coverage::TargetBand;
use crate::matching::sections::{headers_present, header_kind, HeaderKind};
use crate::metrics::base::{
    round3, MetricCalculator, MetricError, MetricInput, MetricKind, MetricScore,
};
use crate::text::{segments, word_count};

const DENSITY_WEIGHT: f64 = 0.40;
const FORMAT_WEIGHT: f64 = 0.25;
const STRUCTURE_WEIGHT: f64 = 0.20;
const READABILITY_WEIGHT: f64 = 0.15;

/// Word limit for one bullet or sentence.
const LONG_UNIT_WORDS: usize = 30;
const MISSING_HEADER_PENALTY: f64 = 0.25;
const REQUIRED_HEADERS: [(HeaderKind, &str); 4] = [
    (HeaderKind::Experience, "Experience"),
    (HeaderKind::Education, "Education"),
    (HeaderKind::Skills, "Skills"),
    (HeaderKind::Summary, "Summary"),
];

#[rustfmt::skip]
const ACTION_VERBS: &[&str] = &[
    "accelerated", "achieved", "administered", "analyzed", "architected", "automated", "built",
    "championed", "coached", "collaborated", "completed", "configured", "consolidated",
    "coordinated", "created", "cut", "debugged", "decreased", "defined", "delivered", "deployed",
    "designed", "developed", "directed", "drove", "enabled", "engineered", "established",
    "evaluated", "executed", "expanded", "facilitated", "generated", "grew", "guided", "headed",
    "implemented", "improved", "increased", "initiated", "integrated", "introduced", "launched",
    "led", "maintained", "managed", "mentored", "migrated", "modernized", "monitored",
    "negotiated", "optimized", "orchestrated", "organized", "overhauled", "owned", "partnered",
    "pioneered", "planned", "produced", "programmed", "published", "reduced", "refactored",
    "redesigned", "resolved", "restructured", "revamped", "saved", "scaled", "secured", "shipped",
    "simplified", "spearheaded", "streamlined", "strengthened", "supervised", "tested", "trained",
    "transformed", "upgraded", "wrote",
];

static TAB_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\t{2,}").expect("static regex"));
static COLUMN_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S {4,}\S").expect("static regex"));
static BLANK_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n[ \t]*\n").expect("static regex"));
static IMAGE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)!\[[^\]]*\]\(|<img\b|\[(?:image|logo|photo|graphic|chart)\]")
        .expect("static regex")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct AtsCalculator;

impl MetricCalculator for AtsCalculator {
    fn kind(&self) -> MetricKind {
        MetricKind::Ats
    }

    fn calculate(&self, input: &MetricInput<'_>) -> Result<MetricScore, MetricError> {
        let name = self.kind().name();
        let threshold = input.config.check_threshold(self.kind())?;
        let (min_pct, max_pct) = (input.config.density_min_pct, input.config.density_max_pct);
        if !(min_pct > 0.0 && max_pct > min_pct) {
            return Err(MetricError::InvalidConfig(format!(
                "density band must satisfy 0 < min < max, got [{min_pct}, {max_pct}]"
            )));
        }
        let resume = input.resume_text;
        if resume.trim().is_empty() {
            return Ok(MetricScore::empty_input(name, threshold));
        }

        let mut recommendations = Vec::new();
        let density = keyword_density(input, min_pct, max_pct, &mut recommendations);
        let format = format_score(input, &mut recommendations);
        let structure = structure_score(input, &mut recommendations);
        let readability = readability_score(resume, &mut recommendations);

        let score = DENSITY_WEIGHT * density.score
            + FORMAT_WEIGHT * format.score
            + STRUCTURE_WEIGHT * structure.score
            + READABILITY_WEIGHT * readability.score;

        let details = json!({
            "components": {
                "keyword_density": round3(density.score),
                "format": round3(format.score),
                "structure": round3(structure.score),
                "readability": round3(readability.score),
            },
            "keyword_density": density.details,
            "format": format.details,
            "structure": structure.details,
            "readability": readability.details,
        });

        Ok(MetricScore::new(name, score, threshold, details, recommendations))
    }
}

struct Component {
    score: f64,
    details: Value,
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword density
// ────────────────────────────────────────────────────────────────────────────

/// 1.0 inside `[min, max]` percent; linear to 0 at 0% and at `2 * max`.
pub fn density_band_score(pct: f64, min: f64, max: f64) -> f64 {
    if pct < min {
        (pct / min).max(0.0)
    } else if pct <= max {
        1.0
    } else {
        (1.0 - (pct - max) / max).max(0.0)
    }
}

/// Aggregate band score times the mean per-keyword stuffing factor, so one
/// keyword repeated far beyond its target drags the component down even
/// when the overall density looks healthy.
fn keyword_density(
    input: &MetricInput<'_>,
    min_pct: f64,
    max_pct: f64,
    recommendations: &mut Vec<String>,
) -> Component {
    if input.matches.is_empty() {
        return Component {
            score: 1.0,
            details: json!({ "reason": "no job keywords" }),
        };
    }
    let words = word_count(input.resume_text);
    let found: Vec<_> = input.matches.iter().filter(|m| m.found).collect();
    let occurrences: usize = found.iter().map(|m| m.occurrences).sum();
    let pct = if words == 0 {
        0.0
    } else {
        occurrences as f64 / words as f64 * 100.0
    };
    let band = density_band_score(pct, min_pct, max_pct);

    let mut stuffed = Vec::new();
    let mut factor_sum = 0.0;
    for m in &found {
        let target = TargetBand::for_job_frequency(input.job_keywords.frequency(&m.keyword));
        let factor = target.stuffing_factor(m.occurrences);
        if factor < 1.0 {
            stuffed.push(m.keyword.clone());
        }
        factor_sum += factor;
    }
    let stuffing = if found.is_empty() {
        1.0
    } else {
        factor_sum / found.len() as f64
    };

    if pct < min_pct {
        recommendations.push(format!(
            "Work more job keywords into the resume: density is {pct:.1}%, below the {min_pct}% target"
        ));
    } else if pct > max_pct {
        recommendations.push(format!(
            "Reduce keyword repetition: density is {pct:.1}%, above the {max_pct}% ceiling"
        ));
    }
    if !stuffed.is_empty() {
        recommendations.push(format!(
            "Avoid keyword stuffing; use these less often: {}",
            stuffed.join(", ")
        ));
    }

    Component {
        score: band * stuffing,
        details: json!({
            "density_pct": round3(pct),
            "band": [min_pct, max_pct],
            "band_score": round3(band),
            "stuffing_factor": round3(stuffing),
            "stuffed_keywords": stuffed,
            "keyword_occurrences": occurrences,
            "word_count": words,
        }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Format
// ────────────────────────────────────────────────────────────────────────────

fn is_graphic(c: char) -> bool {
    matches!(c as u32,
        0x2500..=0x259F      // box drawing, block elements
        | 0x25A0..=0x25A9    // geometric shapes (squares)
        | 0x25B2..=0x25E5
        | 0x2700..=0x27BF    // dingbats
        | 0x1F300..=0x1FAFF) // pictographs, emoji
}

fn is_special(c: char) -> bool {
    !(c.is_alphanumeric()
        || c.is_whitespace()
        || is_graphic(c)
        || ".,-:;()'\"!?/%$+#&@*|•·▪◦–—’‘“”".contains(c))
}

fn format_score(input: &MetricInput<'_>, recommendations: &mut Vec<String>) -> Component {
    let resume = input.resume_text;
    let layout = &input.hints.layout;

    let tab_runs = TAB_RUN_RE.find_iter(resume).count();
    let pipe_lines = resume
        .lines()
        .filter(|l| l.matches('|').count() >= 2)
        .count();
    let mut table_penalty = (0.05 * (tab_runs + pipe_lines) as f64).min(0.3);
    if layout.has_tables {
        table_penalty = table_penalty.max(0.15);
    }

    let gap_lines = resume
        .lines()
        .filter(|l| COLUMN_GAP_RE.is_match(l.trim()))
        .count();
    let mut column_penalty = if gap_lines >= 3 {
        (0.04 * gap_lines as f64).min(0.2)
    } else {
        0.0
    };
    if layout.column_count.is_some_and(|c| c > 1) {
        column_penalty = column_penalty.max(0.2);
    }

    let graphics = resume.chars().filter(|c| is_graphic(*c)).count()
        + IMAGE_MARKER_RE.find_iter(resume).count();
    let mut graphic_penalty = (0.03 * graphics as f64).min(0.15);
    if layout.has_images {
        graphic_penalty = graphic_penalty.max(0.1);
    }

    let special = resume.chars().filter(|c| is_special(*c)).count();
    let special_penalty = (0.001 * special as f64).min(0.2);
    let non_ascii = resume
        .chars()
        .filter(|c| !c.is_ascii() && !is_graphic(*c))
        .count();
    let non_ascii_penalty = (0.001 * non_ascii as f64).min(0.2);
    let long_lines = resume.lines().filter(|l| l.chars().count() > 100).count();
    let long_line_penalty = (0.01 * long_lines as f64).min(0.15);
    let blank_groups = BLANK_GROUP_RE.find_iter(resume).count();
    let blank_penalty = (0.02 * blank_groups as f64).min(0.15);

    if table_penalty > 0.0 {
        recommendations.push("Replace tables with plain bulleted lists".to_string());
    }
    if column_penalty > 0.0 {
        recommendations.push("Use a single-column layout".to_string());
    }
    if graphic_penalty > 0.0 {
        recommendations
            .push("Remove graphics, icons and images; ATS parsers skip them".to_string());
    }
    if special_penalty + non_ascii_penalty >= 0.05 {
        recommendations.push(
            "Replace decorative symbols and special characters with plain text".to_string(),
        );
    }

    let score = 1.0
        - table_penalty
        - column_penalty
        - graphic_penalty
        - special_penalty
        - non_ascii_penalty
        - long_line_penalty
        - blank_penalty;

    Component {
        score: score.max(0.0),
        details: json!({
            "table_markers": tab_runs + pipe_lines,
            "column_gap_lines": gap_lines,
            "graphic_elements": graphics,
            "special_characters": special,
            "non_ascii_characters": non_ascii,
            "long_lines": long_lines,
            "blank_line_groups": blank_groups,
        }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Structure
// ────────────────────────────────────────────────────────────────────────────

fn structure_score(input: &MetricInput<'_>, recommendations: &mut Vec<String>) -> Component {
    let detected = headers_present(input.resume_text);
    let mut present = Vec::new();
    let mut missing = Vec::new();
    for (kind, label) in REQUIRED_HEADERS {
        let hinted = kind
            .section()
            .is_some_and(|s| input.hints.sections.iter().any(|r| r.section == s));
        if detected.contains(&kind) || hinted {
            present.push(label);
        } else {
            missing.push(label);
        }
    }
    for label in &missing {
        recommendations.push(format!("Add a clearly labeled '{label}' section header"));
    }
    Component {
        score: (1.0 - MISSING_HEADER_PENALTY * missing.len() as f64).max(0.0),
        details: json!({ "present": present, "missing": missing }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Readability
// ────────────────────────────────────────────────────────────────────────────

fn starts_with_action_verb(unit: &str) -> bool {
    unit.split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .is_some_and(|w| ACTION_VERBS.contains(&w.as_str()))
}

/// Half from the share of units within the length limit, half from the
/// share opening with an action verb. Bullets are used when present.
fn readability_score(resume: &str, recommendations: &mut Vec<String>) -> Component {
    let all = segments(resume);
    let bullets: Vec<_> = all.iter().filter(|s| s.is_bullet).collect();
    let units: Vec<&str> = if bullets.is_empty() {
        all.iter()
            .filter(|s| header_kind(&s.text).is_none())
            .map(|s| s.text.as_str())
            .collect()
    } else {
        bullets.iter().map(|s| s.text.as_str()).collect()
    };
    if units.is_empty() {
        return Component {
            score: 0.0,
            details: json!({ "units": 0 }),
        };
    }

    let n = units.len() as f64;
    let long = units
        .iter()
        .filter(|u| word_count(u) > LONG_UNIT_WORDS)
        .count();
    let verbs = units.iter().filter(|u| starts_with_action_verb(u)).count();
    let length_part = 1.0 - long as f64 / n;
    let verb_ratio = verbs as f64 / n;

    if long > 0 {
        recommendations.push(format!(
            "Shorten {long} bullet(s) or sentence(s) longer than {LONG_UNIT_WORDS} words"
        ));
    }
    if verb_ratio < 0.6 {
        recommendations.push("Start more bullets with a strong action verb".to_string());
    }

    Component {
        score: 0.5 * length_part + 0.5 * verb_ratio,
        details: json!({
            "units": units.len(),
            "unit_kind": if bullets.is_empty() { "sentence" } else { "bullet" },
            "long_units": long,
            "action_verb_ratio": round3(verb_ratio),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::models::{CategorizedKeywords, ExtractionMethod, ExtractionResult};
    use crate::matching::matcher::match_keywords;
    use crate::matching::sections::DocumentSections;
    use crate::metrics::base::{MetricsConfig, StructuredHints};

    const CLEAN: &str = "Summary\n\
        Backend engineer focused on Python services.\n\
        Experience\n\
        - Built Python APIs serving payments traffic\n\
        - Reduced p99 latency by 40% with caching\n\
        Education\n\
        BSc Computer Science\n\
        Skills\n\
        - Designed Python and Kafka pipelines";

    fn run(
        job_raw: CategorizedKeywords,
        job_text: &str,
        resume: &str,
        hints: &StructuredHints,
    ) -> MetricScore {
        let job =
            ExtractionResult::from_categorized(&job_raw, ExtractionMethod::RuleBased, job_text);
        let sections = DocumentSections::detect(resume);
        let matches = match_keywords(&job, resume, &sections).unwrap();
        let config = MetricsConfig::default();
        let input = MetricInput {
            job_text,
            resume_text: resume,
            original_resume_text: resume,
            job_keywords: &job,
            matches: &matches,
            sections: &sections,
            hints,
            config: &config,
        };
        AtsCalculator.calculate(&input).unwrap()
    }

    fn python_job() -> CategorizedKeywords {
        CategorizedKeywords {
            hard_skills: vec!["python".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_density_band() {
        assert_eq!(density_band_score(5.0, 2.0, 8.0), 1.0);
        assert_eq!(density_band_score(1.0, 2.0, 8.0), 0.5);
        assert_eq!(density_band_score(0.0, 2.0, 8.0), 0.0);
        assert_eq!(density_band_score(12.0, 2.0, 8.0), 0.5);
        assert_eq!(density_band_score(16.0, 2.0, 8.0), 0.0);
        assert_eq!(density_band_score(30.0, 2.0, 8.0), 0.0);
    }

    #[test]
    fn test_stuffed_keyword_is_penalized() {
        let mut resume = "agile ".repeat(15);
        resume.push_str(&"delivery ".repeat(385));
        let job = CategorizedKeywords {
            hard_skills: vec!["agile".into()],
            ..Default::default()
        };
        let score = run(job, "We work agile", &resume, &StructuredHints::default());
        let density = &score.details()["keyword_density"];
        assert_eq!(density["band_score"], 1.0, "3.75% is inside the band");
        assert!(score.details()["components"]["keyword_density"].as_f64().unwrap() < 1.0);
        assert_eq!(density["stuffed_keywords"][0], "agile");
    }

    #[test]
    fn test_healthy_density_is_full() {
        let resume = format!("{} python python python", "delivery ".repeat(97));
        let score = run(python_job(), "python", &resume, &StructuredHints::default());
        assert_eq!(score.details()["components"]["keyword_density"], 1.0);
    }

    #[test]
    fn test_clean_resume_scores_well() {
        let score = run(python_job(), "python", CLEAN, &StructuredHints::default());
        assert_eq!(score.details()["components"]["structure"], 1.0);
        assert_eq!(score.details()["components"]["format"], 1.0);
        assert_eq!(score.details()["readability"]["unit_kind"], "bullet");
        assert_eq!(score.details()["components"]["readability"], 1.0);
    }

    #[test]
    fn test_missing_headers_subtract() {
        let resume = "Experience\n- Built things in Python\nSkills\n- Python";
        let score = run(python_job(), "python", resume, &StructuredHints::default());
        assert_eq!(score.details()["components"]["structure"], 0.5);
        assert!(score
            .recommendations()
            .iter()
            .any(|r| r.contains("'Education'")));
    }

    #[test]
    fn test_tables_and_layout_hints_penalize_format() {
        let resume = "Skills | Level | Years\nPython | Expert | 5\n";
        let plain = run(python_job(), "python", resume, &StructuredHints::default());
        let mut hints = StructuredHints::default();
        hints.layout.column_count = Some(2);
        let hinted = run(python_job(), "python", resume, &hints);
        let f = |s: &MetricScore| s.details()["components"]["format"].as_f64().unwrap();
        assert!(f(&plain) < 1.0);
        assert!(f(&hinted) < f(&plain));
    }

    #[test]
    fn test_long_bullets_without_verbs_hurt_readability() {
        let long = "word ".repeat(35);
        let resume = format!("- {long}\n- responsible for things");
        let score = run(python_job(), "python", &resume, &StructuredHints::default());
        assert_eq!(score.details()["components"]["readability"], 0.25);
    }

    #[test]
    fn test_empty_resume() {
        let score = run(python_job(), "python", "", &StructuredHints::default());
        assert_eq!(score.score(), 0.0);
        assert_eq!(score.details()["reason"], "empty_input");
    }
}
