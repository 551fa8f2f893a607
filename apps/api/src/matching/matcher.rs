//! Boundary-safe keyword matching with variation expansion and section placement.

use std::collections::BTreeSet;
use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::keywords::models::{ExtractionResult, KeywordCategory};
use crate::keywords::variations::evidence_forms;
use crate::matching::sections::{DocumentSections, Section};
use crate::text::LineIndex;

// ────────────────────────────────────────────────────────────────────────────
// Term patterns
// ────────────────────────────────────────────────────────────────────────────

/// Compiled matcher for one term and its accepted surface forms.
#[derive(Debug, Clone)]
pub struct TermPattern {
    forms: Vec<(String, Regex)>,
}

impl TermPattern {
    /// Pattern for `term` and its variation set, minus ambiguous short
    /// forms other than `term` itself.
    pub fn with_variations(term: &str) -> Result<Self, regex::Error> {
        Self::with_forms(evidence_forms(term))
    }

    /// Pattern for `term` alone.
    pub fn exact(term: &str) -> Result<Self, regex::Error> {
        Self::with_forms(vec![term.trim().to_lowercase()])
    }

    /// Pattern for an explicit list of forms; blank forms are ignored.
    pub fn with_forms(forms: Vec<String>) -> Result<Self, regex::Error> {
        let forms = forms
            .into_iter()
            .filter(|f| !f.trim().is_empty())
            .map(|f| form_regex(&f).map(|re| (f, re)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { forms })
    }

    /// Merged, non-overlapping byte spans matched by any form.
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        let mut raw: Vec<Range<usize>> = self
            .forms
            .iter()
            .flat_map(|(_, re)| boundary_matches(re, text))
            .collect();
        merge_spans(&mut raw)
    }

    pub fn count(&self, text: &str) -> usize {
        self.spans(text).len()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.forms
            .iter()
            .any(|(_, re)| !boundary_matches(re, text).is_empty())
    }

    /// Forms that matched at least once, in variation-set order.
    pub fn matched_forms(&self, text: &str) -> Vec<String> {
        self.forms
            .iter()
            .filter(|(_, re)| !boundary_matches(re, text).is_empty())
            .map(|(form, _)| form.clone())
            .collect()
    }
}

/// Case-insensitive regex for one form. Internal spaces and hyphens match
/// any run of whitespace or hyphens.
fn form_regex(form: &str) -> Result<Regex, regex::Error> {
    let parts: Vec<String> = form
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|p| !p.is_empty())
        .map(regex::escape)
        .collect();
    Regex::new(&format!("(?i){}", parts.join(r"[\s\-]+")))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '+' | '#')
}

/// Accepts a raw match only when it is not glued to neighbouring word
/// characters. A dot counts as glue when it sits between word characters,
/// so "js" does not match inside "node.js".
fn at_boundary(text: &str, start: usize, end: usize) -> bool {
    let mut before = text[..start].chars().rev();
    let before_ok = match before.next() {
        None => true,
        Some('.') => !before.next().is_some_and(is_word_char),
        Some(c) => !is_word_char(c),
    };
    let mut after = text[end..].chars();
    let after_ok = match after.next() {
        None => true,
        Some('.') => !after.next().is_some_and(is_word_char),
        Some(c) => !is_word_char(c),
    };
    before_ok && after_ok
}

/// All boundary-respecting matches of `re`. Overlapping candidates are
/// retried one character later so a rejected match cannot hide a valid one.
fn boundary_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(m) = re.find_at(text, pos) else {
            break;
        };
        if m.start() == m.end() {
            break;
        }
        if at_boundary(text, m.start(), m.end()) {
            out.push(m.start()..m.end());
            pos = m.end();
        } else {
            pos = next_char_boundary(text, m.start());
        }
    }
    out
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map(|c| from + c.len_utf8())
        .unwrap_or(text.len() + 1)
}

fn merge_spans(spans: &mut Vec<Range<usize>>) -> Vec<Range<usize>> {
    spans.sort_by_key(|r| (r.start, std::cmp::Reverse(r.end)));
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        match merged.last_mut() {
            Some(last) if span.start < last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Boundary-safe occurrences of `term` or any of its variations in `text`.
/// A term that cannot be compiled into a pattern counts zero.
pub fn count_occurrences(text: &str, term: &str) -> usize {
    TermPattern::with_variations(term)
        .map(|p| p.count(text))
        .unwrap_or(0)
}

// ────────────────────────────────────────────────────────────────────────────
// Match records
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of locating one job keyword in a resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub keyword: String,
    pub category: KeywordCategory,
    pub weight: f64,
    pub found: bool,
    pub occurrences: usize,
    pub sections_present: BTreeSet<Section>,
    pub matched_forms: Vec<String>,
}

/// Locates every keyword of `job` in `resume`.
///
/// Records come back in the job's category precedence order. A keyword
/// is found if any form in its variation set matches; sections are taken
/// from `sections` for each matched line.
pub fn match_keywords(
    job: &ExtractionResult,
    resume: &str,
    sections: &DocumentSections,
) -> Result<Vec<MatchRecord>, regex::Error> {
    let lines = LineIndex::new(resume);
    job.entries()
        .map(|entry| {
            let pattern = TermPattern::with_variations(entry.text())?;
            let spans = pattern.spans(resume);
            let sections_present = spans
                .iter()
                .filter_map(|span| sections.section_of_line(lines.line_of(span.start)))
                .collect();
            Ok(MatchRecord {
                keyword: entry.text().to_string(),
                category: entry.category(),
                weight: entry.weight(),
                found: !spans.is_empty(),
                occurrences: spans.len(),
                sections_present,
                matched_forms: pattern.matched_forms(resume),
            })
        })
        .collect()
}
