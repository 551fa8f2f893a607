//! Tokenization and segmentation primitives shared by extraction, matching and scoring.

use std::sync::LazyLock;

use regex::Regex;

use crate::text::stopwords::is_stopword;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("static regex"));

/// Bullet markers: dashes, asterisks, unicode bullets, or "1." / "1)" numbering.
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•·▪◦‣–—]|\d{1,2}[.)])\s+(.+)$").expect("static regex")
});

/// Sentence terminator followed by whitespace; decimals like "2.5" are left alone.
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("static regex"));

/// One sentence or bullet, already stripped of its marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    /// Zero-based line the segment starts on.
    pub line: usize,
    pub is_bullet: bool,
}

/// Iterates the word tokens of `text` (unicode `\w+` runs).
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(text).map(|m| m.as_str())
}

pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

pub fn line_count(text: &str) -> usize {
    text.lines().count()
}

/// Lower-cases, replaces punctuation with spaces and collapses whitespace.
///
/// `%`, `$`, `+`, `#` and in-word `.` survive so "c++", "c#", "node.js" and
/// "40%" keep their identity.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let mut out = String::with_capacity(lowered.len());
    for (i, &c) in chars.iter().enumerate() {
        let keep = c.is_alphanumeric()
            || matches!(c, '%' | '$' | '+' | '#')
            || (c == '.'
                && i > 0
                && chars[i - 1].is_alphanumeric()
                && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric()));
        out.push(if keep { c } else { ' ' });
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lower-cased non-stopword tokens of at least two characters.
pub fn content_tokens(text: &str) -> Vec<String> {
    words(text)
        .filter(|w| w.chars().count() >= 2 && !is_stopword(w))
        .map(|w| w.to_lowercase())
        .collect()
}

/// Returns the bullet body when `line` starts with a bullet marker.
pub fn strip_bullet(line: &str) -> Option<&str> {
    BULLET_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

/// Splits text into bullets and sentences.
///
/// Each bullet line is one segment. Other lines are split on sentence
/// terminators; blank lines are skipped.
pub fn segments(text: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(body) = strip_bullet(line) {
            out.push(Segment {
                text: body.trim_end_matches(['.', ';']).to_string(),
                line: line_no,
                is_bullet: true,
            });
            continue;
        }
        let mut last = 0;
        for m in SENTENCE_END_RE.find_iter(line) {
            push_sentence(&mut out, &line[last..m.start()], line_no);
            last = m.end();
        }
        push_sentence(&mut out, &line[last..], line_no);
    }
    out
}

fn push_sentence(out: &mut Vec<Segment>, raw: &str, line: usize) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        out.push(Segment {
            text: trimmed.to_string(),
            line,
            is_bullet: false,
        });
    }
}

/// Maps byte offsets to zero-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        }
    }
}
