//! Resume section boundaries, taken from caller-supplied line ranges or
//! detected from header lines.

use serde::{Deserialize, Serialize};

/// The three canonical sections tracked for keyword placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Experience,
    Skills,
}

/// Kinds of header line recognized in a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderKind {
    Summary,
    Experience,
    Skills,
    Education,
    /// Any other conventional header (projects, awards, ...). Closes the running section.
    Other,
}

impl HeaderKind {
    pub fn section(self) -> Option<Section> {
        match self {
            HeaderKind::Summary => Some(Section::Summary),
            HeaderKind::Experience => Some(Section::Experience),
            HeaderKind::Skills => Some(Section::Skills),
            HeaderKind::Education | HeaderKind::Other => None,
        }
    }
}

/// Header synonyms, compared against a cleaned, lower-cased header line.
#[rustfmt::skip]
const HEADER_SYNONYMS: &[(HeaderKind, &[&str])] = &[
    (HeaderKind::Summary, &[
        "summary", "professional summary", "career summary", "executive summary",
        "profile", "professional profile", "objective", "career objective", "about", "about me",
    ]),
    (HeaderKind::Experience, &[
        "experience", "work experience", "professional experience", "relevant experience",
        "employment", "employment history", "work history", "career history",
    ]),
    (HeaderKind::Skills, &[
        "skills", "technical skills", "core skills", "key skills", "skills & tools",
        "skills and tools", "competencies", "core competencies", "technologies",
        "technical expertise", "tools",
    ]),
    (HeaderKind::Education, &[
        "education", "academic background", "education & training", "education and training",
        "academics", "degrees",
    ]),
    (HeaderKind::Other, &[
        "projects", "selected projects", "certifications", "certificates", "awards",
        "publications", "volunteering", "volunteer experience", "interests", "languages",
        "references", "achievements", "honors",
    ]),
];

const MAX_HEADER_CHARS: usize = 40;

/// Classifies `line` as a section header, if it looks like one.
///
/// Accepts markdown heading marks, bold markers and a trailing colon.
pub fn header_kind(line: &str) -> Option<HeaderKind> {
    let cleaned = line
        .trim()
        .trim_start_matches('#')
        .trim_matches('*')
        .trim()
        .trim_end_matches(':')
        .trim()
        .to_lowercase();
    if cleaned.is_empty() || cleaned.chars().count() > MAX_HEADER_CHARS {
        return None;
    }
    HEADER_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&cleaned.as_str()))
        .map(|(kind, _)| *kind)
}

/// Half-open line range `[start_line, end_line)` belonging to one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRange {
    pub section: Section,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSections {
    ranges: Vec<SectionRange>,
}

impl DocumentSections {
    pub fn from_ranges(ranges: Vec<SectionRange>) -> Self {
        Self { ranges }
    }

    /// Uses caller-provided ranges when present, otherwise detects headers.
    pub fn resolve(text: &str, hinted: &[SectionRange]) -> Self {
        if hinted.is_empty() {
            Self::detect(text)
        } else {
            Self::from_ranges(hinted.to_vec())
        }
    }

    /// Walks the text line by line; each recognized header opens a section
    /// that runs until the next header.
    pub fn detect(text: &str) -> Self {
        let mut ranges = Vec::new();
        let mut open: Option<(Section, usize)> = None;
        let mut last_line = 0;

        for (line_no, line) in text.lines().enumerate() {
            last_line = line_no + 1;
            let Some(kind) = header_kind(line) else {
                continue;
            };
            if let Some((section, start)) = open.take() {
                ranges.push(SectionRange {
                    section,
                    start_line: start,
                    end_line: line_no,
                });
            }
            open = kind.section().map(|s| (s, line_no + 1));
        }
        if let Some((section, start)) = open {
            ranges.push(SectionRange {
                section,
                start_line: start,
                end_line: last_line,
            });
        }
        Self { ranges }
    }

    pub fn section_of_line(&self, line: usize) -> Option<Section> {
        self.ranges
            .iter()
            .find(|r| r.start_line <= line && line < r.end_line)
            .map(|r| r.section)
    }

    pub fn contains(&self, section: Section) -> bool {
        self.ranges.iter().any(|r| r.section == section)
    }

    pub fn ranges(&self) -> &[SectionRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Header kinds present in `text`.
pub fn headers_present(text: &str) -> Vec<HeaderKind> {
    let mut found: Vec<HeaderKind> = Vec::new();
    for kind in text.lines().filter_map(header_kind) {
        if !found.contains(&kind) {
            found.push(kind);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe\n\
        ## Summary\n\
        Backend engineer.\n\
        EXPERIENCE:\n\
        - Built APIs in Rust\n\
        - Ran Kafka clusters\n\
        **Education**\n\
        BSc Computer Science\n\
        Skills\n\
        Rust, Kafka";

    #[test]
    fn test_header_kind_variants() {
        assert_eq!(header_kind("## Summary"), Some(HeaderKind::Summary));
        assert_eq!(header_kind("WORK EXPERIENCE:"), Some(HeaderKind::Experience));
        assert_eq!(header_kind("**Technical Skills**"), Some(HeaderKind::Skills));
        assert_eq!(header_kind("Projects"), Some(HeaderKind::Other));
        assert_eq!(header_kind("Experience building distributed systems at scale"), None);
    }

    #[test]
    fn test_detect_sections() {
        let sections = DocumentSections::detect(RESUME);
        assert_eq!(sections.section_of_line(0), None, "name line has no section");
        assert_eq!(sections.section_of_line(2), Some(Section::Summary));
        assert_eq!(sections.section_of_line(4), Some(Section::Experience));
        assert_eq!(sections.section_of_line(5), Some(Section::Experience));
        assert_eq!(sections.section_of_line(7), None, "education closes experience");
        assert_eq!(sections.section_of_line(9), Some(Section::Skills));
    }

    #[test]
    fn test_resolve_prefers_hints() {
        let hinted = vec![SectionRange {
            section: Section::Skills,
            start_line: 0,
            end_line: 1,
        }];
        let sections = DocumentSections::resolve(RESUME, &hinted);
        assert_eq!(sections.section_of_line(0), Some(Section::Skills));
        assert_eq!(sections.section_of_line(4), None);
    }

    #[test]
    fn test_headers_present() {
        let found = headers_present(RESUME);
        assert!(found.contains(&HeaderKind::Summary));
        assert!(found.contains(&HeaderKind::Education));
        assert_eq!(found.len(), 4);
    }
}
