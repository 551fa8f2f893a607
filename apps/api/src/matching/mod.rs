pub mod coverage;
pub mod matcher;
pub mod sections;

pub use coverage::{analyze_usage, summarize, CoverageSummary, KeywordUsage, UsageStatus};
pub use matcher::{count_occurrences, match_keywords, MatchRecord, TermPattern};
pub use sections::{DocumentSections, HeaderKind, Section, SectionRange};
