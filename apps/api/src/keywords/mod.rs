// Keyword extraction: category model, variation table, rule dictionary,
// and the delegated-then-rules extractor.
// The only outbound call in the engine lives behind `extractor::DelegatedStrategy`.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod patterns;
pub mod prompts;
pub mod variations;

pub use extractor::{
    DelegatedStrategy, ExtractionError, ExtractionStrategy, KeywordExtractor, RuleBasedStrategy,
};
pub use models::{
    CategorizedKeywords, ExtractionHints, ExtractionMethod, ExtractionResult, KeywordCategory,
    KeywordEntry,
};
