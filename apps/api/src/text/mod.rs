// Text primitives: stopword table, tokenization, segmentation.
// Everything here is pure and allocation-light; the tables are process-wide statics.

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::is_stopword;
pub use tokenizer::{content_tokens, normalize, segments, word_count, LineIndex, Segment};
