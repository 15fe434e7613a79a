// Aggregation — weighting and summarizing per-pair coherence values.

pub mod summarizer;
pub mod weighter;

pub use summarizer::Summarizer;
pub use weighter::Weighter;
