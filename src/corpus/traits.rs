// Corpus adapter trait — the only seam between scoring and the reference corpus.
//
// Scoring never sees raw text. It asks the adapter which contexts (documents
// or sliding windows) contain a word and how many contexts exist in total.
// Implementations: MemoryIndex (in-process) and SqliteIndex (persisted).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sorted, duplicate-free context identifiers containing one word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextIds(Vec<u64>);

impl ContextIds {
    /// Sort and deduplicate arbitrary identifiers.
    pub fn from_unsorted(mut ids: Vec<u64>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u64> for ContextIds {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

/// What counts as one co-occurrence context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextMode {
    /// Each document is one context.
    Document,
    /// Each window of this many consecutive tokens is one context.
    SlidingWindow(usize),
}

impl ContextMode {
    /// Probability model identifier used in configuration names.
    pub fn model_name(&self) -> String {
        match self {
            ContextMode::Document => "P_bd".to_string(),
            ContextMode::SlidingWindow(size) => format!("P_sw({size})"),
        }
    }
}

impl fmt::Display for ContextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextMode::Document => f.write_str("document"),
            ContextMode::SlidingWindow(size) => write!(f, "sliding window of {size}"),
        }
    }
}

/// Read-only access to a word → context index.
///
/// Must be safe for concurrent reads: the orchestrator queries it from
/// several worker threads at once. A word missing from the corpus yields an
/// empty set, never an error.
pub trait CorpusAdapter: Send + Sync {
    /// Contexts containing `word`.
    fn occurrence_ids(&self, word: &str) -> Result<ContextIds>;

    /// Number of contexts in the corpus, used to normalize counts.
    fn total_contexts(&self) -> u64;

    /// Granularity of the contexts this corpus was indexed with.
    fn context_mode(&self) -> ContextMode;

    fn model_name(&self) -> String {
        self.context_mode().model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_ids_sorted_and_deduplicated() {
        let ids = ContextIds::from_unsorted(vec![5, 1, 5, 3, 1]);
        assert_eq!(ids.as_slice(), &[1, 3, 5]);
        assert!(ids.contains(3));
        assert!(!ids.contains(4));
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_model_names() {
        assert_eq!(ContextMode::Document.model_name(), "P_bd");
        assert_eq!(ContextMode::SlidingWindow(110).model_name(), "P_sw(110)");
    }
}
