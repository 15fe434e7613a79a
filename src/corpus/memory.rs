// In-memory word → contexts index.

use std::collections::HashMap;

use super::traits::{ContextIds, ContextMode, CorpusAdapter};
use crate::error::Result;

/// Corpus index held entirely in memory. Built by `IndexBuilder` or loaded
/// from a persisted index.
#[derive(Debug, Clone)]
pub struct MemoryIndex {
    mode: ContextMode,
    total_contexts: u64,
    document_count: u64,
    postings: HashMap<String, ContextIds>,
}

impl MemoryIndex {
    pub fn from_parts(
        mode: ContextMode,
        total_contexts: u64,
        document_count: u64,
        postings: HashMap<String, ContextIds>,
    ) -> Self {
        Self {
            mode,
            total_contexts,
            document_count,
            postings,
        }
    }

    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    /// Words and their contexts, sorted by word for stable persistence.
    pub fn sorted_postings(&self) -> Vec<(&str, &ContextIds)> {
        let mut entries: Vec<_> = self
            .postings
            .iter()
            .map(|(word, ids)| (word.as_str(), ids))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl CorpusAdapter for MemoryIndex {
    fn occurrence_ids(&self, word: &str) -> Result<ContextIds> {
        Ok(self.postings.get(word).cloned().unwrap_or_default())
    }

    fn total_contexts(&self) -> u64 {
        self.total_contexts
    }

    fn context_mode(&self) -> ContextMode {
        self.mode
    }
}
