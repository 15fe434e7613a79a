// Index construction from pre-tokenized documents.
//
// Tokens are taken as-is: no lowercasing, stemming or stop-word removal.
// In sliding-window mode a document of L tokens yields max(1, L - w + 1)
// windows, numbered consecutively across the whole corpus, and a token at
// position p belongs to every window that covers p.

use std::collections::HashMap;
use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::info;

use super::memory::MemoryIndex;
use super::traits::{ContextIds, ContextMode};

pub struct IndexBuilder {
    mode: ContextMode,
    postings: HashMap<String, Vec<u64>>,
    next_context: u64,
    documents: u64,
}

impl IndexBuilder {
    pub fn new(mode: ContextMode) -> Result<Self> {
        if mode == ContextMode::SlidingWindow(0) {
            anyhow::bail!("Sliding window size must be at least 1");
        }
        Ok(Self {
            mode,
            postings: HashMap::new(),
            next_context: 0,
            documents: 0,
        })
    }

    /// Add one document given as a token sequence. Empty documents are skipped.
    pub fn add_document<S: AsRef<str>>(&mut self, tokens: &[S]) {
        if tokens.is_empty() {
            return;
        }
        self.documents += 1;

        match self.mode {
            ContextMode::Document => {
                let context = self.next_context;
                for token in tokens {
                    self.postings
                        .entry(token.as_ref().to_string())
                        .or_default()
                        .push(context);
                }
                self.next_context += 1;
            }
            ContextMode::SlidingWindow(window) => {
                let windows = tokens.len().saturating_sub(window) + 1;
                let base = self.next_context;
                for (position, token) in tokens.iter().enumerate() {
                    let first = position.saturating_sub(window - 1);
                    let last = position.min(windows - 1);
                    let entry = self.postings.entry(token.as_ref().to_string()).or_default();
                    entry.extend((first..=last).map(|w| base + w as u64));
                }
                self.next_context += windows as u64;
            }
        }
    }

    /// Add one whitespace-separated line as a document.
    pub fn add_line(&mut self, line: &str) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        self.add_document(&tokens);
    }

    /// Read a corpus with one document per line.
    pub fn add_reader<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (number, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read corpus line {}", number + 1))?;
            self.add_line(&line);
        }
        Ok(())
    }

    pub fn finish(self) -> MemoryIndex {
        let postings: HashMap<String, ContextIds> = self
            .postings
            .into_iter()
            .map(|(word, ids)| (word, ContextIds::from_unsorted(ids)))
            .collect();

        info!(
            mode = %self.mode,
            documents = self.documents,
            contexts = self.next_context,
            vocabulary = postings.len(),
            "Built corpus index"
        );

        MemoryIndex::from_parts(self.mode, self.next_context, self.documents, postings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::traits::CorpusAdapter;

    #[test]
    fn test_document_mode_one_context_per_line() {
        let mut builder = IndexBuilder::new(ContextMode::Document).unwrap();
        builder.add_line("apple banana apple");
        builder.add_line("");
        builder.add_line("banana cherry");
        let index = builder.finish();

        assert_eq!(index.total_contexts(), 2);
        assert_eq!(index.document_count(), 2);
        assert_eq!(index.occurrence_ids("apple").unwrap().as_slice(), &[0]);
        assert_eq!(index.occurrence_ids("banana").unwrap().as_slice(), &[0, 1]);
    }

    #[test]
    fn test_sliding_window_membership() {
        // 5 tokens, window 3 -> windows [0..3), [1..4), [2..5)
        let mut builder = IndexBuilder::new(ContextMode::SlidingWindow(3)).unwrap();
        builder.add_line("a b c d e");
        let index = builder.finish();

        assert_eq!(index.total_contexts(), 3);
        assert_eq!(index.occurrence_ids("a").unwrap().as_slice(), &[0]);
        assert_eq!(index.occurrence_ids("c").unwrap().as_slice(), &[0, 1, 2]);
        assert_eq!(index.occurrence_ids("e").unwrap().as_slice(), &[2]);
    }

    #[test]
    fn test_short_document_is_single_window() {
        let mut builder = IndexBuilder::new(ContextMode::SlidingWindow(10)).unwrap();
        builder.add_line("x y");
        builder.add_line("y z w");
        let index = builder.finish();

        assert_eq!(index.total_contexts(), 2);
        assert_eq!(index.occurrence_ids("y").unwrap().as_slice(), &[0, 1]);
        assert_eq!(index.model_name(), "P_sw(10)");
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(IndexBuilder::new(ContextMode::SlidingWindow(0)).is_err());
    }

    #[test]
    fn test_add_reader() {
        let mut builder = IndexBuilder::new(ContextMode::Document).unwrap();
        builder
            .add_reader("one two\nthree one\n".as_bytes())
            .unwrap();
        let index = builder.finish();
        assert_eq!(index.occurrence_ids("one").unwrap().as_slice(), &[0, 1]);
    }
}
