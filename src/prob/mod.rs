// Probability supply — corpus lookups, subset counting and normalization.

pub mod frequency;
pub mod probabilities;

use std::sync::Arc;

use tracing::debug;

use crate::corpus::{ContextIds, CorpusAdapter};
use crate::error::{CoherenceError, Result};
use crate::subsets::{SubsetDefinition, SubsetIdSet};

pub use probabilities::{CountedSubsets, SubsetProbabilities, SubsetTable};

/// Turns a wordset into subset probabilities using one corpus.
#[derive(Clone)]
pub struct ProbabilitySupplier {
    corpus: Arc<dyn CorpusAdapter>,
}

impl ProbabilitySupplier {
    /// Fails if the corpus has no contexts, since nothing could be normalized.
    pub fn new(corpus: Arc<dyn CorpusAdapter>) -> Result<Self> {
        if corpus.total_contexts() == 0 {
            return Err(CoherenceError::EmptyCorpus);
        }
        Ok(Self { corpus })
    }

    /// Probability model identifier, e.g. `P_bd` or `P_sw(110)`.
    pub fn model_name(&self) -> String {
        self.corpus.model_name()
    }

    pub fn corpus(&self) -> &Arc<dyn CorpusAdapter> {
        &self.corpus
    }

    /// Count every needed subset of `words` in the corpus.
    pub fn counts<S: AsRef<str>>(
        &self,
        words: &[S],
        definition: Arc<SubsetDefinition>,
        needed: &SubsetIdSet,
    ) -> Result<CountedSubsets> {
        if words.len() != definition.wordset_size() {
            return Err(CoherenceError::LengthMismatch {
                expected: definition.wordset_size(),
                actual: words.len(),
            });
        }

        let occurrences: Vec<ContextIds> = words
            .iter()
            .map(|word| self.corpus.occurrence_ids(word.as_ref()))
            .collect::<Result<_>>()?;

        debug!(
            words = words.len(),
            known = occurrences.iter().filter(|ids| !ids.is_empty()).count(),
            "Fetched occurrence sets"
        );

        let counts = frequency::count_subsets(&occurrences, needed)?;
        CountedSubsets::new(definition, counts, self.corpus.total_contexts())
    }

    /// Counts divided by the corpus context total.
    pub fn probabilities<S: AsRef<str>>(
        &self,
        words: &[S],
        definition: Arc<SubsetDefinition>,
        needed: &SubsetIdSet,
    ) -> Result<SubsetProbabilities> {
        Ok(self.counts(words, definition, needed)?.to_probabilities())
    }
}
