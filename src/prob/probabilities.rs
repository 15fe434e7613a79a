// Counted subsets and their probabilities, both keyed by subset id.
//
// Only the subsets a measure reads are ever counted, so values live in a
// sparse table sorted by id instead of a dense 2^n array.

use std::ops::Index;
use std::sync::Arc;

use crate::error::{CoherenceError, Result};
use crate::subsets::{full_mask, SubsetDefinition, SubsetId};

/// Values keyed by subset id. Ids never stored read as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetTable<T> {
    entries: Vec<(SubsetId, T)>,
    zero: T,
}

impl<T: Copy + Default> SubsetTable<T> {
    /// From (id, value) pairs in any order; a repeated id keeps its first value.
    pub fn from_entries(entries: impl IntoIterator<Item = (SubsetId, T)>) -> Self {
        let mut entries: Vec<(SubsetId, T)> = entries.into_iter().collect();
        entries.sort_by_key(|&(id, _)| id);
        entries.dedup_by_key(|&mut (id, _)| id);
        Self {
            entries,
            zero: T::default(),
        }
    }

    /// From a dense table indexed by subset id; index 0 is ignored.
    pub fn from_dense(values: &[T]) -> Self {
        Self::from_entries(values.iter().copied().enumerate().skip(1))
    }

    pub fn get(&self, id: SubsetId) -> T {
        self[id]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored (id, value) pairs, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (SubsetId, T)> + '_ {
        self.entries.iter().copied()
    }

    pub fn max_id(&self) -> Option<SubsetId> {
        self.entries.last().map(|&(id, _)| id)
    }

    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> SubsetTable<U> {
        SubsetTable {
            entries: self.entries.iter().map(|&(id, v)| (id, f(v))).collect(),
            zero: U::default(),
        }
    }
}

impl<T> Index<SubsetId> for SubsetTable<T> {
    type Output = T;

    fn index(&self, id: SubsetId) -> &T {
        match self.entries.binary_search_by_key(&id, |&(key, _)| key) {
            Ok(position) => &self.entries[position].1,
            Err(_) => &self.zero,
        }
    }
}

/// Intersection counts for one wordset, paired with the definition they
/// were counted for.
#[derive(Debug, Clone)]
pub struct CountedSubsets {
    definition: Arc<SubsetDefinition>,
    counts: SubsetTable<u64>,
    total_contexts: u64,
}

impl CountedSubsets {
    pub fn new(
        definition: Arc<SubsetDefinition>,
        counts: SubsetTable<u64>,
        total_contexts: u64,
    ) -> Result<Self> {
        check_ids(&definition, counts.max_id())?;
        if total_contexts == 0 {
            return Err(CoherenceError::EmptyCorpus);
        }
        Ok(Self {
            definition,
            counts,
            total_contexts,
        })
    }

    pub fn definition(&self) -> &Arc<SubsetDefinition> {
        &self.definition
    }

    pub fn count(&self, id: SubsetId) -> u64 {
        self.counts[id]
    }

    pub fn total_contexts(&self) -> u64 {
        self.total_contexts
    }

    /// Divide every count by the number of contexts.
    pub fn to_probabilities(&self) -> SubsetProbabilities {
        let total = self.total_contexts as f64;
        SubsetProbabilities {
            definition: Arc::clone(&self.definition),
            probabilities: self.counts.map(|c| c as f64 / total),
        }
    }
}

/// Probability of every subset's words co-occurring in one context.
#[derive(Debug, Clone)]
pub struct SubsetProbabilities {
    definition: Arc<SubsetDefinition>,
    probabilities: SubsetTable<f64>,
}

impl SubsetProbabilities {
    /// Wrap a dense table of length 2^n; index 0 (the empty subset) is ignored.
    pub fn new(definition: Arc<SubsetDefinition>, probabilities: Vec<f64>) -> Result<Self> {
        let expected = full_mask(definition.wordset_size()) + 1;
        if probabilities.len() != expected {
            return Err(CoherenceError::LengthMismatch {
                expected,
                actual: probabilities.len(),
            });
        }
        Ok(Self {
            definition,
            probabilities: SubsetTable::from_dense(&probabilities),
        })
    }

    pub fn definition(&self) -> &SubsetDefinition {
        &self.definition
    }

    pub fn get(&self, id: SubsetId) -> f64 {
        self.probabilities[id]
    }

    pub fn table(&self) -> &SubsetTable<f64> {
        &self.probabilities
    }
}

fn check_ids(definition: &SubsetDefinition, max_id: Option<SubsetId>) -> Result<()> {
    let full = full_mask(definition.wordset_size());
    match max_id {
        Some(id) if id > full => Err(CoherenceError::InvalidInput {
            reason: format!("subset id {id} outside [1, {full}]"),
        }),
        _ => Ok(()),
    }
}
