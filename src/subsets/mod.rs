// Word-subset lattice — subset identifiers and per-size subset definitions.
//
// A subset of an n-word wordset is identified by a bitmask: bit i set means
// the word at position i belongs to the subset. Every downstream structure
// (counts, probabilities, measure output) is indexed by these masks.

pub mod plans;
pub mod strategy;

use bitvec::vec::BitVec;

use crate::error::{CoherenceError, Result};

pub use plans::SubsetPlans;
pub use strategy::SubsetStrategy;

/// Bitmask over word positions. Valid values lie in `[1, 2^n - 1]`.
pub type SubsetId = usize;

/// Set of subset identifiers, indexed by the identifier itself.
pub type SubsetIdSet = BitVec;

pub const MIN_WORDSET_SIZE: usize = 2;
pub const MAX_WORDSET_SIZE: usize = 24;

/// Reject wordset sizes the lattice cannot represent.
pub fn validate_size(wordset_size: usize) -> Result<()> {
    if wordset_size < MIN_WORDSET_SIZE {
        return Err(CoherenceError::WordsetTooSmall {
            size: wordset_size,
            min: MIN_WORDSET_SIZE,
        });
    }
    if wordset_size > MAX_WORDSET_SIZE {
        return Err(CoherenceError::WordsetTooLarge {
            size: wordset_size,
            max: MAX_WORDSET_SIZE,
        });
    }
    Ok(())
}

/// The mask containing every word of an n-word wordset.
pub fn full_mask(wordset_size: usize) -> SubsetId {
    (1 << wordset_size) - 1
}

/// The mask containing only the word at `position`.
pub fn singleton(position: usize) -> SubsetId {
    1 << position
}

/// Number of words in the subset.
pub fn subset_size(id: SubsetId) -> usize {
    id.count_ones() as usize
}

/// Word positions contained in the subset, ascending.
pub fn members(id: SubsetId) -> impl Iterator<Item = usize> {
    (0..usize::BITS as usize).filter(move |&bit| id & (1 << bit) != 0)
}

/// Nonempty sub-masks of `id` (including `id` itself), descending.
pub fn submasks(id: SubsetId) -> impl Iterator<Item = SubsetId> {
    let mut next = id;
    std::iter::from_fn(move || {
        if next == 0 {
            return None;
        }
        let current = next;
        next = (next - 1) & id;
        Some(current)
    })
}

/// Segments and their conditions for one wordset size.
///
/// Depends only on the size and the strategy that built it, never on the
/// actual words, so one instance is shared by every wordset of that size.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsetDefinition {
    wordset_size: usize,
    segments: Vec<SubsetId>,
    conditions: Vec<Vec<SubsetId>>,
    needed: SubsetIdSet,
}

impl SubsetDefinition {
    /// Build a definition and derive its needed-counts set.
    ///
    /// The needed set holds every segment, every condition and the joint mask
    /// `segment | condition` of every pair.
    pub fn new(
        wordset_size: usize,
        segments: Vec<SubsetId>,
        conditions: Vec<Vec<SubsetId>>,
    ) -> Result<Self> {
        validate_size(wordset_size)?;
        if segments.len() != conditions.len() {
            return Err(CoherenceError::LengthMismatch {
                expected: segments.len(),
                actual: conditions.len(),
            });
        }

        let full = full_mask(wordset_size);
        let mut needed = BitVec::repeat(false, full + 1);
        for (&segment, segment_conditions) in segments.iter().zip(&conditions) {
            check_id(segment, full)?;
            needed.set(segment, true);
            for &condition in segment_conditions {
                check_id(condition, full)?;
                needed.set(condition, true);
                needed.set(segment | condition, true);
            }
        }

        Ok(Self {
            wordset_size,
            segments,
            conditions,
            needed,
        })
    }

    pub fn wordset_size(&self) -> usize {
        self.wordset_size
    }

    pub fn segments(&self) -> &[SubsetId] {
        &self.segments
    }

    pub fn conditions(&self) -> &[Vec<SubsetId>] {
        &self.conditions
    }

    /// Subset identifiers whose counts the measures will read.
    pub fn needed_counts(&self) -> &SubsetIdSet {
        &self.needed
    }

    /// Total number of (segment, condition) pairs.
    pub fn pair_count(&self) -> usize {
        self.conditions.iter().map(Vec::len).sum()
    }

    /// Every (segment, condition) pair in definition order.
    pub fn pairs(&self) -> impl Iterator<Item = (SubsetId, SubsetId)> + '_ {
        self.segments
            .iter()
            .zip(&self.conditions)
            .flat_map(|(&segment, conds)| conds.iter().map(move |&c| (segment, c)))
    }
}

fn check_id(id: SubsetId, full: SubsetId) -> Result<()> {
    if id == 0 || id > full {
        return Err(CoherenceError::InvalidInput {
            reason: format!("subset id {id} outside [1, {full}]"),
        });
    }
    Ok(())
}
