// Subset cardinalities via incremental bit-vector composition.
//
// The n occurrence sets are first mapped onto a compact index space: the
// sorted union of their context identifiers. Each word then becomes a bit
// vector of |union| bits. Subset vectors are built in an arena keyed by
// subset id: the vector of (1 << i) + m is word i's vector ANDed with the
// already built vector of m, so every subset costs exactly one AND.
//
// Only the subsets the measures read are materialized, plus the chain of
// smaller subsets they are built from. Arena and result hold those entries
// alone, never the full 2^n lattice.

use std::collections::HashMap;

use bitvec::order::Lsb0;
use bitvec::vec::BitVec;

use super::probabilities::SubsetTable;
use crate::corpus::ContextIds;
use crate::error::{CoherenceError, Result};
use crate::subsets::{full_mask, validate_size, SubsetId, SubsetIdSet};

/// Occurrence bit vector over the compact context index.
type Occurrences = BitVec<u64, Lsb0>;

/// Intersection cardinality for every requested subset.
///
/// The result holds the needed subsets and the composition chains behind
/// them; any other id reads as 0.
pub fn count_subsets(
    occurrences: &[ContextIds],
    needed: &SubsetIdSet,
) -> Result<SubsetTable<u64>> {
    let n = occurrences.len();
    validate_size(n)?;
    let lattice_len = full_mask(n) + 1;
    if needed.len() != lattice_len {
        return Err(CoherenceError::LengthMismatch {
            expected: lattice_len,
            actual: needed.len(),
        });
    }

    let union = context_union(occurrences);
    let words: Vec<Occurrences> = occurrences.iter().map(|ids| to_bits(ids, &union)).collect();
    let materialize = composition_closure(needed, n);

    let mut arena: HashMap<SubsetId, Occurrences> =
        HashMap::with_capacity(materialize.count_ones());
    let mut counts = Vec::with_capacity(materialize.count_ones());
    // Ascending ids: dropping the highest bit always yields a smaller id, so
    // every parent is in the arena before its children.
    for id in materialize.iter_ones().filter(|&id| id != 0) {
        let highest = highest_bit(id);
        let parent = id & !(1 << highest);
        let bits = if parent == 0 {
            words[highest].clone()
        } else {
            let Some(earlier) = arena.get(&parent) else {
                continue;
            };
            intersect(&words[highest], earlier)
        };
        counts.push((id, bits.count_ones() as u64));
        arena.insert(id, bits);
    }

    Ok(SubsetTable::from_entries(counts))
}

fn highest_bit(id: SubsetId) -> usize {
    (usize::BITS - 1 - id.leading_zeros()) as usize
}

/// Sorted union of all context ids; position in it is the compact index.
fn context_union(occurrences: &[ContextIds]) -> Vec<u64> {
    let mut union: Vec<u64> = occurrences.iter().flat_map(ContextIds::iter).collect();
    union.sort_unstable();
    union.dedup();
    union
}

fn to_bits(ids: &ContextIds, union: &[u64]) -> Occurrences {
    let mut bits = BitVec::repeat(false, union.len());
    for id in ids.iter() {
        if let Ok(position) = union.binary_search(&id) {
            bits.set(position, true);
        }
    }
    bits
}

/// Needed subsets plus every subset reached by repeatedly dropping the
/// highest set bit, i.e. everything the composition has to pass through.
fn composition_closure(needed: &SubsetIdSet, n: usize) -> SubsetIdSet {
    let mut closure = needed.clone();
    for id in (1..=full_mask(n)).rev() {
        if !closure[id] {
            continue;
        }
        let parent = id & !(1 << highest_bit(id));
        if parent != 0 {
            closure.set(parent, true);
        }
    }
    closure
}

/// Copy of `own` ANDed word-wise with `earlier`; neither operand changes.
fn intersect(own: &Occurrences, earlier: &Occurrences) -> Occurrences {
    let mut combined = own.clone();
    for (dst, src) in combined
        .as_raw_mut_slice()
        .iter_mut()
        .zip(earlier.as_raw_slice())
    {
        *dst &= *src;
    }
    combined
}
