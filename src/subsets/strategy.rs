// Subset strategies — how a wordset is split into segments and conditions.
//
// Each strategy is a pure function of the wordset size. Segments are emitted
// in ascending mask order and each segment's conditions ascend as well.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{full_mask, singleton, validate_size, SubsetDefinition, SubsetId, MAX_WORDSET_SIZE};
use crate::error::{CoherenceError, Result};

/// Segmentation scheme used to pair up word subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubsetStrategy {
    /// Every word against every other single word.
    OneOne,
    /// Every word against every nonempty combination of the other words.
    OneAny,
    /// Every word against all other words together.
    OneAll,
    /// Every word against the whole wordset, itself included.
    OneSet,
    /// Every proper subset against every nonempty subset of its complement.
    AnyAny,
    /// Every word against each word ranked before it. The first word has no
    /// condition and is not a segment.
    OnePreceding,
}

impl SubsetStrategy {
    pub const ALL: [SubsetStrategy; 6] = [
        SubsetStrategy::OneOne,
        SubsetStrategy::OneAny,
        SubsetStrategy::OneAll,
        SubsetStrategy::OneSet,
        SubsetStrategy::AnyAny,
        SubsetStrategy::OnePreceding,
    ];

    /// Identifier used in configuration names.
    pub fn name(&self) -> &'static str {
        match self {
            SubsetStrategy::OneOne => "S_one^one",
            SubsetStrategy::OneAny => "S_one^any",
            SubsetStrategy::OneAll => "S_one^all",
            SubsetStrategy::OneSet => "S_one^set",
            SubsetStrategy::AnyAny => "S_any^any",
            SubsetStrategy::OnePreceding => "S_one^pre",
        }
    }

    /// Largest wordset this strategy accepts.
    ///
    /// OneAny emits n·(2^(n-1) - 1) pairs and AnyAny about 3^n, so both stop
    /// well below the lattice limit.
    pub fn max_wordset_size(&self) -> usize {
        match self {
            SubsetStrategy::AnyAny => 12,
            SubsetStrategy::OneAny => 16,
            _ => MAX_WORDSET_SIZE,
        }
    }

    /// Reject sizes outside `[MIN_WORDSET_SIZE, max_wordset_size()]`.
    pub fn validate_size(&self, wordset_size: usize) -> Result<()> {
        validate_size(wordset_size)?;
        let max = self.max_wordset_size();
        if wordset_size > max {
            return Err(CoherenceError::WordsetTooLarge {
                size: wordset_size,
                max,
            });
        }
        Ok(())
    }

    /// Build the subset definition for an n-word wordset.
    pub fn definition(&self, wordset_size: usize) -> Result<SubsetDefinition> {
        self.validate_size(wordset_size)?;
        let n = wordset_size;
        let full = full_mask(n);

        let (segments, conditions): (Vec<SubsetId>, Vec<Vec<SubsetId>>) = match self {
            SubsetStrategy::OneOne => (0..n)
                .map(|i| {
                    let others = (0..n).filter(|&j| j != i).map(singleton).collect();
                    (singleton(i), others)
                })
                .unzip(),
            SubsetStrategy::OneAny => (0..n)
                .map(|i| (singleton(i), complement_subsets(singleton(i), full)))
                .unzip(),
            SubsetStrategy::OneAll => (0..n)
                .map(|i| (singleton(i), vec![full & !singleton(i)]))
                .unzip(),
            SubsetStrategy::OneSet => (0..n).map(|i| (singleton(i), vec![full])).unzip(),
            SubsetStrategy::AnyAny => (1..full)
                .map(|segment| (segment, complement_subsets(segment, full)))
                .unzip(),
            SubsetStrategy::OnePreceding => (1..n)
                .map(|i| (singleton(i), (0..i).map(singleton).collect()))
                .unzip(),
        };

        SubsetDefinition::new(n, segments, conditions)
    }
}

/// Every nonempty subset of `full` disjoint from `segment`, ascending.
fn complement_subsets(segment: SubsetId, full: SubsetId) -> Vec<SubsetId> {
    let complement = full & !segment;
    (1..=complement)
        .filter(|&candidate| candidate & complement == candidate)
        .collect()
}

impl fmt::Display for SubsetStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubsetStrategy {
    type Err = CoherenceError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        // Accepts "one-one", "OneOne" and "S_one^one" alike.
        let key = key
            .strip_prefix('s')
            .filter(|k| k.starts_with("one") || k.starts_with("any"))
            .unwrap_or(&key);
        match key {
            "oneone" => Ok(SubsetStrategy::OneOne),
            "oneany" => Ok(SubsetStrategy::OneAny),
            "oneall" => Ok(SubsetStrategy::OneAll),
            "oneset" => Ok(SubsetStrategy::OneSet),
            "anyany" => Ok(SubsetStrategy::AnyAny),
            "onepre" | "onepreceding" => Ok(SubsetStrategy::OnePreceding),
            _ => Err(CoherenceError::UnknownStrategy {
                kind: "subset strategy",
                name: s.to_string(),
            }),
        }
    }
}
