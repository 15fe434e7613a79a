// Shared, read-only cache of subset definitions keyed by wordset size.
//
// Built once by the caller for the sizes of a batch and then handed to every
// worker by reference. Nothing mutates it after construction.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::{SubsetDefinition, SubsetStrategy};
use crate::error::{CoherenceError, Result};

#[derive(Debug, Clone)]
pub struct SubsetPlans {
    strategy: SubsetStrategy,
    definitions: BTreeMap<usize, Arc<SubsetDefinition>>,
}

impl SubsetPlans {
    /// Build definitions for every distinct size in `sizes`.
    pub fn build(
        strategy: SubsetStrategy,
        sizes: impl IntoIterator<Item = usize>,
    ) -> Result<Self> {
        let mut definitions = BTreeMap::new();
        for size in sizes {
            if definitions.contains_key(&size) {
                continue;
            }
            let definition = strategy.definition(size)?;
            debug!(
                strategy = strategy.name(),
                size,
                pairs = definition.pair_count(),
                "Built subset definition"
            );
            definitions.insert(size, Arc::new(definition));
        }
        Ok(Self {
            strategy,
            definitions,
        })
    }

    pub fn strategy(&self) -> SubsetStrategy {
        self.strategy
    }

    /// Definition for an n-word wordset.
    ///
    /// Fails when the plans were built without that size.
    pub fn get(&self, wordset_size: usize) -> Result<Arc<SubsetDefinition>> {
        self.definitions
            .get(&wordset_size)
            .cloned()
            .ok_or_else(|| CoherenceError::InvalidInput {
                reason: format!("no subset plan built for wordset size {wordset_size}"),
            })
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.definitions.keys().copied()
    }
}
