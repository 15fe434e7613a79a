// Coherence orchestrator — composes subset plans, probabilities, a
// confirmation measure and aggregation into one score per wordset.
//
// Wordsets are independent: subset plans are built once per batch and shared
// read-only, everything else lives inside one wordset's computation. That
// makes the batch embarrassingly parallel, so it is scored with rayon.

pub mod presets;

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregate::{Summarizer, Weighter};
use crate::corpus::CorpusAdapter;
use crate::error::{CoherenceError, Result};
use crate::measures::ConfirmationMeasure;
use crate::prob::{ProbabilitySupplier, SubsetProbabilities};
use crate::subsets::{SubsetDefinition, SubsetPlans, SubsetStrategy};

pub use presets::Preset;

/// A fully configured coherence calculation.
#[derive(Clone)]
pub struct Coherence {
    strategy: SubsetStrategy,
    supplier: ProbabilitySupplier,
    measure: ConfirmationMeasure,
    summarizer: Summarizer,
    weighter: Weighter,
    data_source: String,
}

impl Coherence {
    pub fn new(
        corpus: Arc<dyn CorpusAdapter>,
        strategy: SubsetStrategy,
        measure: ConfirmationMeasure,
        summarizer: Summarizer,
        weighter: Weighter,
    ) -> Result<Self> {
        Ok(Self {
            strategy,
            supplier: ProbabilitySupplier::new(corpus)?,
            measure,
            summarizer,
            weighter,
            data_source: "corpus".to_string(),
        })
    }

    /// Configuration of a named preset over the given corpus.
    pub fn from_preset(preset: Preset, corpus: Arc<dyn CorpusAdapter>) -> Result<Self> {
        Self::new(
            corpus,
            preset.strategy(),
            preset.measure(),
            preset.summarizer(),
            preset.weighter(),
        )
    }

    /// Label of the reference corpus, used in the configuration name.
    pub fn with_data_source(mut self, data_source: impl Into<String>) -> Self {
        self.data_source = data_source.into();
        self
    }

    pub fn strategy(&self) -> SubsetStrategy {
        self.strategy
    }

    pub fn measure(&self) -> ConfirmationMeasure {
        self.measure
    }

    /// Deterministic label of every composed choice, e.g.
    /// `C(D_wiki,P_sw(110),S_one^set,m_cos(V_nlr(1)),σ_a,w_1)`.
    pub fn configuration_name(&self) -> String {
        configuration_name(
            &self.data_source,
            &self.supplier.model_name(),
            self.strategy,
            &self.measure,
            self.summarizer,
            self.weighter,
        )
    }

    /// One coherence value per wordset, in input order.
    pub fn score<S: AsRef<str> + Sync>(&self, wordsets: &[Vec<S>]) -> Result<Vec<f64>> {
        self.score_with_progress(wordsets, || {})
    }

    /// Like `score`, calling `on_scored` once per finished wordset.
    ///
    /// Every wordset is validated before the corpus is touched.
    pub fn score_with_progress<S, F>(&self, wordsets: &[Vec<S>], on_scored: F) -> Result<Vec<f64>>
    where
        S: AsRef<str> + Sync,
        F: Fn() + Sync,
    {
        for words in wordsets {
            validate_wordset(self.strategy, words)?;
        }
        let plans = SubsetPlans::build(self.strategy, wordsets.iter().map(Vec::len))?;

        info!(
            wordsets = wordsets.len(),
            configuration = %self.configuration_name(),
            "Scoring wordsets"
        );

        wordsets
            .par_iter()
            .map(|words| {
                let score = self.score_wordset(&plans, words);
                on_scored();
                score
            })
            .collect()
    }

    /// Score one wordset against plans that include its size.
    pub fn score_wordset<S: AsRef<str>>(&self, plans: &SubsetPlans, words: &[S]) -> Result<f64> {
        validate_wordset(self.strategy, words)?;
        let definition = plans.get(words.len())?;
        let probabilities = self.probabilities(words, definition)?;

        let values = self.measure.evaluate(&probabilities);
        let weights = self.weighter.weights(&probabilities);
        let score = self.summarizer.summarize(&values, &weights)?;

        debug!(words = words.len(), pairs = values.len(), score, "Scored wordset");
        Ok(score)
    }

    /// Subset probabilities of a wordset, covering everything the configured
    /// measure reads.
    pub fn probabilities<S: AsRef<str>>(
        &self,
        words: &[S],
        definition: Arc<SubsetDefinition>,
    ) -> Result<SubsetProbabilities> {
        let needed = self.measure.needed_counts(&definition);
        self.supplier.probabilities(words, definition, &needed)
    }
}

/// `C(D_<source>,<model>,<subsets>,<measure>,<summarizer>,<weighter>)`
pub fn configuration_name(
    data_source: &str,
    model_name: &str,
    strategy: SubsetStrategy,
    measure: &ConfirmationMeasure,
    summarizer: Summarizer,
    weighter: Weighter,
) -> String {
    format!(
        "C(D_{data_source},{model_name},{},{},{},{})",
        strategy.name(),
        measure.name(),
        summarizer.name(),
        weighter.name(),
    )
}

fn validate_wordset<S: AsRef<str>>(strategy: SubsetStrategy, words: &[S]) -> Result<()> {
    strategy.validate_size(words.len())?;
    if words.iter().any(|w| w.as_ref().trim().is_empty()) {
        return Err(CoherenceError::InvalidInput {
            reason: "wordset contains an empty word".to_string(),
        });
    }
    Ok(())
}
