// Named coherence configurations from the topic-coherence literature.
//
// Each preset fixes the segmentation, confirmation measure and aggregation,
// and records the context model it was tuned for. The corpus index decides
// the context model actually used; a mismatch is reported, not corrected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::{Summarizer, Weighter};
use crate::corpus::ContextMode;
use crate::error::CoherenceError;
use crate::measures::{ConfirmationMeasure, DirectMeasure};
use crate::subsets::SubsetStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    CV,
    CP,
    CUci,
    CNpmi,
    CA,
    UMass,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::CV,
        Preset::CP,
        Preset::CUci,
        Preset::CNpmi,
        Preset::CA,
        Preset::UMass,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::CV => "C_V",
            Preset::CP => "C_P",
            Preset::CUci => "C_UCI",
            Preset::CNpmi => "C_NPMI",
            Preset::CA => "C_A",
            Preset::UMass => "UMass",
        }
    }

    /// Context model the preset was designed for.
    pub fn context_mode(&self) -> ContextMode {
        match self {
            Preset::CV => ContextMode::SlidingWindow(110),
            Preset::CP => ContextMode::SlidingWindow(70),
            Preset::CUci | Preset::CNpmi => ContextMode::SlidingWindow(10),
            Preset::CA => ContextMode::SlidingWindow(5),
            Preset::UMass => ContextMode::Document,
        }
    }

    pub fn strategy(&self) -> SubsetStrategy {
        match self {
            Preset::CV => SubsetStrategy::OneSet,
            Preset::CP | Preset::UMass => SubsetStrategy::OnePreceding,
            Preset::CUci | Preset::CNpmi | Preset::CA => SubsetStrategy::OneOne,
        }
    }

    pub fn measure(&self) -> ConfirmationMeasure {
        match self {
            Preset::CV | Preset::CA => {
                ConfirmationMeasure::vector(DirectMeasure::NormalizedLogRatio, 1.0)
            }
            Preset::CP => ConfirmationMeasure::direct(DirectMeasure::Fitelson),
            Preset::CUci => ConfirmationMeasure::direct(DirectMeasure::LogRatio),
            Preset::CNpmi => ConfirmationMeasure::direct(DirectMeasure::NormalizedLogRatio),
            Preset::UMass => ConfirmationMeasure::direct(DirectMeasure::LogCondProb),
        }
    }

    pub fn summarizer(&self) -> Summarizer {
        Summarizer::ArithmeticMean
    }

    pub fn weighter(&self) -> Weighter {
        Weighter::Uniform
    }

    /// Configuration name over its recommended context model.
    pub fn configuration_name(&self, data_source: &str) -> String {
        super::configuration_name(
            data_source,
            &self.context_mode().model_name(),
            self.strategy(),
            &self.measure(),
            self.summarizer(),
            self.weighter(),
        )
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CoherenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "cv" => Ok(Preset::CV),
            "cp" => Ok(Preset::CP),
            "cuci" | "uci" => Ok(Preset::CUci),
            "cnpmi" | "npmi" => Ok(Preset::CNpmi),
            "ca" => Ok(Preset::CA),
            "umass" => Ok(Preset::UMass),
            _ => Err(CoherenceError::UnknownStrategy {
                kind: "preset",
                name: s.to_string(),
            }),
        }
    }
}
