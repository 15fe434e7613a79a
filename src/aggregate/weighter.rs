// Weighters — one nonnegative weight per (segment, condition) pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoherenceError;
use crate::prob::SubsetProbabilities;
use crate::subsets::subset_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weighter {
    /// Every pair weighs 1.
    Uniform,
    /// 1 / |C|: comparisons against large conditions count less.
    InverseConditionSize,
}

impl Weighter {
    pub fn name(&self) -> &'static str {
        match self {
            Weighter::Uniform => "w_1",
            Weighter::InverseConditionSize => "w_c",
        }
    }

    /// Weights parallel to the confirmation measure's output.
    pub fn weights(&self, probabilities: &SubsetProbabilities) -> Vec<f64> {
        let pairs = probabilities.definition().pairs();
        match self {
            Weighter::Uniform => pairs.map(|_| 1.0).collect(),
            Weighter::InverseConditionSize => pairs
                .map(|(_, condition)| 1.0 / subset_size(condition) as f64)
                .collect(),
        }
    }
}

impl fmt::Display for Weighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weighter {
    type Err = CoherenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w_1" | "uniform" | "equal" => Ok(Weighter::Uniform),
            "w_c" | "condition-size" | "inverse-condition-size" => {
                Ok(Weighter::InverseConditionSize)
            }
            _ => Err(CoherenceError::UnknownStrategy {
                kind: "weighter",
                name: s.to_string(),
            }),
        }
    }
}
