// Confirmation measures — one coherence value per (segment, condition) pair.

pub mod direct;
pub mod vector;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoherenceError;
use crate::prob::SubsetProbabilities;
use crate::subsets::{SubsetDefinition, SubsetIdSet};

pub use direct::DirectMeasure;
pub use vector::ProbabilityVector;

/// Smoothing constant added inside logarithms.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// A direct formula, or the cosine of context vectors built from one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConfirmationMeasure {
    Direct {
        measure: DirectMeasure,
        epsilon: f64,
    },
    Vector {
        measure: DirectMeasure,
        gamma: f64,
        epsilon: f64,
    },
}

impl ConfirmationMeasure {
    pub fn direct(measure: DirectMeasure) -> Self {
        ConfirmationMeasure::Direct {
            measure,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn vector(measure: DirectMeasure, gamma: f64) -> Self {
        ConfirmationMeasure::Vector {
            measure,
            gamma,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn with_epsilon(self, epsilon: f64) -> Self {
        match self {
            ConfirmationMeasure::Direct { measure, .. } => {
                ConfirmationMeasure::Direct { measure, epsilon }
            }
            ConfirmationMeasure::Vector { measure, gamma, .. } => ConfirmationMeasure::Vector {
                measure,
                gamma,
                epsilon,
            },
        }
    }

    /// Identifier used in configuration names, e.g. `m_lr` or `m_cos(V_nlr(1))`.
    pub fn name(&self) -> String {
        match self {
            ConfirmationMeasure::Direct { measure, .. } => measure.name(),
            ConfirmationMeasure::Vector { measure, gamma, .. } => {
                format!("m_cos(V_{}({}))", measure.short_name(), format_gamma(*gamma))
            }
        }
    }

    /// The definition's needed set plus whatever this measure also reads.
    pub fn needed_counts(&self, definition: &SubsetDefinition) -> SubsetIdSet {
        let mut needed = definition.needed_counts().clone();
        match self {
            ConfirmationMeasure::Direct { measure, .. } => {
                measure.extend_needed(definition, &mut needed)
            }
            ConfirmationMeasure::Vector { measure, .. } => {
                vector::extend_needed(definition, &mut needed);
                measure.extend_needed(definition, &mut needed);
            }
        }
        needed
    }

    /// Coherence values in the definition's pair order.
    pub fn evaluate(&self, probabilities: &SubsetProbabilities) -> Vec<f64> {
        match *self {
            ConfirmationMeasure::Direct { measure, epsilon } => {
                let p = probabilities.table();
                probabilities
                    .definition()
                    .pairs()
                    .map(|(segment, condition)| measure.confirm(p, segment, condition, epsilon))
                    .collect()
            }
            ConfirmationMeasure::Vector {
                measure,
                gamma,
                epsilon,
            } => vector::evaluate(probabilities, measure, gamma, epsilon),
        }
    }
}

fn format_gamma(gamma: f64) -> String {
    if gamma.fract() == 0.0 && gamma.abs() < 1e9 {
        format!("{}", gamma as i64)
    } else {
        format!("{gamma}")
    }
}

impl FromStr for ConfirmationMeasure {
    type Err = CoherenceError;

    /// Accepts direct names (`m_lr`, `npmi`) and vector names of the form
    /// `m_cos(V_<measure>(<gamma>))` or `cos:<measure>:<gamma>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unknown = || CoherenceError::UnknownStrategy {
            kind: "confirmation measure",
            name: s.to_string(),
        };

        let vector_parts = if let Some(rest) = trimmed
            .strip_prefix("m_cos(V_")
            .and_then(|r| r.strip_suffix("))"))
        {
            let (measure, gamma) = rest.split_once('(').ok_or_else(unknown)?;
            Some((measure, gamma))
        } else if let Some(rest) = trimmed.strip_prefix("cos:") {
            Some(rest.split_once(':').unwrap_or((rest, "1")))
        } else {
            None
        };

        match vector_parts {
            Some((measure, gamma)) => {
                let measure: DirectMeasure = measure.parse()?;
                let gamma: f64 = gamma.trim().parse().map_err(|_| unknown())?;
                if !gamma.is_finite() || gamma <= 0.0 {
                    return Err(CoherenceError::InvalidInput {
                        reason: format!("gamma must be positive, got {gamma}"),
                    });
                }
                Ok(ConfirmationMeasure::vector(measure, gamma))
            }
            None => Ok(ConfirmationMeasure::direct(trimmed.parse()?)),
        }
    }
}
