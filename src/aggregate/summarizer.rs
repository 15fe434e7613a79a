// Summarizers — reduce (value, weight) pairs to one coherence score.
//
// When all weights are zero the weighted variants fall back to treating
// every value equally instead of dividing by zero.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoherenceError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Summarizer {
    /// Σ(value·weight) / Σweight
    ArithmeticMean,
    /// Weighted median.
    Median,
    /// Smallest value; weights are ignored.
    Min,
    /// Largest value; weights are ignored.
    Max,
}

impl Summarizer {
    pub fn name(&self) -> &'static str {
        match self {
            Summarizer::ArithmeticMean => "σ_a",
            Summarizer::Median => "σ_m",
            Summarizer::Min => "σ_min",
            Summarizer::Max => "σ_max",
        }
    }

    /// Summarize values with their weights. An empty input scores 0.
    pub fn summarize(&self, values: &[f64], weights: &[f64]) -> Result<f64> {
        if values.len() != weights.len() {
            return Err(CoherenceError::LengthMismatch {
                expected: values.len(),
                actual: weights.len(),
            });
        }
        if values.is_empty() {
            return Ok(0.0);
        }
        if let Some(bad) = weights.iter().find(|w| !(**w >= 0.0)) {
            return Err(CoherenceError::InvalidInput {
                reason: format!("weights must be nonnegative, got {bad}"),
            });
        }

        let weight_sum: f64 = weights.iter().sum();
        let uniform;
        let weights = if weight_sum > 0.0 {
            weights
        } else {
            uniform = vec![1.0; values.len()];
            &uniform[..]
        };

        Ok(match self {
            Summarizer::ArithmeticMean => weighted_mean(values, weights),
            Summarizer::Median => weighted_median(values, weights),
            Summarizer::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Summarizer::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    let weighted: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    weighted / total
}

/// Smallest value whose cumulative weight reaches half the total.
fn weighted_median(values: &[f64], weights: &[f64]) -> f64 {
    let mut pairs: Vec<(f64, f64)> = values.iter().copied().zip(weights.iter().copied()).collect();
    pairs.sort_by(|a, b| match a.0.total_cmp(&b.0) {
        Ordering::Equal => a.1.total_cmp(&b.1),
        other => other,
    });

    let total: f64 = pairs.iter().map(|(_, w)| w).sum();
    // Tolerate rounding in the running sum.
    let half = total / 2.0 - total * 1e-12;
    let mut cumulative = 0.0;
    for &(value, weight) in &pairs {
        cumulative += weight;
        if cumulative >= half {
            return value;
        }
    }
    pairs.last().map_or(0.0, |(v, _)| *v)
}

impl fmt::Display for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Summarizer {
    type Err = CoherenceError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "σ_a" | "mean" | "arithmetic-mean" | "avg" => Ok(Summarizer::ArithmeticMean),
            "σ_m" | "median" => Ok(Summarizer::Median),
            "σ_min" | "min" => Ok(Summarizer::Min),
            "σ_max" | "max" => Ok(Summarizer::Max),
            _ => Err(CoherenceError::UnknownStrategy {
                kind: "summarizer",
                name: s.to_string(),
            }),
        }
    }
}
