// Evaluation — agreement between coherence scores and human judgements.

pub mod correlation;

use serde::Serialize;

use crate::error::Result;

pub use correlation::{kendall_tau, pearson};

/// Both coefficients for one scoring run against a set of ratings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Agreement {
    pub samples: usize,
    pub kendall_tau: f64,
    pub pearson: f64,
}

impl Agreement {
    pub fn between(scores: &[f64], ratings: &[f64]) -> Result<Self> {
        Ok(Self {
            samples: scores.len(),
            kendall_tau: kendall_tau(scores, ratings)?,
            pearson: pearson(scores, ratings)?,
        })
    }
}
