// Indirect (vector-based) confirmation.
//
// Every word w_i gets a context vector whose j-th component is a direct
// measure of w_i against w_j, raised to γ. Segments and conditions are
// compared through the cosine of their vectors; a multi-word subset is
// represented by the sum of its words' vectors.

use crate::subsets::{members, singleton, SubsetDefinition, SubsetIdSet};

use super::direct::DirectMeasure;
use crate::prob::SubsetProbabilities;

/// Context vector of one word (or the sum over a subset of words),
/// indexed by word position.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityVector(Vec<f64>);

impl ProbabilityVector {
    /// Vector of the word at `position`: component j is m(w_position, w_j)^γ.
    pub fn for_word(
        probabilities: &SubsetProbabilities,
        position: usize,
        measure: DirectMeasure,
        gamma: f64,
        epsilon: f64,
    ) -> Self {
        let n = probabilities.definition().wordset_size();
        let p = probabilities.table();
        let segment = singleton(position);
        Self(
            (0..n)
                .map(|j| sharpen(measure.confirm(p, segment, singleton(j), epsilon), gamma))
                .collect(),
        )
    }

    /// Elementwise sum of the given vectors.
    pub fn sum<'a>(vectors: impl IntoIterator<Item = &'a ProbabilityVector>, len: usize) -> Self {
        let mut total = vec![0.0; len];
        for vector in vectors {
            for (acc, value) in total.iter_mut().zip(&vector.0) {
                *acc += value;
            }
        }
        Self(total)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Cosine similarity. Two zero vectors are identical (1); a zero vector
    /// against a non-zero one shares nothing (0).
    pub fn cosine(&self, other: &ProbabilityVector) -> f64 {
        let dot: f64 = self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum();
        let norm_a = self.0.iter().map(|a| a * a).sum::<f64>().sqrt();
        let norm_b = other.0.iter().map(|b| b * b).sum::<f64>().sqrt();

        match (norm_a == 0.0, norm_b == 0.0) {
            (true, true) => 1.0,
            (true, false) | (false, true) => 0.0,
            (false, false) => dot / (norm_a * norm_b),
        }
    }
}

/// x^γ, keeping the sign of negative components.
fn sharpen(value: f64, gamma: f64) -> f64 {
    if gamma == 1.0 {
        value
    } else if value < 0.0 {
        -(-value).powf(gamma)
    } else {
        value.powf(gamma)
    }
}

/// Context vectors of every word of the wordset.
pub fn word_vectors(
    probabilities: &SubsetProbabilities,
    measure: DirectMeasure,
    gamma: f64,
    epsilon: f64,
) -> Vec<ProbabilityVector> {
    let n = probabilities.definition().wordset_size();
    (0..n)
        .map(|i| ProbabilityVector::for_word(probabilities, i, measure, gamma, epsilon))
        .collect()
}

/// Cosine of segment and condition vectors for every pair of the definition.
pub fn evaluate(
    probabilities: &SubsetProbabilities,
    measure: DirectMeasure,
    gamma: f64,
    epsilon: f64,
) -> Vec<f64> {
    let definition = probabilities.definition();
    let n = definition.wordset_size();
    let words = word_vectors(probabilities, measure, gamma, epsilon);
    let subset_vector =
        |id| ProbabilityVector::sum(members(id).map(|position| &words[position]), n);

    definition
        .pairs()
        .map(|(segment, condition)| subset_vector(segment).cosine(&subset_vector(condition)))
        .collect()
}

/// Vector measures read every single word and every word pair.
pub fn extend_needed(definition: &SubsetDefinition, needed: &mut SubsetIdSet) {
    let n = definition.wordset_size();
    for i in 0..n {
        needed.set(singleton(i), true);
        for j in (i + 1)..n {
            needed.set(singleton(i) | singleton(j), true);
        }
    }
}
