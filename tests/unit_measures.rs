// Unit tests for confirmation measures composed with subset strategies and
// aggregation, driven by hand-computed probability tables.
//
// Every table below is indexed by subset id for three words w1, w2, w3
// (id 1 = w1, 2 = w2, 3 = w1w2, 4 = w3, ...). The occurrence matrix each
// table was derived from is given as rows over the corpus contexts.

use std::sync::Arc;

use topic_coherence::aggregate::{Summarizer, Weighter};
use topic_coherence::measures::{ConfirmationMeasure, DirectMeasure, ProbabilityVector};
use topic_coherence::prob::SubsetProbabilities;
use topic_coherence::subsets::SubsetStrategy;

/// w1: 1 1 1 | w2: 0 1 1 | w3: 0 1 1
const NESTED: [f64; 8] = [
    0.0,
    1.0,
    2.0 / 3.0,
    2.0 / 3.0,
    2.0 / 3.0,
    2.0 / 3.0,
    2.0 / 3.0,
    2.0 / 3.0,
];

/// w1: 0 1 1 | w2: 1 0 1 | w3: 1 1 0
const PAIRWISE: [f64; 8] = [
    0.0,
    2.0 / 3.0,
    2.0 / 3.0,
    1.0 / 3.0,
    2.0 / 3.0,
    1.0 / 3.0,
    1.0 / 3.0,
    0.0,
];

/// w1: 0 0 0 1 | w2: 0 1 0 1 | w3: 0 0 1 1
const SPARSE: [f64; 8] = [0.0, 0.25, 0.5, 0.25, 0.5, 0.25, 0.25, 0.25];

fn probabilities(strategy: SubsetStrategy, table: [f64; 8]) -> SubsetProbabilities {
    let definition = Arc::new(strategy.definition(3).unwrap());
    SubsetProbabilities::new(definition, table.to_vec()).unwrap()
}

fn coherence(strategy: SubsetStrategy, measure: ConfirmationMeasure, table: [f64; 8]) -> f64 {
    let p = probabilities(strategy, table);
    let values = measure.evaluate(&p);
    let weights = Weighter::Uniform.weights(&p);
    Summarizer::ArithmeticMean.summarize(&values, &weights).unwrap()
}

fn direct(strategy: SubsetStrategy, measure: DirectMeasure, table: [f64; 8]) -> f64 {
    coherence(strategy, ConfirmationMeasure::direct(measure), table)
}

fn assert_close(got: f64, want: f64) {
    assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
}

// ============================================================
// Conditional probability
// ============================================================

#[test]
fn cond_prob_one_preceding() {
    let m = DirectMeasure::CondProb;
    assert_close(direct(SubsetStrategy::OnePreceding, m, NESTED), 7.0 / 9.0);
    assert_close(direct(SubsetStrategy::OnePreceding, m, PAIRWISE), 1.0 / 2.0);
    assert_close(direct(SubsetStrategy::OnePreceding, m, SPARSE), 5.0 / 6.0);
}

// ============================================================
// Difference
// ============================================================

#[test]
fn difference_one_all() {
    let m = DirectMeasure::Difference;
    assert_close(direct(SubsetStrategy::OneAll, m, NESTED), 2.0 / 9.0);
    assert_close(direct(SubsetStrategy::OneAll, m, PAIRWISE), -2.0 / 3.0);
    assert_close(direct(SubsetStrategy::OneAll, m, SPARSE), 1.75 / 3.0);
}

#[test]
fn difference_one_any_and_any_any() {
    let m = DirectMeasure::Difference;
    assert_close(direct(SubsetStrategy::OneAny, m, SPARSE), 3.25 / 9.0);
    assert_close(direct(SubsetStrategy::AnyAny, m, SPARSE), 4.5 / 12.0);
}

// ============================================================
// Jaccard and Olsson
// ============================================================

#[test]
fn jaccard_one_one() {
    let m = DirectMeasure::Jaccard;
    assert_close(direct(SubsetStrategy::OneOne, m, NESTED), 7.0 / 9.0);
    assert_close(direct(SubsetStrategy::OneOne, m, PAIRWISE), 1.0 / 3.0);
    assert_close(direct(SubsetStrategy::OneOne, m, SPARSE), 4.0 / 9.0);
}

#[test]
fn olsson_one_all() {
    let m = DirectMeasure::Olsson;
    assert_close(direct(SubsetStrategy::OneAll, m, NESTED), 2.0 / 3.0);
    assert_close(direct(SubsetStrategy::OneAll, m, PAIRWISE), 0.0);
    assert_close(direct(SubsetStrategy::OneAll, m, SPARSE), 1.0 / 3.0);
}

#[test]
fn olsson_needs_every_submask_of_the_joint() {
    let def = SubsetStrategy::OneOne.definition(4).unwrap();
    let needed = ConfirmationMeasure::direct(DirectMeasure::Olsson).needed_counts(&def);
    // OneOne on its own never reads more than pairs; Olsson only adds
    // sub-masks of those pairs, i.e. singletons
    for id in 1..16usize {
        assert_eq!(needed[id], id.count_ones() <= 2, "id {id}");
    }
}

// ============================================================
// Log-based measures
// ============================================================

#[test]
fn log_ratio_of_independent_words_is_zero() {
    // P(w1)=P(w2)=0.5, P(w1,w2)=0.25
    let definition = Arc::new(SubsetStrategy::OneOne.definition(2).unwrap());
    let p = SubsetProbabilities::new(definition, vec![0.0, 0.5, 0.5, 0.25]).unwrap();
    let values = ConfirmationMeasure::direct(DirectMeasure::LogRatio).evaluate(&p);
    for v in values {
        assert!(v.abs() < 1e-9, "independent words should score ~0, got {v}");
    }
}

#[test]
fn npmi_is_bounded() {
    for table in [NESTED, PAIRWISE, SPARSE] {
        let p = probabilities(SubsetStrategy::OneAny, table);
        let values = ConfirmationMeasure::direct(DirectMeasure::NormalizedLogRatio).evaluate(&p);
        for v in values {
            assert!((-1.0..=1.0 + 1e-9).contains(&v), "npmi out of range: {v}");
        }
    }
}

#[test]
fn never_co_occurring_words_hit_the_floor() {
    let definition = Arc::new(SubsetStrategy::OneOne.definition(2).unwrap());
    let p = SubsetProbabilities::new(definition, vec![0.0, 0.5, 0.5, 0.0]).unwrap();
    let eps = 1e-12f64;

    let umass = ConfirmationMeasure::direct(DirectMeasure::LogCondProb).evaluate(&p);
    assert_close(umass[0], (eps / 0.5).ln());
    let npmi = ConfirmationMeasure::direct(DirectMeasure::NormalizedLogRatio).evaluate(&p);
    assert!(npmi[0] < -0.99, "disjoint words should be near -1, got {}", npmi[0]);
}

#[test]
fn fitelson_of_nested_words_is_maximal() {
    // w2 only occurs together with w1: P(w2|w1)=1, P(w2|¬w1)=0
    let definition = Arc::new(SubsetStrategy::OneOne.definition(2).unwrap());
    let p = SubsetProbabilities::new(definition, vec![0.0, 0.5, 0.25, 0.25]).unwrap();
    let values = ConfirmationMeasure::direct(DirectMeasure::Fitelson).evaluate(&p);
    // pair order: (w1|w2), (w2|w1)
    assert_close(values[1], 1.0);
}

// ============================================================
// Vector measures
// ============================================================

#[test]
fn cond_prob_vectors_and_cosine() {
    let p = probabilities(SubsetStrategy::OneOne, NESTED);
    let v1 = ProbabilityVector::for_word(&p, 0, DirectMeasure::CondProb, 1.0, 0.0);
    let v2 = ProbabilityVector::for_word(&p, 1, DirectMeasure::CondProb, 1.0, 0.0);
    assert_eq!(v1.as_slice().len(), 3);
    assert_close(v1.cosine(&v2), 8.0 / 66f64.sqrt());
}

#[test]
fn one_set_vector_coherence_in_range() {
    let measure = ConfirmationMeasure::vector(DirectMeasure::NormalizedLogRatio, 1.0);
    for table in [NESTED, PAIRWISE, SPARSE] {
        let c = coherence(SubsetStrategy::OneSet, measure, table);
        assert!((-1.0..=1.0 + 1e-9).contains(&c), "cosine mean out of range: {c}");
    }
}

#[test]
fn weighted_by_condition_size() {
    // OneAny: conditions of size 2 count half
    let p = probabilities(SubsetStrategy::OneAny, SPARSE);
    let values = ConfirmationMeasure::direct(DirectMeasure::Difference).evaluate(&p);
    let weights = Weighter::InverseConditionSize.weights(&p);
    let weighted = Summarizer::ArithmeticMean.summarize(&values, &weights).unwrap();

    let expected: f64 = values.iter().zip(&weights).map(|(v, w)| v * w).sum::<f64>()
        / weights.iter().sum::<f64>();
    assert_close(weighted, expected);
    assert!(weights.iter().any(|&w| w == 0.5));
}
