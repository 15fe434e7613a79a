// Unit tests for subset strategies and subset plans.
//
// Segment/condition lists are checked against hand-derived expectations.
// Condition order within a segment carries no meaning, so lists are compared
// as sorted sets.

use std::sync::Arc;

use topic_coherence::subsets::{
    full_mask, members, submasks, subset_size, SubsetDefinition, SubsetPlans, SubsetStrategy,
    MAX_WORDSET_SIZE,
};
use topic_coherence::CoherenceError;

fn sorted(mut ids: Vec<usize>) -> Vec<usize> {
    ids.sort_unstable();
    ids
}

fn assert_definition(def: &SubsetDefinition, segments: &[usize], conditions: &[&[usize]]) {
    assert_eq!(def.segments(), segments, "segments differ");
    assert_eq!(def.conditions().len(), conditions.len());
    for (i, (got, want)) in def.conditions().iter().zip(conditions).enumerate() {
        assert_eq!(
            sorted(got.clone()),
            sorted(want.to_vec()),
            "conditions of segment #{i} ({}) differ",
            segments[i]
        );
    }
}

// ============================================================
// AnyAny
// ============================================================

#[test]
fn any_any_four_words() {
    let def = SubsetStrategy::AnyAny.definition(4).unwrap();
    assert_definition(
        &def,
        &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14],
        &[
            &[2, 4, 8, 6, 10, 12, 14],
            &[1, 4, 8, 5, 9, 12, 13],
            &[4, 8, 12],
            &[1, 2, 3, 8, 9, 10, 11],
            &[2, 8, 10],
            &[1, 8, 9],
            &[8],
            &[1, 2, 3, 4, 5, 6, 7],
            &[2, 4, 6],
            &[1, 4, 5],
            &[4],
            &[1, 2, 3],
            &[2],
            &[1],
        ],
    );
}

#[test]
fn any_any_segments_and_conditions_are_disjoint() {
    let def = SubsetStrategy::AnyAny.definition(5).unwrap();
    for (segment, condition) in def.pairs() {
        assert_eq!(segment & condition, 0);
        assert_ne!(condition, 0);
    }
}

// ============================================================
// One-vs-X strategies
// ============================================================

#[test]
fn one_one_four_words() {
    let def = SubsetStrategy::OneOne.definition(4).unwrap();
    assert_definition(
        &def,
        &[1, 2, 4, 8],
        &[&[2, 4, 8], &[1, 4, 8], &[1, 2, 8], &[1, 2, 4]],
    );
}

#[test]
fn one_any_three_words() {
    let def = SubsetStrategy::OneAny.definition(3).unwrap();
    assert_definition(&def, &[1, 2, 4], &[&[2, 4, 6], &[1, 4, 5], &[1, 2, 3]]);
}

#[test]
fn one_all_four_words() {
    let def = SubsetStrategy::OneAll.definition(4).unwrap();
    assert_definition(&def, &[1, 2, 4, 8], &[&[14], &[13], &[11], &[7]]);
}

#[test]
fn one_preceding_compares_with_each_earlier_word() {
    let def = SubsetStrategy::OnePreceding.definition(3).unwrap();
    assert_definition(&def, &[2, 4], &[&[1], &[1, 2]]);
}

#[test]
fn pair_counts_follow_closed_forms() {
    for n in 2..=8usize {
        let count = |s: SubsetStrategy| s.definition(n).unwrap().pair_count();
        assert_eq!(count(SubsetStrategy::OneOne), n * (n - 1));
        assert_eq!(count(SubsetStrategy::OneAny), n * ((1 << (n - 1)) - 1));
        assert_eq!(count(SubsetStrategy::OneAll), n);
        assert_eq!(count(SubsetStrategy::OneSet), n);
        assert_eq!(count(SubsetStrategy::OnePreceding), n * (n - 1) / 2);
    }
}

// ============================================================
// Needed counts
// ============================================================

#[test]
fn needed_counts_cover_segments_conditions_and_joints() {
    for strategy in SubsetStrategy::ALL {
        let def = strategy.definition(4).unwrap();
        let needed = def.needed_counts();
        for (segment, condition) in def.pairs() {
            assert!(needed[segment], "{strategy}: segment {segment} missing");
            assert!(needed[condition], "{strategy}: condition {condition} missing");
            assert!(needed[segment | condition], "{strategy}: joint missing");
        }
        assert!(!needed[0]);
    }
}

#[test]
fn one_one_does_not_need_triples() {
    let def = SubsetStrategy::OneOne.definition(4).unwrap();
    let needed = def.needed_counts();
    assert!(needed[3]);
    assert!(!needed[7], "OneOne never reads a three-word subset");
}

// ============================================================
// Bounds and helpers
// ============================================================

#[test]
fn wordset_size_bounds() {
    assert!(matches!(
        SubsetStrategy::OneOne.definition(1),
        Err(CoherenceError::WordsetTooSmall { size: 1, .. })
    ));
    assert!(matches!(
        SubsetStrategy::OneOne.definition(MAX_WORDSET_SIZE + 1),
        Err(CoherenceError::WordsetTooLarge { .. })
    ));
    assert!(SubsetStrategy::OneAll.definition(2).is_ok());
}

#[test]
fn combinatorial_strategies_reject_large_wordsets_up_front() {
    for (strategy, max) in [(SubsetStrategy::AnyAny, 12), (SubsetStrategy::OneAny, 16)] {
        assert_eq!(strategy.max_wordset_size(), max);
        assert!(matches!(
            strategy.definition(20),
            Err(CoherenceError::WordsetTooLarge { size: 20, max: m }) if m == max
        ));
    }
    assert!(SubsetStrategy::OneOne.definition(20).is_ok());
}

#[test]
fn mask_helpers() {
    assert_eq!(full_mask(3), 7);
    assert_eq!(subset_size(11), 3);
    assert_eq!(members(10).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(sorted(submasks(5).collect()), vec![1, 4, 5]);
}

#[test]
fn invalid_definition_ids_are_rejected() {
    // condition 8 is out of range for three words
    assert!(SubsetDefinition::new(3, vec![1], vec![vec![8]]).is_err());
    assert!(SubsetDefinition::new(3, vec![1, 2], vec![vec![2]]).is_err());
}

#[test]
fn plans_share_one_definition_per_size() {
    let plans = SubsetPlans::build(SubsetStrategy::OneAny, [3, 5, 3]).unwrap();
    assert!(Arc::ptr_eq(&plans.get(3).unwrap(), &plans.get(3).unwrap()));
    assert_eq!(plans.get(5).unwrap().wordset_size(), 5);
    assert_eq!(plans.strategy(), SubsetStrategy::OneAny);
}
