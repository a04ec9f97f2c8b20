//! Property-Based Tests for the BKT core
//!
//! Tests the following invariants:
//! - Evidence direction: a correct answer on an informative item beats an incorrect one
//! - Probability range: updates stay within [0, 1]
//! - Monotonicity: pcorrect is non-decreasing in mastery when slip + guess < 1
//! - Replay seed: an empty history replays to [init]
//! - Ranking: output is a permutation of the candidate pool
//! - Hierarchy filter: subset of the input, no duplicates, bounded size

use std::collections::HashSet;

use proptest::prelude::*;

use bkt_algo::{
    filter_by_hierarchy, order_candidate_ids, pcorrect, replay, update, Concept, ConceptGraph,
    ConceptTable, HierarchyBounds, Item, ItemTable, Modality, RankOptions,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_f64_0_1() -> impl Strategy<Value = f64> {
    (0u64..=1000u64).prop_map(|v| v as f64 / 1000.0)
}

/// Strictly inside (0, 1)
fn arb_open_prob() -> impl Strategy<Value = f64> {
    (1u64..=999u64).prop_map(|v| v as f64 / 1000.0)
}

/// slip < 0.5 < 1 - guess
fn arb_informative_item() -> impl Strategy<Value = (f64, f64)> {
    ((1u64..=499u64), (1u64..=499u64)).prop_map(|(s, g)| (s as f64 / 1000.0, g as f64 / 1000.0))
}

const CONCEPTS: [&str; 4] = ["vars", "loops", "recursion", "strings"];

fn arb_pool() -> impl Strategy<Value = Vec<(f64, f64, usize)>> {
    prop::collection::vec((arb_f64_0_1(), arb_f64_0_1(), 0usize..CONCEPTS.len()), 0..24)
}

fn arb_bounds() -> impl Strategy<Value = HierarchyBounds> {
    (0usize..5, 0usize..5, 0usize..5).prop_map(|(max_target, max_child, max_parent)| {
        HierarchyBounds {
            max_target,
            max_child,
            max_parent,
        }
    })
}

fn single_item(slip: f64, guess: f64) -> ItemTable {
    ItemTable::new(vec![Item {
        eid: "e".to_string(),
        concept: "loops".to_string(),
        slip,
        guess,
        modality: Modality::Read,
    }])
    .unwrap()
}

fn pool_table(pool: &[(f64, f64, usize)]) -> (ItemTable, Vec<String>) {
    let items: Vec<Item> = pool
        .iter()
        .enumerate()
        .map(|(i, &(slip, guess, concept))| Item {
            eid: format!("e{i}"),
            concept: CONCEPTS[concept].to_string(),
            slip,
            guess,
            modality: Modality::Read,
        })
        .collect();
    let ids = items.iter().map(|item| item.eid.clone()).collect();
    (ItemTable::new(items).unwrap(), ids)
}

/// vars -> loops -> recursion; strings unrelated
fn graph() -> ConceptGraph {
    ConceptGraph::from_adjacency(
        CONCEPTS.iter().map(|c| c.to_string()).collect(),
        vec![
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ],
    )
    .unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_correct_beats_incorrect(
        (slip, guess) in arb_informative_item(),
        prior in arb_open_prob(),
        transfer in arb_f64_0_1().prop_filter("transfer < 1", |t| *t < 1.0),
    ) {
        let items = single_item(slip, guess);
        let right = update(true, "e", transfer, &items, prior).unwrap();
        let wrong = update(false, "e", transfer, &items, prior).unwrap();
        prop_assert!(right > wrong, "right {} <= wrong {}", right, wrong);
    }

    #[test]
    fn prop_update_stays_in_unit_interval(
        slip in arb_open_prob(),
        guess in arb_open_prob(),
        prior in arb_f64_0_1(),
        transfer in arb_f64_0_1(),
        correct in any::<bool>(),
    ) {
        let items = single_item(slip, guess);
        let p = update(correct, "e", transfer, &items, prior).unwrap();
        prop_assert!((0.0..=1.0 + 1e-12).contains(&p), "p = {}", p);
    }

    #[test]
    fn prop_pcorrect_monotone(
        (slip, guess) in arb_informative_item(),
        a in arb_f64_0_1(),
        b in arb_f64_0_1(),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(pcorrect(lo, slip, guess) <= pcorrect(hi, slip, guess) + 1e-12);
    }

    #[test]
    fn prop_empty_replay_is_init(init in arb_f64_0_1(), transfer in arb_f64_0_1()) {
        let concepts = ConceptTable::new(vec![Concept {
            id: "loops".to_string(),
            modality: Modality::Write,
            init,
            transfer,
        }]).unwrap();
        let items = single_item(0.1, 0.2);
        let pk = replay("u1", "loops", Modality::Write, &[], &concepts, &items).unwrap();
        prop_assert_eq!(pk, vec![init]);
    }

    #[test]
    fn prop_ranking_is_permutation(
        pool in arb_pool(),
        p_known in arb_f64_0_1(),
        error_margin in -0.5f64..0.5f64,
    ) {
        let (items, ids) = pool_table(&pool);
        let options = RankOptions { error_margin, penalty: 1.0 };
        let ranked = order_candidate_ids(&ids, p_known, &items, options).unwrap();

        let mut expected = ids.clone();
        let mut actual = ranked.clone();
        expected.sort();
        actual.sort();
        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn prop_hierarchy_filter_is_bounded_subset(
        pool in arb_pool(),
        p_known in arb_f64_0_1(),
        bounds in arb_bounds(),
    ) {
        let (items, ids) = pool_table(&pool);
        let ranked = order_candidate_ids(&ids, p_known, &items, RankOptions::default()).unwrap();
        let out = filter_by_hierarchy(&ranked, &items, "loops", &graph(), bounds).unwrap();

        let input: HashSet<&String> = ranked.iter().collect();
        let unique: HashSet<&String> = out.iter().collect();
        prop_assert_eq!(unique.len(), out.len());
        prop_assert!(out.iter().all(|eid| input.contains(eid)));
        prop_assert!(out.len() <= bounds.total());

        // rank order preserved
        let positions: Vec<usize> = out
            .iter()
            .map(|eid| ranked.iter().position(|r| r == eid).unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
