//! Property-based invariants for the evaluator and the generator.
//!
//! Uses proptest to draw seeds, builds hands from them, and checks the
//! relationships between shanten, improvement tiles and best discards.

use nnkr_core::discard::best_discards;
use nnkr_core::generator::{generate_problem, is_rejected};
use nnkr_core::improvement::improvement_tiles;
use nnkr_core::seeding::{fisher_yates_shuffle, problem_rng};
use nnkr_core::shanten::{shanten, shanten_with, ShantenRule, COMPLETE, TENPAI};
use nnkr_core::tile::{Hand, Tile, MAX_COPIES};
use proptest::prelude::*;
use rand::Rng;

/// Deal `n` tiles from a shuffled 136-tile set.
fn deal(seed: u64, n: usize) -> Hand {
    let mut rng = problem_rng(seed);
    let mut wall: Vec<Tile> = Tile::all()
        .flat_map(|t| std::iter::repeat(t).take(MAX_COPIES as usize))
        .collect();
    fisher_yates_shuffle(&mut wall, &mut rng);
    Hand::from_tiles(&wall[..n]).expect("a real wall never holds five copies")
}

/// Four random melds plus a pair, respecting the copy cap.
fn complete_hand(seed: u64) -> Hand {
    let mut rng = problem_rng(seed);
    loop {
        let mut hand = Hand::new();
        let mut ok = true;
        for _ in 0..4 {
            let group: Vec<u8> = if rng.random_bool(0.5) {
                let start = [7u8, 16, 25][rng.random_range(0..3)] + rng.random_range(0..7u8);
                vec![start, start + 1, start + 2]
            } else {
                vec![rng.random_range(0..34u8); 3]
            };
            for id in group {
                ok &= hand.add(Tile::new(id).unwrap()).is_ok();
            }
        }
        let pair = Tile::new(rng.random_range(0..34u8)).unwrap();
        ok &= hand.add(pair).is_ok() && hand.add(pair).is_ok();
        if ok {
            return hand;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn shanten_is_bounded(seed in 0u64..1_000_000) {
        let h13 = deal(seed, 13);
        let h14 = deal(seed, 14);
        prop_assert!((TENPAI..=8).contains(&shanten(&h13)));
        prop_assert!((COMPLETE..=8).contains(&shanten(&h14)));
        prop_assert!((TENPAI..=8).contains(&shanten_with(&h13, ShantenRule::Reference)));
    }

    #[test]
    fn complete_hands_score_complete(seed in 0u64..1_000_000) {
        let hand = complete_hand(seed);
        prop_assert_eq!(shanten(&hand), COMPLETE);
        prop_assert_eq!(shanten_with(&hand, ShantenRule::Reference), COMPLETE);

        // some single removal leaves a ready hand
        let ready = hand
            .distinct()
            .filter_map(|t| hand.without(t))
            .any(|rest| shanten(&rest) == TENPAI);
        prop_assert!(ready, "no tenpai removal in {}", hand);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn improvements_strictly_lower_shanten(seed in 0u64..1_000_000) {
        let hand = deal(seed, 13);
        let base = shanten(&hand);
        let imps = improvement_tiles(&hand);
        for &t in &imps {
            let drawn = hand.with(t).unwrap();
            prop_assert!(shanten(&drawn) < base, "{} + {} did not improve", hand, t);
        }
        // a tile outside the set never lowers shanten
        for t in Tile::all().filter(|t| !imps.contains(t)) {
            if let Some(drawn) = hand.with(t) {
                prop_assert!(shanten(&drawn) >= base);
            }
        }
    }

    #[test]
    fn best_discards_reproduce_best_shanten(seed in 0u64..1_000_000) {
        let hand = deal(seed, 14);
        let analysis = best_discards(&hand);
        prop_assert!(!analysis.candidates.is_empty());
        for c in &analysis.candidates {
            let rest = hand.without(c.discard).unwrap();
            prop_assert_eq!(shanten(&rest), analysis.best_shanten);
            prop_assert_eq!(&c.improvements, &improvement_tiles(&rest));
        }
        // nothing outside the candidate list does better or as well
        for t in hand.distinct().filter(|t| !analysis.is_best(*t)) {
            let rest = hand.without(t).unwrap();
            prop_assert!(shanten(&rest) > analysis.best_shanten);
        }
    }
}

#[test]
fn generated_problems_avoid_rejection_zone() {
    let mut rng = problem_rng(2024);
    for i in 0..1000 {
        let problem = generate_problem(1, 3, &mut rng).unwrap();
        assert_eq!(problem.hand.len(), 14, "problem {i}");
        assert!(
            !(problem.shanten <= 1 && problem.meld_count > 2),
            "problem {i}: shanten {} with {} melds",
            problem.shanten,
            problem.meld_count
        );
        assert!(!is_rejected(problem.shanten, problem.meld_count, 1, 3));
    }
}
