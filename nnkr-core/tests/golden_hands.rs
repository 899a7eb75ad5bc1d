//! Hand-picked positions with known answers.

use nnkr_core::discard::{best_discards, best_discards_with, Solution};
use nnkr_core::generator::Problem;
use nnkr_core::shanten::{shanten, ShantenRule};
use nnkr_core::tile::{
    hand_to_unicode, next_tile_in_sequence, parse_hand, parse_mspz, tile_count, Hand, Tile,
};

fn hand(notation: &str) -> Hand {
    Hand::from_tiles(&parse_hand(notation).unwrap()).unwrap()
}

fn id(n: u8) -> Tile {
    Tile::new(n).unwrap()
}

#[test]
fn lone_honor_among_runs_and_pairs() {
    let ids: Vec<Tile> = [7, 8, 9, 16, 17, 18, 25, 26, 27, 0, 0, 1, 1, 2]
        .into_iter()
        .map(id)
        .collect();
    let counts = tile_count(&ids);
    assert_eq!(counts[0], 2);
    assert_eq!(counts[2], 1);

    let h = Hand::from_tiles(&ids).unwrap();
    let analysis = best_discards(&h);
    assert!(analysis.is_best(id(2)));

    let from_run = shanten(&h.without(id(7)).unwrap());
    assert!(analysis.best_shanten < from_run);
}

#[test]
fn dora_indicator_mapping() {
    assert_eq!(next_tile_in_sequence(id(7)), id(8));
    assert_eq!(next_tile_in_sequence(id(15)), id(7));
    assert_eq!(next_tile_in_sequence(id(0)), id(1));
    assert_eq!(next_tile_in_sequence(id(3)), id(0));
}

#[test]
fn isolated_terminal_is_the_only_answer() {
    let h = hand("1m456m678s23p55p789p");
    let analysis = best_discards(&h);
    assert_eq!(analysis.best_shanten, 0);

    let solution = Solution::from(&analysis);
    assert_eq!(solution.best, vec![parse_mspz("1m").unwrap()]);

    let strict = best_discards_with(&h, ShantenRule::Reference);
    assert_eq!(strict.candidates[0].improvements, parse_hand("14p").unwrap());
}

#[test]
fn floating_honors_are_interchangeable() {
    let h = hand("234m567s345p11z345z");
    for rule in [ShantenRule::Observed, ShantenRule::Reference] {
        let solution = Solution::from_hand(&h, rule);
        assert_eq!(solution.best, parse_hand("345z").unwrap(), "{rule:?}");
    }
}

#[test]
fn problem_serializes_tiles_as_ids() {
    let problem = Problem {
        hand: parse_hand("1m456m678s23p55p789p").unwrap(),
        shanten: 0,
        meld_count: 3,
        used_honors: false,
    };
    let json = serde_json::to_value(&problem).unwrap();
    assert_eq!(json["hand"][0], 7);
    assert_eq!(json["shanten"], 0);

    let back: Problem = serde_json::from_value(json).unwrap();
    assert_eq!(back, problem);
}

#[test]
fn out_of_range_ids_are_refused() {
    let err = serde_json::from_str::<Tile>("34").unwrap_err();
    assert!(err.to_string().contains("34"));
    assert!(Tile::try_new(34).is_err());
}

#[test]
fn unicode_rendering_follows_sorted_ids() {
    let h = hand("1z6z");
    let rendered = hand_to_unicode(&h.tiles());
    assert!(rendered.starts_with('\u{1F000}'));
    assert!(rendered.ends_with('\u{1F005}'));
}
