//! Improvement tiles (ukeire) for a hand waiting to draw.

use crate::shanten::{shanten_with, ShantenRule};
use crate::tile::{Hand, Tile, MAX_COPIES};

/// Tiles that lower the shanten of `hand` when drawn, ascending. `hand`
/// holds [`HAND_SIZE`](crate::tile::HAND_SIZE) tiles.
///
/// Tiles the hand already holds four of are skipped; copies visible
/// elsewhere are not considered.
pub fn improvement_tiles(hand: &Hand) -> Vec<Tile> {
    improvement_tiles_with(hand, ShantenRule::Observed)
}

/// [`improvement_tiles`] scored under `rule`.
pub fn improvement_tiles_with(hand: &Hand, rule: ShantenRule) -> Vec<Tile> {
    let base = shanten_with(hand, rule);
    Tile::all()
        .filter(|&tile| {
            hand.with(tile)
                .is_some_and(|drawn| shanten_with(&drawn, rule) < base)
        })
        .collect()
}

/// Copies of `tiles` still unseen from the point of view of `hand`.
pub fn ukeire_count(hand: &Hand, tiles: &[Tile]) -> u32 {
    tiles
        .iter()
        .map(|&t| MAX_COPIES.saturating_sub(hand.count(t)) as u32)
        .sum()
}
