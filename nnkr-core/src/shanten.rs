//! Normal-form shanten by exhaustive decomposition.
//!
//! The search walks tile ids in ascending order. At each occupied id it tries
//! every block that can start there (pair, triplet, run, two-tile partial)
//! and finally abandons whatever copies are left. Any standard decomposition
//! can be assembled this way, so the minimum over all leaves is exact for
//! the chosen scoring rule.
//!
//! Counts are a `[u8; 34]` passed by value, so each branch owns its copy and
//! no state needs restoring on the way back up.

use serde::{Deserialize, Serialize};

use crate::tile::{Hand, Tile, NUM_SUIT_TILES, NUM_TILE_TYPES};

/// Upper bound the search starts from. No 13 or 14 tile hand scores worse.
pub const SHANTEN_CEILING: i8 = 8;

/// Shanten of a complete (agari) 14-tile hand.
pub const COMPLETE: i8 = -1;

/// Shanten of a ready hand.
pub const TENPAI: i8 = 0;

/// How partial blocks are scored at a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShantenRule {
    /// Every partial counts, however many blocks the hand already has.
    /// Can read optimistic on hands crowded with overlapping partials.
    #[default]
    Observed,
    /// Melds plus partials are capped at four blocks and spare pairs count
    /// as partials, matching the usual efficiency tables.
    Reference,
}

impl ShantenRule {
    fn score(self, melds: u8, tatsu: u8, pair: bool) -> i8 {
        let melds = melds.min(4) as i8;
        let tatsu = match self {
            ShantenRule::Observed => tatsu as i8,
            ShantenRule::Reference => (tatsu as i8).min(4 - melds),
        };
        let need_pair = if pair { 0 } else { 1 };
        2 * (4 - melds) + need_pair - tatsu - 1
    }
}

#[inline]
fn numeral_offset(idx: usize) -> Option<u8> {
    Tile::new(idx as u8).and_then(Tile::rank).map(|r| r - 1)
}

struct Search {
    rule: ShantenRule,
    best: i8,
}

impl Search {
    fn dfs(&mut self, counts: [u8; NUM_TILE_TYPES], idx: usize, melds: u8, tatsu: u8, pair: bool) {
        if idx >= NUM_TILE_TYPES {
            self.best = self.best.min(self.rule.score(melds, tatsu, pair));
            return;
        }

        let c = counts[idx];
        if c == 0 {
            self.dfs(counts, idx + 1, melds, tatsu, pair);
            return;
        }

        if !pair && c >= 2 {
            let mut next = counts;
            next[idx] -= 2;
            self.dfs(next, idx, melds, tatsu, true);
        }

        if self.rule == ShantenRule::Reference && c >= 2 {
            let mut next = counts;
            next[idx] -= 2;
            self.dfs(next, idx, melds, tatsu + 1, pair);
        }

        if c >= 3 {
            let mut next = counts;
            next[idx] -= 3;
            self.dfs(next, idx, melds + 1, tatsu, pair);
        }

        if let Some(offset) = numeral_offset(idx) {
            let last = NUM_SUIT_TILES - 1;

            if offset + 2 <= last && counts[idx + 1] > 0 && counts[idx + 2] > 0 {
                let mut next = counts;
                next[idx] -= 1;
                next[idx + 1] -= 1;
                next[idx + 2] -= 1;
                self.dfs(next, idx, melds + 1, tatsu, pair);
            }

            if offset + 1 <= last && counts[idx + 1] > 0 {
                let mut next = counts;
                next[idx] -= 1;
                next[idx + 1] -= 1;
                self.dfs(next, idx, melds, tatsu + 1, pair);
            }

            if offset + 2 <= last && counts[idx + 2] > 0 {
                let mut next = counts;
                next[idx] -= 1;
                next[idx + 2] -= 1;
                self.dfs(next, idx, melds, tatsu + 1, pair);
            }
        }

        // Leave the remaining copies as isolated tiles.
        let mut next = counts;
        next[idx] = 0;
        self.dfs(next, idx + 1, melds, tatsu, pair);
    }
}

/// Shanten of raw counts under `rule`.
pub fn shanten_from_counts(counts: &[u8; NUM_TILE_TYPES], rule: ShantenRule) -> i8 {
    let mut search = Search {
        rule,
        best: SHANTEN_CEILING,
    };
    search.dfs(*counts, 0, 0, 0, false);
    search.best
}

/// Normal-form shanten of a 13 or 14 tile hand using [`ShantenRule::Observed`].
///
/// 0 is tenpai; a complete 14-tile hand is -1.
pub fn shanten(hand: &Hand) -> i8 {
    shanten_from_counts(hand.counts(), ShantenRule::Observed)
}

/// Normal-form shanten of `hand` scored under `rule`.
pub fn shanten_with(hand: &Hand, rule: ShantenRule) -> i8 {
    shanten_from_counts(hand.counts(), rule)
}

/// Greedy count of complete melds: triplets first, then runs, ascending ids.
pub fn count_melds(hand: &Hand) -> u8 {
    let mut counts = *hand.counts();
    let mut melds = 0u8;
    for idx in 0..NUM_TILE_TYPES {
        if counts[idx] >= 3 {
            counts[idx] -= 3;
            melds += 1;
        }
        if matches!(numeral_offset(idx), Some(o) if o + 2 < NUM_SUIT_TILES) {
            let runs = counts[idx].min(counts[idx + 1]).min(counts[idx + 2]);
            counts[idx] -= runs;
            counts[idx + 1] -= runs;
            counts[idx + 2] -= runs;
            melds += runs;
        }
    }
    melds
}
