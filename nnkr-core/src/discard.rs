//! Best-discard selection for a 14-tile hand.
//!
//! Every distinct tile in the hand is tried as the discard. The ones that
//! leave the lowest shanten are all correct answers; ties are not broken.

use serde::{Deserialize, Serialize};

use crate::improvement::improvement_tiles_with;
use crate::shanten::{shanten_with, ShantenRule, SHANTEN_CEILING};
use crate::tile::{Hand, Tile};

/// One correct discard together with what it leaves behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardCandidate {
    pub discard: Tile,
    /// Shanten of the 13 tiles left after discarding.
    pub shanten: i8,
    /// Draws that would lower that shanten, ascending.
    pub improvements: Vec<Tile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardAnalysis {
    pub best_shanten: i8,
    /// One entry per distinct tile id, ascending by id.
    pub candidates: Vec<DiscardCandidate>,
}

impl DiscardAnalysis {
    pub fn discards(&self) -> impl Iterator<Item = Tile> + '_ {
        self.candidates.iter().map(|c| c.discard)
    }

    pub fn is_best(&self, tile: Tile) -> bool {
        self.candidates.iter().any(|c| c.discard == tile)
    }
}

/// [`best_discards_with`] under [`ShantenRule::Observed`].
pub fn best_discards(hand: &Hand) -> DiscardAnalysis {
    best_discards_with(hand, ShantenRule::Observed)
}

/// Every discard from a 14-tile hand that leaves the lowest shanten, with
/// the improvement tiles of what remains.
pub fn best_discards_with(hand: &Hand, rule: ShantenRule) -> DiscardAnalysis {
    let after: Vec<(Tile, Hand, i8)> = hand
        .distinct()
        .filter_map(|tile| hand.without(tile).map(|rest| (tile, rest)))
        .map(|(tile, rest)| (tile, rest, shanten_with(&rest, rule)))
        .collect();

    let best_shanten = after
        .iter()
        .map(|&(_, _, s)| s)
        .min()
        .unwrap_or(SHANTEN_CEILING);

    let candidates = after
        .into_iter()
        .filter(|&(_, _, s)| s == best_shanten)
        .map(|(discard, rest, shanten)| DiscardCandidate {
            discard,
            shanten,
            improvements: improvement_tiles_with(&rest, rule),
        })
        .collect();

    DiscardAnalysis {
        best_shanten,
        candidates,
    }
}

/// The answer key for a problem: every tile id that is a correct discard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub best: Vec<Tile>,
}

impl Solution {
    pub fn from_hand(hand: &Hand, rule: ShantenRule) -> Self {
        Self::from(&best_discards_with(hand, rule))
    }

    pub fn is_correct(&self, tile: Tile) -> bool {
        self.best.contains(&tile)
    }
}

impl From<&DiscardAnalysis> for Solution {
    fn from(analysis: &DiscardAnalysis) -> Self {
        let mut best: Vec<Tile> = analysis.discards().collect();
        best.sort_unstable();
        best.dedup();
        Self { best }
    }
}

/// Grades a submitted discard against `hand`.
pub fn check_discard(hand: &Hand, tile: Tile) -> bool {
    best_discards(hand).is_best(tile)
}
