//! Practice problem generation by rejection sampling.
//!
//! A candidate hand is assembled from a few honor groups, one shape per
//! numeral suit and random numeral filler, then shuffled and cut to 14 tiles.
//! Hands that are too close to complete (low shanten with many melds) or too
//! far gone (high shanten with almost no melds) are thrown back.

use log::{debug, trace, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Difficulty, GeneratorConfig};
use crate::discard::{best_discards_with, DiscardAnalysis, Solution};
use crate::errors::{NnkrError, NnkrResult};
use crate::seeding::{chance_to_percent, fisher_yates_shuffle, percent_check, roll_dice, roll_percent};
use crate::shanten::{count_melds, shanten_with, ShantenRule};
use crate::tile::{Hand, Tile, DRAWN_HAND_SIZE, MAX_COPIES, NUMERAL_STARTS, NUM_TILE_TYPES};

const NUM_HONORS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// 14 tiles in dealt (unsorted) order.
    pub hand: Vec<Tile>,
    pub shanten: i8,
    /// Greedy count of complete melds in the hand.
    pub meld_count: u8,
    pub used_honors: bool,
}

impl Problem {
    pub fn to_hand(&self) -> NnkrResult<Hand> {
        Hand::from_tiles(&self.hand)
    }

    pub fn sorted_hand(&self) -> Vec<Tile> {
        let mut tiles = self.hand.clone();
        tiles.sort_unstable();
        tiles
    }

    pub fn analyze(&self, rule: ShantenRule) -> NnkrResult<DiscardAnalysis> {
        Ok(best_discards_with(&self.to_hand()?, rule))
    }

    pub fn solution(&self, rule: ShantenRule) -> NnkrResult<Solution> {
        Ok(Solution::from_hand(&self.to_hand()?, rule))
    }
}

/// The rejection zone: hands that are nearly done or hopelessly scattered.
pub fn is_rejected(shanten: i8, meld_count: u8, min_shanten: i8, max_shanten: i8) -> bool {
    (shanten <= min_shanten && meld_count > 2) || (shanten > max_shanten && meld_count <= 1)
}

fn roll_one(sides: u32, rng: &mut impl Rng) -> u32 {
    roll_dice(1, sides, rng).first().copied().unwrap_or(1)
}

struct Draft {
    tiles: Vec<Tile>,
    counts: [u8; NUM_TILE_TYPES],
}

impl Draft {
    fn new() -> Self {
        Self {
            tiles: Vec::with_capacity(DRAWN_HAND_SIZE + 3),
            counts: [0; NUM_TILE_TYPES],
        }
    }

    /// Pushes `copies` of `id` unless that would exceed four in the hand.
    fn push(&mut self, id: u8, copies: u8) -> bool {
        let Some(tile) = Tile::new(id) else {
            return false;
        };
        if self.counts[tile.index()] + copies > MAX_COPIES {
            return false;
        }
        self.counts[tile.index()] += copies;
        self.tiles.extend(std::iter::repeat(tile).take(copies as usize));
        true
    }

    /// Pushes a group only when every tile of it fits.
    fn push_group(&mut self, ids: &[u8]) {
        let mut trial = self.counts;
        for &id in ids {
            trial[id as usize] += 1;
            if trial[id as usize] > MAX_COPIES {
                return;
            }
        }
        for &id in ids {
            self.push(id, 1);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProblemGenerator {
    config: GeneratorConfig,
}

impl ProblemGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn seed_honors(&self, draft: &mut Draft, rng: &mut impl Rng) -> bool {
        if !percent_check(self.config.honor_chance, rng) {
            return false;
        }
        let groups = roll_one(3, rng) - 1;
        for _ in 0..groups {
            let honor = (roll_one(NUM_HONORS, rng) - 1) as u8;
            let copies = if roll_one(2, rng) == 1 { 2 } else { 3 };
            draft.push(honor, copies);
        }
        true
    }

    fn seed_suit(&self, draft: &mut Draft, start: u8, rng: &mut impl Rng) {
        let run_cut = chance_to_percent(self.config.run_chance);
        let partial_cut = run_cut + chance_to_percent(self.config.partial_chance);
        let roll = roll_percent(rng);
        if roll <= run_cut {
            let first = start + (roll_one(7, rng) - 1) as u8;
            draft.push_group(&[first, first + 1, first + 2]);
        } else if roll <= partial_cut {
            let offset = (roll_one(8, rng) - 1) as u8;
            // a kanchan from rank 8 would leave the suit
            let gap = if offset < 7 && roll_one(2, rng) == 2 { 2 } else { 1 };
            draft.push_group(&[start + offset, start + offset + gap]);
        } else {
            draft.push(start + (roll_one(9, rng) - 1) as u8, 1);
        }
    }

    fn draft_hand(&self, rng: &mut impl Rng) -> (Vec<Tile>, bool) {
        let mut draft = Draft::new();
        let used_honors = self.seed_honors(&mut draft, rng);

        for start in NUMERAL_STARTS {
            self.seed_suit(&mut draft, start, rng);
        }

        while draft.tiles.len() < DRAWN_HAND_SIZE {
            let start = NUMERAL_STARTS[(roll_one(3, rng) - 1) as usize];
            draft.push(start + (roll_one(9, rng) - 1) as u8, 1);
        }

        let mut tiles = draft.tiles;
        fisher_yates_shuffle(&mut tiles, rng);
        tiles.truncate(DRAWN_HAND_SIZE);
        (tiles, used_honors)
    }

    /// Draws hands until one falls outside the rejection zone.
    pub fn generate(&self, min_shanten: i8, max_shanten: i8, rng: &mut impl Rng) -> NnkrResult<Problem> {
        let rule = self.config.shanten_rule;
        for attempt in 1..=self.config.max_attempts {
            let (tiles, used_honors) = self.draft_hand(rng);
            let hand = Hand::from_tiles(&tiles)?;
            let shanten = shanten_with(&hand, rule);
            let meld_count = count_melds(&hand);

            if is_rejected(shanten, meld_count, min_shanten, max_shanten) {
                trace!("attempt {attempt}: rejected {hand} (shanten {shanten}, melds {meld_count})");
                continue;
            }

            debug!("accepted {hand} after {attempt} attempt(s): shanten {shanten}, melds {meld_count}");
            return Ok(Problem {
                hand: tiles,
                shanten,
                meld_count,
                used_honors,
            });
        }

        warn!(
            "no acceptable hand for band ({min_shanten}, {max_shanten}) in {} attempts",
            self.config.max_attempts
        );
        Err(NnkrError::GenerationExhausted {
            attempts: self.config.max_attempts,
        })
    }

    pub fn generate_for(&self, difficulty: Difficulty, rng: &mut impl Rng) -> NnkrResult<Problem> {
        let (min, max) = difficulty.shanten_band();
        self.generate(min, max, rng)
    }
}

/// [`ProblemGenerator::generate`] with the default configuration.
pub fn generate_problem(min_shanten: i8, max_shanten: i8, rng: &mut impl Rng) -> NnkrResult<Problem> {
    ProblemGenerator::default().generate(min_shanten, max_shanten, rng)
}
