//! Advanced problems: a generated hand plus dora, winds, a turn number and a
//! heuristic desirability weight for each correct discard.
//!
//! The weights are descriptive only. Grading still goes through
//! [`Solution`](crate::discard::Solution) on the same hand.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Difficulty;
use crate::discard::{best_discards_with, DiscardCandidate};
use crate::errors::NnkrResult;
use crate::generator::{Problem, ProblemGenerator};
use crate::tile::{next_tile_in_sequence, Tile, NUM_TILE_TYPES, WINDS};

pub const MAX_DORA_INDICATORS: u32 = 3;
pub const MIN_TURN: u8 = 1;
pub const MAX_TURN: u8 = 15;

pub const TURN_SHAPE: f64 = 2.5;
pub const TURN_SCALE: f64 = 3.0;

const SIGMA_BASE: f64 = 1.2;
const SIGMA_PER_TURN: f64 = 0.3;
const MIDDLE_RANK: f64 = 5.0;

const DORA_DISCARD_FACTOR: f64 = 0.4;
const VALUE_WIND_FACTOR: f64 = 0.6;
const OTHER_HONOR_FACTOR: f64 = 0.8;
const NEAR_DORA_FACTOR: f64 = 1.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedProblem {
    #[serde(flatten)]
    pub problem: Problem,
    pub dora_indicators: Vec<Tile>,
    /// `dora_tiles[i]` is the dora shown by `dora_indicators[i]`.
    pub dora_tiles: Vec<Tile>,
    /// East or South.
    pub round_wind: Tile,
    pub seat_wind: Tile,
    pub turn: u8,
    /// Best discards of `problem.hand`, one per distinct tile.
    pub candidates: Vec<DiscardCandidate>,
    /// `weights[i]` belongs to `candidates[i]`.
    pub weights: Vec<f64>,
}

/// Table context the weights are computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableContext {
    pub dora_tiles: Vec<Tile>,
    pub round_wind: Tile,
    pub seat_wind: Tile,
    pub turn: u8,
}

/// Gamma-like sample: `ceil(shape)` unit exponentials summed, scaled and
/// rounded.
pub fn gamma_sample(shape: f64, scale: f64, rng: &mut impl Rng) -> f64 {
    let terms = shape.ceil().max(0.0) as u32;
    let sum: f64 = (0..terms)
        .map(|_| {
            // 1 - u lies in (0, 1], keeping ln finite
            let u: f64 = rng.random();
            -(1.0 - u).ln()
        })
        .sum();
    (sum * scale).round()
}

/// Turn number from a gamma draw, clamped to `MIN_TURN..=MAX_TURN`.
pub fn sample_turn(rng: &mut impl Rng) -> u8 {
    let turn = gamma_sample(TURN_SHAPE, TURN_SCALE, rng);
    turn.clamp(MIN_TURN as f64, MAX_TURN as f64) as u8
}

/// 1 to 3 distinct indicators and the dora each one shows.
pub fn generate_dora(rng: &mut impl Rng) -> (Vec<Tile>, Vec<Tile>) {
    let count = rng.random_range(1..=MAX_DORA_INDICATORS) as usize;
    let mut indicators: Vec<Tile> = Vec::with_capacity(count);
    while indicators.len() < count {
        let Some(tile) = Tile::new(rng.random_range(0..NUM_TILE_TYPES as u8)) else {
            continue;
        };
        if !indicators.contains(&tile) {
            indicators.push(tile);
        }
    }
    let dora = indicators.iter().copied().map(next_tile_in_sequence).collect();
    (indicators, dora)
}

fn bell(x: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * ((x - mu) / sigma).powi(2)).exp()
}

/// Desirability of discarding `candidate.discard` in `ctx`.
///
/// Starts from the number of improvement tiles, favors middle ranks early
/// and flattens later, and discounts throwing dora or valuable winds.
/// Tiles one or two ranks from a numeral dora get a boost per dora.
pub fn discard_weight(candidate: &DiscardCandidate, ctx: &TableContext) -> f64 {
    let tile = candidate.discard;
    let sigma = SIGMA_BASE + SIGMA_PER_TURN * (ctx.turn as f64 - 1.0);
    let mut weight = candidate.improvements.len() as f64;

    if let Some(rank) = tile.rank() {
        weight *= bell(rank as f64, MIDDLE_RANK, sigma);
    }

    if ctx.dora_tiles.contains(&tile) {
        weight *= DORA_DISCARD_FACTOR;
    }

    if tile.is_honor() {
        if tile == ctx.round_wind || tile == ctx.seat_wind {
            weight *= VALUE_WIND_FACTOR;
        } else {
            weight *= OTHER_HONOR_FACTOR;
        }
    }

    for dora in &ctx.dora_tiles {
        let (Some(dora_rank), Some(rank)) = (dora.rank(), tile.rank()) else {
            continue;
        };
        if dora.suit() == tile.suit() && (1..=2).contains(&dora_rank.abs_diff(rank)) {
            weight *= NEAR_DORA_FACTOR;
        }
    }

    weight
}

/// [`discard_weight`] for each candidate, in candidate order.
pub fn compute_weights(candidates: &[DiscardCandidate], ctx: &TableContext) -> Vec<f64> {
    candidates.iter().map(|c| discard_weight(c, ctx)).collect()
}

impl ProblemGenerator {
    /// A normal problem plus table context and a weight per best discard.
    pub fn generate_advanced(
        &self,
        min_shanten: i8,
        max_shanten: i8,
        rng: &mut impl Rng,
    ) -> NnkrResult<AdvancedProblem> {
        let problem = self.generate(min_shanten, max_shanten, rng)?;
        let (dora_indicators, dora_tiles) = generate_dora(rng);

        let round_wind = WINDS[rng.random_range(0..2)];
        let seat_wind = WINDS[rng.random_range(0..WINDS.len())];
        let turn = sample_turn(rng);

        let analysis = best_discards_with(&problem.to_hand()?, self.config().shanten_rule);
        let ctx = TableContext {
            dora_tiles,
            round_wind,
            seat_wind,
            turn,
        };
        let weights = compute_weights(&analysis.candidates, &ctx);
        debug!(
            "advanced problem: turn {turn}, {} dora, {} candidates",
            ctx.dora_tiles.len(),
            analysis.candidates.len()
        );

        Ok(AdvancedProblem {
            problem,
            dora_indicators,
            dora_tiles: ctx.dora_tiles,
            round_wind,
            seat_wind,
            turn,
            candidates: analysis.candidates,
            weights,
        })
    }

    /// [`ProblemGenerator::generate_advanced`] with the band of `difficulty`.
    pub fn generate_advanced_for(
        &self,
        difficulty: Difficulty,
        rng: &mut impl Rng,
    ) -> NnkrResult<AdvancedProblem> {
        let (min, max) = difficulty.shanten_band();
        self.generate_advanced(min, max, rng)
    }
}

/// [`ProblemGenerator::generate_advanced`] with the default configuration.
pub fn generate_advanced_problem(
    min_shanten: i8,
    max_shanten: i8,
    rng: &mut impl Rng,
) -> NnkrResult<AdvancedProblem> {
    ProblemGenerator::default().generate_advanced(min_shanten, max_shanten, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeding::problem_rng;
    use crate::shanten::ShantenRule;
    use crate::tile::{parse_mspz, EAST, SOUTH};

    fn t(notation: &str) -> Tile {
        parse_mspz(notation).unwrap()
    }

    fn candidate(notation: &str, improvements: usize) -> DiscardCandidate {
        DiscardCandidate {
            discard: t(notation),
            shanten: 1,
            improvements: Tile::all().take(improvements).collect(),
        }
    }

    fn ctx(dora: &[&str], turn: u8) -> TableContext {
        TableContext {
            dora_tiles: dora.iter().map(|d| t(d)).collect(),
            round_wind: Tile::new(EAST).unwrap(),
            seat_wind: Tile::new(SOUTH).unwrap(),
            turn,
        }
    }

    #[test]
    fn middle_rank_keeps_full_weight() {
        let w = discard_weight(&candidate("5m", 6), &ctx(&[], 1));
        assert!((w - 6.0).abs() < 1e-12);
    }

    #[test]
    fn bell_flattens_with_turns() {
        let early = discard_weight(&candidate("1s", 4), &ctx(&[], 1));
        let late = discard_weight(&candidate("1s", 4), &ctx(&[], 15));
        assert!(early < late);
        // sigma 1.2 at turn 1, four ranks from the middle
        let expected = 4.0 * (-0.5 * (4.0f64 / 1.2).powi(2)).exp();
        assert!((early - expected).abs() < 1e-12);
    }

    #[test]
    fn dora_discard_is_discouraged() {
        let plain = discard_weight(&candidate("5p", 5), &ctx(&[], 1));
        let dora = discard_weight(&candidate("5p", 5), &ctx(&["5p"], 1));
        assert!((dora - plain * 0.4).abs() < 1e-12);
    }

    #[test]
    fn honor_factors() {
        let c = ctx(&[], 1);
        assert!((discard_weight(&candidate("1z", 10), &c) - 6.0).abs() < 1e-12);
        assert!((discard_weight(&candidate("2z", 10), &c) - 6.0).abs() < 1e-12);
        assert!((discard_weight(&candidate("3z", 10), &c) - 8.0).abs() < 1e-12);
        assert!((discard_weight(&candidate("7z", 10), &c) - 8.0).abs() < 1e-12);
    }

    #[test]
    fn near_dora_boost_stacks_per_dora() {
        let base = discard_weight(&candidate("5s", 3), &ctx(&[], 1));
        let one = discard_weight(&candidate("5s", 3), &ctx(&["6s"], 1));
        let two = discard_weight(&candidate("5s", 3), &ctx(&["6s", "3s"], 1));
        let far = discard_weight(&candidate("5s", 3), &ctx(&["8s", "6m"], 1));
        assert!((one - base * 1.3).abs() < 1e-12);
        assert!((two - base * 1.3 * 1.3).abs() < 1e-12);
        assert!((far - base).abs() < 1e-12);
    }

    #[test]
    fn no_improvements_means_zero_weight() {
        assert_eq!(discard_weight(&candidate("5m", 0), &ctx(&["6m"], 3)), 0.0);
    }

    #[test]
    fn dora_indicators_are_distinct() {
        let mut rng = problem_rng(4);
        for _ in 0..200 {
            let (indicators, dora) = generate_dora(&mut rng);
            assert!((1..=3).contains(&indicators.len()));
            assert_eq!(indicators.len(), dora.len());
            for (i, ind) in indicators.iter().enumerate() {
                assert!(!indicators[i + 1..].contains(ind));
                assert_eq!(dora[i], next_tile_in_sequence(*ind));
            }
        }
    }

    #[test]
    fn turn_stays_in_range() {
        let mut rng = problem_rng(6);
        let turns: Vec<u8> = (0..2000).map(|_| sample_turn(&mut rng)).collect();
        assert!(turns.iter().all(|t| (MIN_TURN..=MAX_TURN).contains(t)));
        let mean = turns.iter().map(|&t| t as f64).sum::<f64>() / turns.len() as f64;
        // three unit exponentials scaled by 3 average 9 before clamping
        assert!((6.0..=11.0).contains(&mean), "mean turn {mean}");
    }

    #[test]
    fn advanced_problem_is_consistent() {
        let mut rng = problem_rng(12);
        for _ in 0..10 {
            let adv = generate_advanced_problem(2, 4, &mut rng).unwrap();
            assert_eq!(adv.problem.hand.len(), 14);
            assert!(adv.round_wind.id() <= 1);
            assert!(adv.seat_wind.is_wind());
            assert_eq!(adv.weights.len(), adv.candidates.len());
            assert!(adv.weights.iter().all(|w| *w >= 0.0 && w.is_finite()));

            let solution = adv.problem.solution(ShantenRule::Observed).unwrap();
            let discards: Vec<Tile> = adv.candidates.iter().map(|c| c.discard).collect();
            assert_eq!(solution.best, discards);
        }
    }

    #[test]
    fn advanced_problem_serializes_flat() {
        let adv = generate_advanced_problem(2, 4, &mut problem_rng(13)).unwrap();
        let value = serde_json::to_value(&adv).unwrap();
        assert!(value.get("hand").is_some());
        assert!(value.get("weights").is_some());
        assert!(value.get("problem").is_none());
    }
}
