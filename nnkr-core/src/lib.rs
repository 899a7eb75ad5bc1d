//! Nanikiru (best-discard) trainer core.
//!
//! Normal-form shanten by exhaustive decomposition, improvement tiles,
//! best-discard selection, and generation of practice problems with an
//! optional dora/wind/turn context.

pub mod advanced;
pub mod batch;
pub mod config;
pub mod discard;
pub mod errors;
pub mod generator;
pub mod improvement;
pub mod seeding;
pub mod shanten;
pub mod tile;

pub use advanced::{generate_advanced_problem, AdvancedProblem};
pub use config::{Difficulty, GeneratorConfig};
pub use discard::{best_discards, check_discard, DiscardAnalysis, DiscardCandidate, Solution};
pub use errors::{NnkrError, NnkrResult};
pub use generator::{generate_problem, Problem, ProblemGenerator};
pub use improvement::improvement_tiles;
pub use shanten::{shanten, ShantenRule};
pub use tile::{next_tile_in_sequence, tile_count, Hand, Tile};
