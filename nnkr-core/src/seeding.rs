//! Deterministic randomness for problem generation.
//!
//! - Per-chat problem seeds via a SHA-256 KDF
//! - Vendored Fisher-Yates shuffle for cross-version determinism
//! - The dice primitive the generator draws its shape decisions from
//!
//! Given the same seed, `generate_problem` produces the same hand on any
//! platform and thread count.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// RNG used for reproducible problems.
pub type ProblemRng = ChaCha8Rng;

/// Vendored Fisher-Yates shuffle.
///
/// Does NOT depend on `rand::seq::SliceRandom`, whose internal algorithm may
/// change across rand versions; a stored seed must keep producing the same
/// hand.
pub fn fisher_yates_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Roll `n` dice with `sides` faces each. Every value is in `1..=sides`.
///
/// A zero-sided die has no faces and yields no rolls.
pub fn roll_dice(n: usize, sides: u32, rng: &mut impl Rng) -> Vec<u32> {
    if sides == 0 {
        return Vec::new();
    }
    (0..n).map(|_| rng.random_range(1..=sides)).collect()
}

/// One d100 roll.
pub fn roll_percent(rng: &mut impl Rng) -> u32 {
    rng.random_range(1..=100)
}

/// `chance` (clamped to 0..=1) as a d100 threshold.
pub fn chance_to_percent(chance: f64) -> u32 {
    (chance.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// True with probability `chance`, rolled on a d100.
pub fn percent_check(chance: f64, rng: &mut impl Rng) -> bool {
    roll_percent(rng) <= chance_to_percent(chance)
}

/// Seed for the `nonce`-th problem posted in a chat.
///
/// `SHA-256(session_seed || chat_id_le || nonce_le)`.
pub fn derive_problem_seed(session_seed: &[u8; 32], chat_id: i64, nonce: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(session_seed);
    hasher.update(chat_id.to_le_bytes());
    hasher.update(nonce.to_le_bytes());
    hasher.finalize().into()
}

pub fn problem_rng(seed: u64) -> ProblemRng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn problem_rng_from_bytes(seed: [u8; 32]) -> ProblemRng {
    ChaCha8Rng::from_seed(seed)
}

/// Hands out one fresh problem seed per call for a single chat.
///
/// # Example
///
/// ```
/// use nnkr_core::seeding::ChatRng;
///
/// let mut chat = ChatRng::new([0u8; 32], 42);
/// let a = chat.next_problem_seed();
/// let b = chat.next_problem_seed();
/// assert_ne!(a, b);
/// ```
pub struct ChatRng {
    session_seed: [u8; 32],
    chat_id: i64,
    nonce: u64,
}

impl ChatRng {
    pub fn new(session_seed: [u8; 32], chat_id: i64) -> Self {
        Self {
            session_seed,
            chat_id,
            nonce: 0,
        }
    }

    /// Number of seeds handed out so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn next_problem_seed(&mut self) -> [u8; 32] {
        let seed = derive_problem_seed(&self.session_seed, self.chat_id, self.nonce);
        self.nonce += 1;
        seed
    }

    pub fn next_rng(&mut self) -> ProblemRng {
        problem_rng_from_bytes(self.next_problem_seed())
    }
}
