//! Parallel problem generation with rayon.
//!
//! Each problem `i` of a batch is drawn from its own RNG seeded with
//! `base_seed + i`, so a batch is reproducible regardless of thread count.

use log::info;
use rayon::prelude::*;

use crate::advanced::AdvancedProblem;
use crate::config::{Difficulty, GeneratorConfig};
use crate::errors::NnkrResult;
use crate::generator::{Problem, ProblemGenerator};
use crate::seeding::problem_rng;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub num_problems: usize,
    pub base_seed: u64,
    pub difficulty: Difficulty,
    /// Threads in the dedicated pool. `None` = rayon default (num CPUs).
    pub num_threads: Option<usize>,
    pub generator: GeneratorConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_problems: 100,
            base_seed: 0,
            difficulty: Difficulty::Normal,
            num_threads: None,
            generator: GeneratorConfig::default(),
        }
    }
}

fn log_summary<T>(kind: &str, results: &[NnkrResult<T>]) {
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(
        "generated {} {kind} problems ({failed} exhausted)",
        results.len() - failed
    );
}

fn run<T: Send>(
    config: &BatchConfig,
    make: impl Fn(&ProblemGenerator, u64) -> NnkrResult<T> + Sync,
) -> Vec<NnkrResult<T>> {
    let generator = ProblemGenerator::new(config.generator.clone());
    (0..config.num_problems)
        .into_par_iter()
        .map(|i| make(&generator, config.base_seed.wrapping_add(i as u64)))
        .collect()
}

fn normal(config: &BatchConfig) -> Vec<NnkrResult<Problem>> {
    let (min, max) = config.difficulty.shanten_band();
    let results = run(config, |g, seed| g.generate(min, max, &mut problem_rng(seed)));
    log_summary("normal", &results);
    results
}

fn advanced(config: &BatchConfig) -> Vec<NnkrResult<AdvancedProblem>> {
    let (min, max) = config.difficulty.shanten_band();
    let results = run(config, |g, seed| {
        g.generate_advanced(min, max, &mut problem_rng(seed))
    });
    log_summary("advanced", &results);
    results
}

/// Batch generator owning a dedicated rayon ThreadPool.
pub struct ProblemBatcher {
    pool: rayon::ThreadPool,
}

impl ProblemBatcher {
    pub fn new(num_threads: Option<usize>) -> anyhow::Result<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = num_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build thread pool: {}", e))?;
        Ok(Self { pool })
    }

    pub fn from_config(config: &BatchConfig) -> anyhow::Result<Self> {
        Self::new(config.num_threads)
    }

    pub fn generate(&self, config: &BatchConfig) -> Vec<NnkrResult<Problem>> {
        self.pool.install(|| normal(config))
    }

    pub fn generate_advanced(&self, config: &BatchConfig) -> Vec<NnkrResult<AdvancedProblem>> {
        self.pool.install(|| advanced(config))
    }
}

/// Convenience: run a batch on rayon's global thread pool.
pub fn generate_batch(config: &BatchConfig) -> Vec<NnkrResult<Problem>> {
    normal(config)
}

/// Advanced problems on rayon's global thread pool.
pub fn generate_advanced_batch(config: &BatchConfig) -> Vec<NnkrResult<AdvancedProblem>> {
    advanced(config)
}
