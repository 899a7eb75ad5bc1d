//! Generator configuration.
//!
//! `GeneratorConfig::from_env` reads `NNKR_MAX_ATTEMPTS` and
//! `NNKR_SHANTEN_RULE` (`observed` or `reference`); anything unset or
//! unparsable keeps its default.

use serde::{Deserialize, Serialize};

use crate::shanten::ShantenRule;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Rejection-sampling attempts before giving up.
    pub max_attempts: u32,
    /// Chance a hand is seeded with honor pairs or triplets.
    pub honor_chance: f64,
    /// Chance a numeral suit starts with a complete run.
    pub run_chance: f64,
    /// Chance a numeral suit starts with a two-tile partial.
    /// Whatever is left of `1 - run_chance - partial_chance` is a single tile.
    pub partial_chance: f64,
    pub shanten_rule: ShantenRule,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            honor_chance: 0.3,
            run_chance: 0.4,
            partial_chance: 0.35,
            shanten_rule: ShantenRule::Observed,
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GeneratorConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(attempts) = lookup("NNKR_MAX_ATTEMPTS").and_then(|s| s.trim().parse().ok()) {
            config.max_attempts = attempts;
        }
        if let Some(rule) = lookup("NNKR_SHANTEN_RULE").and_then(|s| parse_rule(&s)) {
            config.shanten_rule = rule;
        }
        config
    }
}

fn parse_rule(s: &str) -> Option<ShantenRule> {
    match s.trim().to_ascii_lowercase().as_str() {
        "observed" => Some(ShantenRule::Observed),
        "reference" => Some(ShantenRule::Reference),
        _ => None,
    }
}

/// Trainer modes and the shanten band each one asks the generator for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Normal,
    Advanced,
}

impl Difficulty {
    /// `(min_shanten, max_shanten)` passed to the generator.
    pub const fn shanten_band(self) -> (i8, i8) {
        match self {
            Difficulty::Normal => (1, 3),
            Difficulty::Advanced => (2, 4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.max_attempts, 10_000);
        assert_eq!(config.shanten_rule, ShantenRule::Observed);
        assert!(config.run_chance + config.partial_chance <= 1.0);
    }

    #[test]
    fn lookup_overrides() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("NNKR_MAX_ATTEMPTS", "25"),
            ("NNKR_SHANTEN_RULE", "Reference"),
        ]));
        assert_eq!(config.max_attempts, 25);
        assert_eq!(config.shanten_rule, ShantenRule::Reference);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("NNKR_MAX_ATTEMPTS", "many"),
            ("NNKR_SHANTEN_RULE", "strict"),
        ]));
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"max_attempts": 3, "shanten_rule": "reference"}"#).unwrap();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.shanten_rule, ShantenRule::Reference);
        assert_eq!(config.honor_chance, 0.3);
    }

    #[test]
    fn difficulty_bands() {
        assert_eq!(Difficulty::Normal.shanten_band(), (1, 3));
        assert_eq!(Difficulty::Advanced.shanten_band(), (2, 4));
    }
}
