use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunable constants of the combat rules. The defaults are the published rules; a TOML file only
/// needs to name the values it changes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Number of dice rolled when a pool would otherwise be empty or negative.
    pub desperation_dice: usize,

    /// Dice removed from the base pool of a classic automatic fire roll.
    pub automatic_fire_penalty: i32,

    /// Upper bound on the dice of a single automatic fire chain.
    pub chain_iteration_cap: usize,

    pub max_stress: u32,

    pub full_auto: FullAutoRules,
}

impl Default for RulesConfig {
    fn default() -> RulesConfig {
        RulesConfig {
            desperation_dice: 2,
            automatic_fire_penalty: 2,
            chain_iteration_cap: 1000,
            max_stress: 10,
            full_auto: FullAutoRules::default(),
        }
    }
}

impl RulesConfig {

    pub fn from_toml_str(content: &str) -> Result<RulesConfig, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<RulesConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        RulesConfig::from_toml_str(&content)
    }
}

/// Full-auto fire of the combat overhaul ruleset.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct FullAutoRules {
    pub attacks: usize,
    pub high_capacity_attacks: usize,

    /// Added to every attack's pool unless the shooter is a machine gunner.
    pub per_attack_penalty: i32,
}

impl Default for FullAutoRules {
    fn default() -> FullAutoRules {
        FullAutoRules {
            attacks: 3,
            high_capacity_attacks: 4,
            per_attack_penalty: -2,
        }
    }
}
