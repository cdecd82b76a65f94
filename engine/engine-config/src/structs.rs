//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// Serde default functions (required for #[serde(default = "...")])
fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_size() -> i64 {
    defaults::game_size()
}
fn d_four_chance() -> f64 {
    defaults::four_chance()
}

/// Root configuration loaded from config.toml
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SlideConfig {
    pub common: CommonConfig,
    pub game: GameConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Settings for newly created games
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length of the first game
    #[serde(default = "d_size")]
    pub size: i64,
    /// Probability that a spawned tile is a 4
    #[serde(default = "d_four_chance")]
    pub four_chance: f64,
    /// Fixed RNG seed (None = random seed per game)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: defaults::game_size(),
            four_chance: defaults::four_chance(),
            seed: None,
        }
    }
}
