//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so every binary agrees on
//! the same values without shipping the file.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    game: GameDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    size: i64,
    four_chance: f64,
}

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Game
pub fn game_size() -> i64 {
    DEFAULTS.game.size
}
pub fn four_chance() -> f64 {
    DEFAULTS.game.four_chance
}
