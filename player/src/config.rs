//! Configuration for the slide player
//!
//! Defaults come from config.toml (with `SLIDE_*` environment overrides
//! applied by engine-config). CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, SlideConfig};
use engine_games::{is_valid_game_size, supported_sizes, SizeTag};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<SlideConfig> = Lazy::new(load_config);

fn default_size() -> SizeTag {
    CENTRAL_CONFIG.game.size
}

fn default_four_chance() -> f64 {
    CENTRAL_CONFIG.game.four_chance
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "slide")]
#[command(about = "Play 2048 in the terminal on any compiled board size")]
#[command(
    long_about = "Interactive 2048 player. Moves are read one per line from stdin
(w/a/s/d or up/left/down/right) and the board is printed after each command.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Board side length of the first game
    #[arg(long, default_value_t = default_size(), allow_negative_numbers = true)]
    pub size: SizeTag,

    /// Probability that a spawned tile is a 4
    #[arg(long, default_value_t = default_four_chance())]
    pub four_chance: f64,

    /// Seed for tile placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_game_size(self.size) {
            return Err(anyhow!(
                "unsupported board size {}, expected one of {}",
                self.size,
                supported_sizes()
            ));
        }

        if !(0.0..=1.0).contains(&self.four_chance) {
            return Err(anyhow!(
                "four_chance must be between 0 and 1, got {}",
                self.four_chance
            ));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Seed from the command line, falling back to config.toml
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.game.seed)
    }
}
