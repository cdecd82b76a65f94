//! Shared configuration for the Slide workspace.
//!
//! Every binary reads the same `config.toml` through [`load_config`]. Values
//! resolve in this order, first match wins:
//! 1. `SLIDE_<SECTION>_<KEY>` environment variables
//! 2. the config file (`$SLIDE_CONFIG`, `./config.toml` or `../config.toml`)
//! 3. `config.defaults.toml`, embedded at build time
//!
//! ```text
//! SLIDE_COMMON_LOG_LEVEL=debug
//! SLIDE_GAME_SIZE=5
//! SLIDE_GAME_FOUR_CHANCE=0.1
//! SLIDE_GAME_SEED=1234
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::{four_chance, game_size, log_level};
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::{CommonConfig, GameConfig, SlideConfig};
