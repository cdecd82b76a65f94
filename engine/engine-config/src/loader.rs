//! Locating and reading config.toml, then layering `SLIDE_*` overrides on top.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::SlideConfig;

/// Relative paths tried, in order, when `SLIDE_CONFIG` is not set
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config.toml", "../config.toml"];

/// Load the configuration every Slide binary starts from
///
/// The file named by `SLIDE_CONFIG` wins if it exists; otherwise the first
/// entry of [`CONFIG_SEARCH_PATHS`] that exists is used. With no file at all
/// the compiled-in defaults apply. Environment overrides are layered on in
/// every case.
pub fn load_config() -> SlideConfig {
    match locate_config() {
        Some(path) => load_from_path(&path),
        None => {
            debug!("No config.toml found, using built-in defaults");
            apply_env_overrides(SlideConfig::default())
        }
    }
}

fn locate_config() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("SLIDE_CONFIG").map(PathBuf::from) {
        if explicit.exists() {
            return Some(explicit);
        }
        warn!(path = %explicit.display(), "SLIDE_CONFIG points at a missing file");
    }
    CONFIG_SEARCH_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load configuration from `path`, falling back to defaults if it is
/// unreadable or malformed
pub fn load_from_path(path: &Path) -> SlideConfig {
    info!(path = %path.display(), "Loading configuration");
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| toml::from_str::<SlideConfig>(&text).map_err(|e| e.to_string()));

    let config = parsed.unwrap_or_else(|reason| {
        warn!(path = %path.display(), %reason, "Ignoring config file");
        SlideConfig::default()
    });
    apply_env_overrides(config)
}

macro_rules! env_override {
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(value) = std::env::var($key) {
            $config.$section.$field = value;
        }
    };
    ($config:expr, $section:ident . $field:ident, $key:expr, parsed) => {
        if let Some(value) = parse_var($key) {
            $config.$section.$field = value;
        }
    };
    ($config:expr, $section:ident . $field:ident, $key:expr, optional) => {
        if let Some(value) = parse_var($key) {
            $config.$section.$field = Some(value);
        }
    };
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(key, value = %raw, "Ignoring unparseable environment override");
    }
    parsed
}

/// Overwrite fields of `config` from `SLIDE_<SECTION>_<KEY>` variables
pub fn apply_env_overrides(mut config: SlideConfig) -> SlideConfig {
    env_override!(config, common.log_level, "SLIDE_COMMON_LOG_LEVEL");

    env_override!(config, game.size, "SLIDE_GAME_SIZE", parsed);
    env_override!(config, game.four_chance, "SLIDE_GAME_FOUR_CHANCE", parsed);
    env_override!(config, game.seed, "SLIDE_GAME_SEED", optional);

    config
}
