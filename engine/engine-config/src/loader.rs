//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by MCSOLVE_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("MCSOLVE_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from MCSOLVE_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "MCSOLVE_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Parse a comma-separated list such as `3, 34, 4`.
pub(crate) fn parse_list<T: std::str::FromStr>(raw: &str) -> Option<Vec<T>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u64, usize, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Comma-separated list field
    ($config:expr, $section:ident . $field:ident, $key:expr, list) => {
        if let Some(v) = std::env::var($key).ok().and_then(|s| parse_list(&s)) {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: MCSOLVE_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "MCSOLVE_COMMON_LOG_LEVEL");

    // Search
    env_override!(config, search.seed, "MCSOLVE_SEARCH_SEED");
    env_override!(config, search.runs, "MCSOLVE_SEARCH_RUNS", parse);
    env_override!(
        config,
        search.exploration,
        "MCSOLVE_SEARCH_EXPLORATION",
        parse
    );
    env_override!(
        config,
        search.max_iterations,
        "MCSOLVE_SEARCH_MAX_ITERATIONS",
        parse
    );
    env_override!(
        config,
        search.timeout_secs,
        "MCSOLVE_SEARCH_TIMEOUT_SECS",
        parse
    );
    env_override!(
        config,
        search.log_interval,
        "MCSOLVE_SEARCH_LOG_INTERVAL",
        parse
    );

    // Pool
    env_override!(
        config,
        pool.num_workers,
        "MCSOLVE_POOL_NUM_WORKERS",
        parse
    );

    // Puzzle
    env_override!(config, puzzle.kind, "MCSOLVE_PUZZLE_KIND");
    env_override!(config, puzzle.size, "MCSOLVE_PUZZLE_SIZE", parse);
    env_override!(config, puzzle.numbers, "MCSOLVE_PUZZLE_NUMBERS", list);
    env_override!(config, puzzle.target, "MCSOLVE_PUZZLE_TARGET", parse);

    config
}
