//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the solver binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`MCSOLVE_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! MCSOLVE_<SECTION>_<KEY>=value
//!
//! Examples:
//!     MCSOLVE_COMMON_LOG_LEVEL=debug
//!     MCSOLVE_SEARCH_SEED=puzzle-night
//!     MCSOLVE_SEARCH_MAX_ITERATIONS=50000
//!     MCSOLVE_POOL_NUM_WORKERS=8
//!     MCSOLVE_PUZZLE_NUMBERS=3,34,4,12,5,2
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;

#[cfg(test)]
mod tests;
