//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file is embedded at compile time so the binary and the
//! checked-in documentation of every key can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    pool: PoolDefaults,
    puzzle: PuzzleDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    seed: String,
    runs: usize,
    exploration: f64,
    max_iterations: u64,
    timeout_secs: u64,
    log_interval: u64,
}

#[derive(Debug, Deserialize)]
struct PoolDefaults {
    num_workers: usize,
}

#[derive(Debug, Deserialize)]
struct PuzzleDefaults {
    kind: String,
    size: usize,
    numbers: Vec<u64>,
    target: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn seed() -> &'static str {
    &DEFAULTS.search.seed
}
pub fn runs() -> usize {
    DEFAULTS.search.runs
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn max_iterations() -> u64 {
    DEFAULTS.search.max_iterations
}
pub fn timeout_secs() -> u64 {
    DEFAULTS.search.timeout_secs
}
pub fn log_interval() -> u64 {
    DEFAULTS.search.log_interval
}

// Pool
pub fn num_workers() -> usize {
    DEFAULTS.pool.num_workers
}

// Puzzle
pub fn puzzle_kind() -> &'static str {
    &DEFAULTS.puzzle.kind
}
pub fn puzzle_size() -> usize {
    DEFAULTS.puzzle.size
}
pub fn puzzle_numbers() -> &'static [u64] {
    &DEFAULTS.puzzle.numbers
}
pub fn puzzle_target() -> u64 {
    DEFAULTS.puzzle.target
}
