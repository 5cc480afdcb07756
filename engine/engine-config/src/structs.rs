//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> String {
    defaults::seed().into()
}
fn d_runs() -> usize {
    defaults::runs()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_max_iterations() -> u64 {
    defaults::max_iterations()
}
fn d_timeout_secs() -> u64 {
    defaults::timeout_secs()
}
fn d_log_interval() -> u64 {
    defaults::log_interval()
}
fn d_num_workers() -> usize {
    defaults::num_workers()
}
fn d_kind() -> String {
    defaults::puzzle_kind().into()
}
fn d_size() -> usize {
    defaults::puzzle_size()
}
fn d_numbers() -> Vec<u64> {
    defaults::puzzle_numbers().to_vec()
}
fn d_target() -> u64 {
    defaults::puzzle_target()
}

// ============================================================================
// Configuration structs
// ============================================================================

/// Root configuration structure matching config.toml.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub puzzle: PuzzleConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: d_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "d_seed")]
    pub seed: String,
    #[serde(default = "d_runs")]
    pub runs: usize,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// 0 disables the iteration cap
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u64,
    /// 0 disables the wall-clock limit
    #[serde(default = "d_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "d_log_interval")]
    pub log_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: d_seed(),
            runs: d_runs(),
            exploration: d_exploration(),
            max_iterations: d_max_iterations(),
            timeout_secs: d_timeout_secs(),
            log_interval: d_log_interval(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PoolConfig {
    #[serde(default = "d_num_workers")]
    pub num_workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_workers: d_num_workers(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PuzzleConfig {
    #[serde(default = "d_kind")]
    pub kind: String,
    #[serde(default = "d_size")]
    pub size: usize,
    #[serde(default = "d_numbers")]
    pub numbers: Vec<u64>,
    #[serde(default = "d_target")]
    pub target: u64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            kind: d_kind(),
            size: d_size(),
            numbers: d_numbers(),
            target: d_target(),
        }
    }
}
