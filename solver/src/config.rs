//! Configuration for the solver binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::{CancelToken, MctsConfig, SearchLimit, Seed};
use once_cell::sync::Lazy;
use puzzles::PuzzleKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_puzzle() -> String {
    CENTRAL_CONFIG.puzzle.kind.clone()
}

fn default_size() -> usize {
    CENTRAL_CONFIG.puzzle.size
}

fn default_numbers() -> Vec<u64> {
    CENTRAL_CONFIG.puzzle.numbers.clone()
}

fn default_target() -> u64 {
    CENTRAL_CONFIG.puzzle.target
}

fn default_seed() -> String {
    CENTRAL_CONFIG.search.seed.clone()
}

fn default_runs() -> usize {
    CENTRAL_CONFIG.search.runs
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.search.exploration
}

fn default_max_iterations() -> u64 {
    CENTRAL_CONFIG.search.max_iterations
}

fn default_timeout_secs() -> u64 {
    CENTRAL_CONFIG.search.timeout_secs
}

fn default_log_interval() -> u64 {
    CENTRAL_CONFIG.search.log_interval
}

fn default_num_workers() -> usize {
    CENTRAL_CONFIG.pool.num_workers
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "mcsolve")]
#[command(about = "Monte Carlo tree search puzzle solver")]
#[command(
    long_about = "Runs independent, seeded Monte Carlo tree searches over a puzzle
and reports the first winning state each run finds.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Puzzle to solve (n-queens, subset-sum)
    #[arg(long, default_value_t = default_puzzle())]
    pub puzzle: String,

    /// Board size for n-queens
    #[arg(long, default_value_t = default_size())]
    pub size: usize,

    /// Comma-separated pool of numbers for subset-sum
    #[arg(long, value_delimiter = ',', default_values_t = default_numbers())]
    pub numbers: Vec<u64>,

    /// Target sum for subset-sum
    #[arg(long, default_value_t = default_target())]
    pub target: u64,

    /// Base seed; integers seed directly, anything else is hashed
    #[arg(long, default_value_t = default_seed())]
    pub seed: String,

    /// Number of independent searches to run
    #[arg(long, default_value_t = default_runs())]
    pub runs: usize,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Iteration cap per search (0 for no cap)
    #[arg(long, default_value_t = default_max_iterations())]
    pub max_iterations: u64,

    /// Wall-clock limit per search in seconds (0 for no limit)
    #[arg(long, default_value_t = default_timeout_secs())]
    pub timeout_secs: u64,

    /// Log search progress every N iterations (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u64,

    /// Worker threads running searches in parallel
    #[arg(long, default_value_t = default_num_workers())]
    pub num_workers: usize,

    /// Stop the remaining searches once any run finds a solution
    #[arg(long)]
    pub first_win: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let kind = self.puzzle_kind()?;

        if kind == PuzzleKind::NQueens && self.size == 0 {
            return Err(anyhow!("size must be greater than 0"));
        }

        if kind == PuzzleKind::SubsetSum && self.numbers.is_empty() {
            return Err(anyhow!("numbers cannot be empty"));
        }

        if self.runs == 0 {
            return Err(anyhow!("runs must be greater than 0"));
        }

        if self.num_workers == 0 {
            return Err(anyhow!("num_workers must be greater than 0"));
        }

        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(anyhow!(
                "exploration must be a finite, non-negative number, got {}",
                self.exploration
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

    pub fn puzzle_kind(&self) -> Result<PuzzleKind> {
        Ok(self.puzzle.parse::<PuzzleKind>()?)
    }

    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig::default()
            .with_exploration(self.exploration)
            .with_log_interval(self.log_interval)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Limit for one search, started now.
    ///
    /// With neither an iteration cap nor a timeout the search only stops on a
    /// win or when `cancel` fires.
    pub fn search_limit(&self, cancel: &CancelToken) -> SearchLimit {
        let mut limit = SearchLimit::cancel(cancel.clone());
        if self.max_iterations > 0 {
            limit = limit.with_iterations(self.max_iterations);
        }
        if let Some(timeout) = self.timeout() {
            limit = limit.with_timeout(timeout);
        }
        limit
    }

    /// Seed for run `index`.
    ///
    /// Run 0 uses the base seed as given. Later runs offset an integer seed
    /// or suffix a text seed, so every run explores differently while the
    /// whole batch stays reproducible.
    pub fn run_seed(&self, index: usize) -> Seed {
        let base: Seed = self.seed.parse().unwrap_or_else(|e| match e {});
        if index == 0 {
            return base;
        }
        match base {
            Seed::Int(n) => Seed::Int(n.wrapping_add(index as u64)),
            Seed::Text(text) => Seed::Text(format!("{}-{}", text, index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            puzzle: "n-queens".into(),
            size: 8,
            numbers: vec![3, 34, 4, 12, 5, 2],
            target: 9,
            seed: "42".into(),
            runs: 4,
            exploration: std::f64::consts::SQRT_2,
            max_iterations: 1000,
            timeout_secs: 30,
            log_interval: 0,
            num_workers: 2,
            first_win: false,
            log_level: "info".into(),
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_puzzle() {
        let mut cfg = base_config();
        cfg.puzzle = "sudoku".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("sudoku"));
    }

    #[test]
    fn validate_rejects_zero_queens() {
        let mut cfg = base_config();
        cfg.size = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn validate_ignores_size_for_subset_sum() {
        let mut cfg = base_config();
        cfg.puzzle = "subset-sum".into();
        cfg.size = 0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_numbers() {
        let mut cfg = base_config();
        cfg.puzzle = "subset-sum".into();
        cfg.numbers.clear();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("numbers"));
    }

    #[test]
    fn validate_rejects_zero_runs() {
        let mut cfg = base_config();
        cfg.runs = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("runs"));
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let mut cfg = base_config();
        cfg.num_workers = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("num_workers"));
    }

    #[test]
    fn validate_rejects_bad_exploration() {
        let mut cfg = base_config();
        cfg.exploration = -1.0;
        assert!(cfg.validate().is_err());

        cfg.exploration = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn search_limit_applies_caps() {
        let cfg = base_config();
        let limit = cfg.search_limit(&CancelToken::new());
        assert_eq!(limit.max_iterations, Some(1000));
        assert!(limit.deadline.is_some());
        assert!(limit.cancel.is_some());
    }

    #[test]
    fn search_limit_zero_means_no_cap() {
        let mut cfg = base_config();
        cfg.max_iterations = 0;
        cfg.timeout_secs = 0;
        let limit = cfg.search_limit(&CancelToken::new());
        assert_eq!(limit.max_iterations, None);
        assert_eq!(limit.deadline, None);
        assert_eq!(cfg.timeout(), None);
    }

    #[test]
    fn run_seeds_are_distinct_and_stable() {
        let mut cfg = base_config();
        assert_eq!(cfg.run_seed(0), Seed::Int(42));
        assert_eq!(cfg.run_seed(3), Seed::Int(45));

        cfg.seed = "puzzle-night".into();
        assert_eq!(cfg.run_seed(0), Seed::Text("puzzle-night".into()));
        assert_eq!(cfg.run_seed(2), Seed::Text("puzzle-night-2".into()));
    }

    #[test]
    fn mcts_config_carries_settings() {
        let mut cfg = base_config();
        cfg.exploration = 0.5;
        cfg.log_interval = 100;
        let mcts = cfg.mcts_config();
        assert_eq!(mcts.exploration, 0.5);
        assert_eq!(mcts.log_interval, 100);
    }
}
