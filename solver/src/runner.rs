//! Batch runner: one independent search per seed, fanned out over the worker pool.
//!
//! Runs share only the read-only root state. Each run owns its tree and its
//! random stream, so a run's result depends on its seed alone.

use anyhow::Result;
use mcts::{CancelToken, MctsSearch, SearchOutcome, SearchState, Seed, StopReason};
use puzzles::{NQueens, PuzzleKind, SubsetSum};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;

/// How one run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    /// A rollout reached a winning state.
    Solved {
        /// Number of actions from the root to the winning state
        path_len: usize,
        /// The winning state, rendered with its `Display` impl
        rendering: String,
    },
    /// The run hit its limit first.
    Exhausted(StopReason),
    /// The search reported an error.
    Failed(String),
}

/// Outcome and bookkeeping for a single run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run: usize,
    pub seed: Seed,
    pub iterations: u64,
    pub tree_nodes: usize,
    pub elapsed: Duration,
    pub result: RunResult,
}

impl RunReport {
    pub fn is_solved(&self) -> bool {
        matches!(self.result, RunResult::Solved { .. })
    }
}

/// Totals across a batch of runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub solved: usize,
    pub exhausted: usize,
    pub failed: usize,
    pub total_iterations: u64,
}

impl BatchSummary {
    pub fn from_reports(reports: &[RunReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.total_iterations += report.iterations;
            match report.result {
                RunResult::Solved { .. } => summary.solved += 1,
                RunResult::Exhausted(_) => summary.exhausted += 1,
                RunResult::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Build the configured puzzle and run the whole batch.
pub fn solve(config: &Config, cancel: &CancelToken) -> Result<Vec<RunReport>> {
    let kind = config.puzzle_kind()?;
    info!(
        puzzle = %kind,
        runs = config.runs,
        num_workers = config.num_workers,
        "Starting search batch"
    );

    match kind {
        PuzzleKind::NQueens => run_batch(NQueens::new(config.size)?, config, cancel),
        PuzzleKind::SubsetSum => run_batch(
            SubsetSum::new(config.numbers.clone(), config.target),
            config,
            cancel,
        ),
    }
}

/// Run `config.runs` searches from `root`, one seed each.
///
/// Reports come back in run order regardless of which worker finished first.
pub fn run_batch<S>(root: S, config: &Config, cancel: &CancelToken) -> Result<Vec<RunReport>>
where
    S: SearchState + fmt::Display + Sync,
{
    let inputs: Vec<(usize, Seed)> = (0..config.runs).map(|i| (i, config.run_seed(i))).collect();

    let reports = worker_pool::dispatch(
        |(run, seed)| run_one(&root, run, seed, config, cancel),
        inputs,
        config.num_workers,
    )?;

    Ok(reports)
}

fn run_one<S>(root: &S, run: usize, seed: Seed, config: &Config, cancel: &CancelToken) -> RunReport
where
    S: SearchState + fmt::Display,
{
    let start = Instant::now();
    let limit = config.search_limit(cancel);
    let mut search = MctsSearch::new(root.clone(), seed.clone(), config.mcts_config());
    debug!(run, %seed, "Run started");

    let result = match search.run(&limit) {
        Ok(SearchOutcome::Won { state, path, iterations }) => {
            info!(run, %seed, iterations, path_len = path.len(), "Solution found");
            if config.first_win {
                cancel.cancel();
            }
            RunResult::Solved {
                path_len: path.len(),
                rendering: state.to_string(),
            }
        }
        Ok(SearchOutcome::Exhausted { reason, iterations }) => {
            info!(run, %seed, iterations, ?reason, "Search stopped without a solution");
            RunResult::Exhausted(reason)
        }
        Err(e) => {
            warn!(run, %seed, error = %e, "Search failed");
            RunResult::Failed(e.to_string())
        }
    };

    RunReport {
        run,
        seed,
        iterations: search.iterations(),
        tree_nodes: search.tree().len(),
        elapsed: start.elapsed(),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(puzzle: &str) -> Config {
        Config {
            puzzle: puzzle.into(),
            size: 5,
            numbers: vec![3, 34, 4, 12, 5, 2],
            target: 9,
            seed: "7".into(),
            runs: 3,
            exploration: std::f64::consts::SQRT_2,
            max_iterations: 200_000,
            timeout_secs: 0,
            log_interval: 0,
            num_workers: 2,
            first_win: false,
            log_level: "info".into(),
        }
    }

    #[test]
    fn solves_small_queens_batch() {
        let config = test_config("n-queens");
        let reports = solve(&config, &CancelToken::new()).unwrap();

        assert_eq!(reports.len(), 3);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.run, i);
            assert_eq!(report.seed, config.run_seed(i));
            match &report.result {
                RunResult::Solved { path_len, rendering } => {
                    assert_eq!(*path_len, 5);
                    assert_eq!(rendering.matches('Q').count(), 5);
                }
                other => panic!("run {} did not solve: {:?}", i, other),
            }
        }
    }

    #[test]
    fn solves_subset_sum_batch() {
        let config = test_config("subset-sum");
        let reports = solve(&config, &CancelToken::new()).unwrap();
        assert!(reports.iter().all(RunReport::is_solved));
        for report in &reports {
            if let RunResult::Solved { rendering, .. } = &report.result {
                assert!(rendering.contains("= 9"));
            }
        }
    }

    #[test]
    fn unsolvable_batch_exhausts_each_run() {
        let mut config = test_config("subset-sum");
        config.numbers = vec![2, 4, 6, 8];
        config.target = 7;
        config.max_iterations = 50;

        let reports = solve(&config, &CancelToken::new()).unwrap();
        let summary = BatchSummary::from_reports(&reports);
        assert_eq!(summary.solved, 0);
        assert_eq!(summary.exhausted, 3);
        assert_eq!(summary.total_iterations, 150);
        for report in &reports {
            assert_eq!(report.result, RunResult::Exhausted(StopReason::IterationLimit));
        }
    }

    #[test]
    fn same_seed_reproduces_the_batch() {
        let config = test_config("n-queens");
        let first = solve(&config, &CancelToken::new()).unwrap();
        let second = solve(&config, &CancelToken::new()).unwrap();

        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.iterations, b.iterations);
            assert_eq!(a.tree_nodes, b.tree_nodes);
            assert_eq!(a.result, b.result);
        }
    }

    #[test]
    fn first_win_cancels_remaining_runs() {
        let mut config = test_config("n-queens");
        config.num_workers = 1;
        config.first_win = true;
        let cancel = CancelToken::new();

        let reports = solve(&config, &cancel).unwrap();
        assert!(reports[0].is_solved());
        assert!(cancel.is_cancelled());
        for report in &reports[1..] {
            assert_eq!(report.result, RunResult::Exhausted(StopReason::Cancelled));
            assert_eq!(report.iterations, 0);
        }
    }

    #[test]
    fn rejects_invalid_puzzle() {
        let mut config = test_config("n-queens");
        config.size = 0;
        assert!(solve(&config, &CancelToken::new()).is_err());
    }
}
