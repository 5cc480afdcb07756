//! mcsolve - Monte Carlo tree search puzzle solver
//!
//! A batch process that:
//! 1. Loads settings from config.toml, env vars and the command line
//! 2. Builds the configured puzzle
//! 3. Runs one seeded search per run across a pool of worker threads
//! 4. Prints every winning state found and a batch summary

use anyhow::{anyhow, Result};
use clap::Parser;
use mcts::CancelToken;
use std::time::Instant;
use tracing::{error, info, warn};

mod config;
mod runner;

use crate::config::Config;
use crate::runner::{BatchSummary, RunReport, RunResult};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let limit_description = match (config.max_iterations, config.timeout()) {
        (0, None) => "until solved".to_string(),
        (0, Some(t)) => format!("for up to {:?}", t),
        (n, None) => format!("for up to {} iterations", n),
        (n, Some(t)) => format!("for up to {} iterations or {:?}", n, t),
    };
    info!(
        seed = %config.seed,
        exploration = config.exploration,
        "Each search runs {}", limit_description
    );

    let start = Instant::now();
    let cancel = CancelToken::new();
    let reports = match runner::solve(&config, &cancel) {
        Ok(reports) => reports,
        Err(e) => {
            error!("Solver failed: {}", e);
            return Err(e);
        }
    };

    for report in &reports {
        match &report.result {
            RunResult::Solved {
                path_len,
                rendering,
            } => {
                println!(
                    "run {} (seed {}): solved in {} iterations ({:.2?}, {} tree nodes), {} actions",
                    report.run,
                    report.seed,
                    report.iterations,
                    report.elapsed,
                    report.tree_nodes,
                    path_len
                );
                println!("{}", rendering);
            }
            RunResult::Exhausted(reason) => {
                println!(
                    "run {} (seed {}): no solution after {} iterations ({:?})",
                    report.run, report.seed, report.iterations, reason
                );
            }
            RunResult::Failed(message) => {
                println!("run {} (seed {}): failed: {}", report.run, report.seed, message);
            }
        }
    }

    let summary = BatchSummary::from_reports(&reports);
    info!(
        solved = summary.solved,
        exhausted = summary.exhausted,
        failed = summary.failed,
        total_iterations = summary.total_iterations,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Batch complete"
    );

    if !reports.iter().any(RunReport::is_solved) {
        warn!("No run found a solution");
    }

    if summary.failed > 0 {
        return Err(anyhow!("{} of {} runs failed", summary.failed, reports.len()));
    }

    Ok(())
}
