//! Puzzle domains for the mcts search engine
//!
//! Each puzzle implements [`mcts::SearchState`]. A state holds its position
//! plus an `Arc` to the puzzle definition, which every state produced during
//! one search shares read-only.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{run_mcts, MctsConfig, SearchLimit};
//! use puzzles::NQueens;
//!
//! let root = NQueens::new(5).unwrap();
//! let outcome = run_mcts(root, 42u64, MctsConfig::default(), &SearchLimit::iterations(10_000)).unwrap();
//! let solved = outcome.into_state().expect("5-queens is solvable");
//! assert!(solved.is_solution());
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod n_queens;
mod subset_sum;

pub use n_queens::NQueens;
pub use subset_sum::{SubsetSum, SubsetSumProblem};

/// Errors building a puzzle definition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PuzzleError {
    #[error("Unknown puzzle kind: {0} (expected subset-sum or n-queens)")]
    UnknownKind(String),

    #[error("Invalid puzzle size: {0}")]
    InvalidSize(usize),
}

/// The closed set of puzzles this crate provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleKind {
    SubsetSum,
    NQueens,
}

impl PuzzleKind {
    pub fn name(self) -> &'static str {
        match self {
            PuzzleKind::SubsetSum => "subset-sum",
            PuzzleKind::NQueens => "n-queens",
        }
    }
}

impl FromStr for PuzzleKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "subset-sum" => Ok(PuzzleKind::SubsetSum),
            "n-queens" | "nqueens" | "queens" => Ok(PuzzleKind::NQueens),
            _ => Err(PuzzleError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
