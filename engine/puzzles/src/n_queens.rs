//! N-queens: place one queen per row so that no two attack each other.
//!
//! Queens are placed row by row; the actions of a state are the columns of
//! the next row that no placed queen attacks. A state is a dead end when that
//! set is empty before the board is full.

use std::fmt;
use mcts::{SearchState, StateError};

use crate::PuzzleError;

/// A partially filled board.
#[derive(Debug, Clone)]
pub struct NQueens {
    size: usize,
    /// Column of the queen in each filled row
    queens: Vec<usize>,
}

impl NQueens {
    /// Create an empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self, PuzzleError> {
        if size == 0 {
            return Err(PuzzleError::InvalidSize(size));
        }
        Ok(Self {
            size,
            queens: Vec::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Column of the queen in each filled row.
    pub fn queens(&self) -> &[usize] {
        &self.queens
    }

    /// True when every row holds a queen.
    pub fn is_solution(&self) -> bool {
        self.queens.len() == self.size()
    }

    fn attacked(&self, col: usize) -> bool {
        let row = self.queens.len();
        self.queens
            .iter()
            .enumerate()
            .any(|(r, &c)| c == col || row - r == c.abs_diff(col))
    }

    /// Columns of the next row that no placed queen attacks.
    fn safe_columns(&self) -> Vec<usize> {
        if self.is_solution() {
            return Vec::new();
        }
        (0..self.size()).filter(|&col| !self.attacked(col)).collect()
    }
}

impl SearchState for NQueens {
    type Action = usize;

    fn is_winning(&self) -> bool {
        self.is_solution()
    }

    fn is_terminal(&self) -> bool {
        self.safe_columns().is_empty()
    }

    /// Fraction of rows filled.
    fn terminal_value(&self) -> Result<f64, StateError> {
        if !self.is_terminal() {
            return Err(StateError::not_terminal());
        }
        Ok(self.queens.len() as f64 / self.size() as f64)
    }

    fn available_actions(&self) -> Vec<usize> {
        self.safe_columns()
    }

    fn apply_action(&self, col: &usize) -> Result<Self, StateError> {
        if self.is_solution() || *col >= self.size() || self.attacked(*col) {
            return Err(StateError::invalid_action(col));
        }
        let mut next = self.clone();
        next.queens.push(*col);
        Ok(next)
    }
}

impl fmt::Display for NQueens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size() {
            let line: String = (0..self.size())
                .map(|col| match self.queens.get(row) {
                    Some(&c) if c == col => 'Q',
                    _ => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
