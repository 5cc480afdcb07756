//! Subset-sum: pick numbers so that they add up to an exact target.
//!
//! Numbers are taken in ascending index order, so every subset is reached by
//! exactly one action sequence. A state ends once the running sum reaches or
//! passes the target, or when no numbers are left to take.

use std::fmt;
use std::sync::Arc;

use mcts::{SearchState, StateError};

/// The puzzle definition shared by every state of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetSumProblem {
    pub numbers: Vec<u64>,
    pub target: u64,
}

/// A partial selection of numbers.
#[derive(Debug, Clone)]
pub struct SubsetSum {
    problem: Arc<SubsetSumProblem>,
    /// Indices taken so far, ascending
    chosen: Vec<usize>,
    sum: u64,
}

impl SubsetSum {
    /// Create the initial (empty selection) state.
    pub fn new(numbers: Vec<u64>, target: u64) -> Self {
        Self::from_problem(Arc::new(SubsetSumProblem { numbers, target }))
    }

    pub fn from_problem(problem: Arc<SubsetSumProblem>) -> Self {
        Self {
            problem,
            chosen: Vec::new(),
            sum: 0,
        }
    }

    pub fn problem(&self) -> &SubsetSumProblem {
        &self.problem
    }

    /// Indices taken so far, ascending.
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    /// Values taken so far, in index order.
    pub fn chosen_values(&self) -> Vec<u64> {
        self.chosen.iter().map(|&i| self.problem.numbers[i]).collect()
    }

    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// First index that may still be taken.
    fn next_index(&self) -> usize {
        self.chosen.last().map_or(0, |&i| i + 1)
    }
}

impl SearchState for SubsetSum {
    type Action = usize;

    fn is_winning(&self) -> bool {
        self.sum == self.problem.target
    }

    fn is_terminal(&self) -> bool {
        self.sum >= self.problem.target || self.next_index() >= self.problem.numbers.len()
    }

    /// 1.0 for an exact hit, falling off linearly with the distance to the target.
    fn terminal_value(&self) -> Result<f64, StateError> {
        if !self.is_terminal() {
            return Err(StateError::not_terminal());
        }
        let target = self.problem.target;
        if target == 0 {
            return Ok(if self.sum == 0 { 1.0 } else { 0.0 });
        }
        let distance = self.sum.abs_diff(target) as f64;
        Ok(1.0 - distance / target as f64)
    }

    fn available_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        (self.next_index()..self.problem.numbers.len()).collect()
    }

    fn apply_action(&self, index: &usize) -> Result<Self, StateError> {
        let index = *index;
        if self.is_terminal() || index < self.next_index() || index >= self.problem.numbers.len() {
            return Err(StateError::invalid_action(&index));
        }

        let mut next = self.clone();
        next.chosen.push(index);
        next.sum += self.problem.numbers[index];
        Ok(next)
    }
}

impl fmt::Display for SubsetSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.chosen.is_empty() {
            return write!(f, "0 (target {})", self.problem.target);
        }
        let terms: Vec<String> = self.chosen_values().iter().map(u64::to_string).collect();
        write!(
            f,
            "{} = {} (target {})",
            terms.join(" + "),
            self.sum,
            self.problem.target
        )
    }
}
