//! The capability contract every searchable state must satisfy.
//!
//! A state is a problem-defined position in a state-transition space. The
//! search engine never inspects it beyond the methods below; everything
//! domain-specific (boards, numbers, shared problem data) lives behind the
//! trait. Shared read-only problem data is usually held as an `Arc` so that
//! every state produced during one search points at the same payload.

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

/// Errors raised by a state implementation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    /// `apply_action` was called with an action that is not currently available.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// The implementation broke one of its documented invariants.
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl StateError {
    /// Build an `InvalidAction` error from any debuggable action.
    pub fn invalid_action(action: &impl Debug) -> Self {
        Self::InvalidAction(format!("{:?}", action))
    }

    /// Standard error for `terminal_value` called on a live state.
    pub fn not_terminal() -> Self {
        Self::ContractViolation("terminal value requested for a non-terminal state".into())
    }
}

/// A state in the search space.
///
/// # Contract
///
/// * `available_actions` must be non-empty whenever `is_terminal` is false, and
///   must return the same sequence every time it is called on the same state.
///   Expansion and rollout consult it independently.
/// * `terminal_value` is only defined for terminal states.
/// * `is_winning` is only consulted on terminal states reached by a rollout.
///
/// # Example
///
/// ```rust
/// use mcts::{SearchState, StateError};
///
/// /// Count up from zero; reaching exactly 3 wins, overshooting loses.
/// #[derive(Debug, Clone)]
/// struct Counter(u32);
///
/// impl SearchState for Counter {
///     type Action = u32;
///
///     fn is_winning(&self) -> bool {
///         self.0 == 3
///     }
///
///     fn is_terminal(&self) -> bool {
///         self.0 >= 3
///     }
///
///     fn terminal_value(&self) -> Result<f64, StateError> {
///         if !self.is_terminal() {
///             return Err(StateError::not_terminal());
///         }
///         Ok(if self.is_winning() { 1.0 } else { 0.0 })
///     }
///
///     fn available_actions(&self) -> Vec<u32> {
///         if self.is_terminal() { Vec::new() } else { vec![1, 2] }
///     }
///
///     fn apply_action(&self, step: &u32) -> Result<Self, StateError> {
///         if !self.available_actions().contains(step) {
///             return Err(StateError::invalid_action(step));
///         }
///         Ok(Counter(self.0 + step))
///     }
/// }
/// ```
pub trait SearchState: Sized + Clone + Debug {
    /// Identifier for a transition. Unique among one state's available actions.
    type Action: Clone + Eq + Hash + Debug;

    /// True iff this state is an outright win. Ends the whole search when a
    /// rollout lands here.
    fn is_winning(&self) -> bool;

    /// True iff no further action can be applied.
    fn is_terminal(&self) -> bool;

    /// Reward fed into backpropagation. Only valid on terminal states.
    fn terminal_value(&self) -> Result<f64, StateError>;

    /// Actions that can be applied from this state, in a stable order.
    fn available_actions(&self) -> Vec<Self::Action>;

    /// Produce the successor state reached by `action`.
    fn apply_action(&self, action: &Self::Action) -> Result<Self, StateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StateError::invalid_action(&"Z");
        assert_eq!(err.to_string(), "Invalid action: \"Z\"");

        let err = StateError::not_terminal();
        assert!(matches!(err, StateError::ContractViolation(_)));
        assert!(err.to_string().starts_with("Contract violation"));
    }
}
