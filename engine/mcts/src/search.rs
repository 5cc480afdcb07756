//! Search loop implementation.
//!
//! Each iteration:
//! 1. Selection: descend from the root by UCB1 until reaching a leaf
//! 2. Rollout: play random actions from the leaf's state to a terminal state
//! 3. Win check: a winning terminal ends the search immediately
//! 4. Backpropagation: raise value estimates from the leaf up to the root
//! 5. Expansion: install the leaf's children
//!
//! Rollout states are never attached to the tree.

use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::limit::{SearchLimit, StopReason};
use crate::node::NodeId;
use crate::rollout::{RolloutPolicy, Seed, UniformRollout};
use crate::state::{SearchState, StateError};
use crate::tree::SearchTree;

/// Errors that abort a search run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

/// How a search run ended.
#[derive(Debug, Clone)]
pub enum SearchOutcome<S: SearchState> {
    /// A rollout reached a winning terminal state.
    Won {
        /// The winning terminal state
        state: S,
        /// Tree actions from the root to the selected leaf, then the rollout's actions
        path: Vec<S::Action>,
        /// Iteration on which the win was found (1-based)
        iterations: u64,
    },

    /// The search limit tripped before a win was found.
    Exhausted {
        reason: StopReason,
        iterations: u64,
    },
}

impl<S: SearchState> SearchOutcome<S> {
    pub fn is_won(&self) -> bool {
        matches!(self, SearchOutcome::Won { .. })
    }

    /// Number of completed iterations.
    pub fn iterations(&self) -> u64 {
        match self {
            SearchOutcome::Won { iterations, .. } | SearchOutcome::Exhausted { iterations, .. } => {
                *iterations
            }
        }
    }

    /// The winning state, if any.
    pub fn into_state(self) -> Option<S> {
        match self {
            SearchOutcome::Won { state, .. } => Some(state),
            SearchOutcome::Exhausted { .. } => None,
        }
    }
}

/// A winning terminal found by one iteration.
struct Win<S: SearchState> {
    state: S,
    path: Vec<S::Action>,
}

/// Search state: the tree, the rollout policy and progress counters.
pub struct MctsSearch<S: SearchState, P: RolloutPolicy = UniformRollout> {
    tree: SearchTree<S>,
    policy: P,
    config: MctsConfig,
    iterations: u64,
}

impl<S: SearchState> MctsSearch<S, UniformRollout> {
    /// Create a search over `root` with uniformly random rollouts.
    pub fn new(root: S, seed: impl Into<Seed>, config: MctsConfig) -> Self {
        let seed = seed.into();
        debug!(%seed, "Creating search");
        Self::with_policy(root, UniformRollout::new(&seed), config)
    }
}

impl<S: SearchState, P: RolloutPolicy> MctsSearch<S, P> {
    /// Create a search with a custom rollout policy.
    pub fn with_policy(root: S, policy: P, config: MctsConfig) -> Self {
        Self {
            tree: SearchTree::new(root),
            policy,
            config,
            iterations: 0,
        }
    }

    /// Run iterations until a rollout finds a win or `limit` trips.
    ///
    /// With [`SearchLimit::unbounded`] this only returns on a win or an error,
    /// so a state space without a reachable winning state never returns.
    pub fn run(&mut self, limit: &SearchLimit) -> Result<SearchOutcome<S>, SearchError> {
        debug!(
            start_iteration = self.iterations,
            max_iterations = ?limit.max_iterations,
            unbounded = limit.is_unbounded(),
            "Search starting"
        );

        loop {
            if let Some(reason) = limit.check(self.iterations) {
                let stats = self.tree.stats();
                debug!(
                    ?reason,
                    iterations = self.iterations,
                    nodes = stats.total_nodes,
                    root_value = stats.root_value,
                    "Search stopped without a win"
                );
                return Ok(SearchOutcome::Exhausted {
                    reason,
                    iterations: self.iterations,
                });
            }

            self.iterations += 1;
            if let Some(win) = self.simulate()? {
                debug!(
                    iterations = self.iterations,
                    path_len = win.path.len(),
                    nodes = self.tree.len(),
                    "Search found a winning state"
                );
                return Ok(SearchOutcome::Won {
                    state: win.state,
                    path: win.path,
                    iterations: self.iterations,
                });
            }

            if self.config.log_interval > 0 && self.iterations % self.config.log_interval == 0 {
                let stats = self.tree.stats();
                debug!(
                    iterations = self.iterations,
                    nodes = stats.total_nodes,
                    max_depth = stats.max_depth,
                    root_value = stats.root_value,
                    "Search progress"
                );
            }
        }
    }

    /// Run a single iteration (select -> rollout -> win check -> backpropagate -> expand).
    fn simulate(&mut self) -> Result<Option<Win<S>>, SearchError> {
        let leaf_id = self.select();
        let (terminal, rollout_path) = self.rollout(leaf_id)?;

        if terminal.is_winning() {
            let mut path = self.tree.action_path(leaf_id);
            path.extend(rollout_path);
            return Ok(Some(Win {
                state: terminal,
                path,
            }));
        }

        let value = terminal.terminal_value()?;
        self.tree.propagate(leaf_id, value);
        self.tree.expand(leaf_id)?;

        trace!(
            leaf = leaf_id.0,
            rollout_len = rollout_path.len(),
            value,
            "Iteration complete"
        );

        Ok(None)
    }

    /// Select a leaf by descending from the root along maximum UCB1 scores.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        while !self.tree.get(current).is_leaf() {
            match self.tree.select_child(current, self.config.exploration) {
                Some(child_id) => current = child_id,
                // Visited terminal node: nothing below it to descend into
                None => break,
            }
        }

        current
    }

    /// Play random actions from a node's state until a terminal state.
    /// Returns the terminal state and the actions taken to reach it.
    fn rollout(&mut self, node_id: NodeId) -> Result<(S, Vec<S::Action>), SearchError> {
        let mut state = self.tree.get(node_id).state.clone();
        let mut taken = Vec::new();

        while !state.is_terminal() {
            let actions = state.available_actions();
            if actions.is_empty() {
                return Err(SearchError::ContractViolation(format!(
                    "non-terminal state {:?} has no available actions",
                    state
                )));
            }

            let choice = self.policy.choose(actions.len());
            let action = actions.get(choice).cloned().ok_or_else(|| {
                SearchError::ContractViolation(format!(
                    "rollout policy chose index {} of {} actions",
                    choice,
                    actions.len()
                ))
            })?;

            state = state.apply_action(&action)?;
            taken.push(action);
        }

        Ok((state, taken))
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// Number of iterations run so far, across all calls to `run`.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

/// Convenience function to run a single seeded search.
pub fn run_mcts<S: SearchState>(
    root: S,
    seed: impl Into<Seed>,
    config: MctsConfig,
    limit: &SearchLimit,
) -> Result<SearchOutcome<S>, SearchError> {
    let mut search = MctsSearch::new(root, seed, config);
    search.run(limit)
}
