//! Generic Monte Carlo Tree Search for satisfiability-style problems.
//!
//! This crate searches any state space implementing [`SearchState`] for a
//! path to a *winning* terminal state. It is domain-agnostic: puzzles, games
//! and planning problems plug in by implementing the trait.
//!
//! # Overview
//!
//! Every iteration of the search runs these phases:
//!
//! 1. **Selection**: Descend the tree using UCB1 until reaching a node that
//!    has never received a simulation result
//! 2. **Rollout**: Play uniformly random actions from that node's state to a
//!    terminal state, without attaching the intermediate states to the tree
//! 3. **Win check**: If the terminal state is winning, stop and return it
//! 4. **Backpropagation**: Otherwise raise the value estimate (max, not mean)
//!    and bump the visit count of every node from the leaf to the root
//! 5. **Expansion**: Install a child for each action available at the leaf
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{run_mcts, MctsConfig, SearchLimit, SearchOutcome};
//!
//! let root = MyPuzzle::new();
//! let outcome = run_mcts(root, 42u64, MctsConfig::default(), &SearchLimit::iterations(10_000))?;
//!
//! match outcome {
//!     SearchOutcome::Won { path, iterations, .. } => {
//!         println!("Solved in {} iterations: {:?}", iterations, path);
//!     }
//!     SearchOutcome::Exhausted { reason, .. } => println!("Gave up: {:?}", reason),
//! }
//! ```
//!
//! # Stopping
//!
//! The loop itself only ends on a win. Callers pass a [`SearchLimit`]
//! (iteration cap, deadline, cancellation token) to bound it;
//! [`SearchLimit::unbounded`] opts into running until a win is found.
//!
//! # Architecture
//!
//! ```text
//! +-----------------------------------------------------------+
//! |                        MctsSearch                         |
//! +-----------------------------------------------------------+
//! |  +-------------+   +---------------+   +---------------+  |
//! |  | SearchTree  |   |  SearchState  |   | RolloutPolicy |  |
//! |  |  (arena)    |   | (problem sim) |   | (seeded rng)  |  |
//! |  +------+------+   +-------+-------+   +-------+-------+  |
//! |         |                  |                   |          |
//! |         v                  v                   v          |
//! |  +-----------------------------------------------------+  |
//! |  |   select -> rollout -> win check -> backpropagate   |  |
//! |  |                     -> expand                       |  |
//! |  +-----------------------------------------------------+  |
//! +-----------------------------------------------------------+
//! ```

pub mod config;
pub mod limit;
pub mod node;
pub mod rollout;
pub mod search;
pub mod state;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use limit::{CancelToken, SearchLimit, StopReason};
pub use node::{NodeId, SearchNode, UNSET_VALUE};
pub use rollout::{RolloutPolicy, Seed, UniformRollout};
pub use search::{run_mcts, MctsSearch, SearchError, SearchOutcome};
pub use state::{SearchState, StateError};
pub use tree::{SearchTree, TreeStats};
