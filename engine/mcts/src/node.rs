//! Search tree node representation.
//!
//! Each node holds a state reached by taking an action from its parent, plus
//! the visit statistics used for UCB1 selection.

use crate::state::SearchState;

/// Value estimate of a node that has never received a simulation result.
pub const UNSET_VALUE: f64 = -1.0;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<S: SearchState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from parent (None for root)
    pub action: Option<S::Action>,

    /// Problem state at this node
    pub state: S,

    /// Number of simulation results propagated through this node
    pub visit_count: u32,

    /// Best simulated outcome seen through this node.
    /// Only ever raised, never averaged.
    pub value_estimate: f64,

    /// Children in expansion order: (action, NodeId) pairs.
    /// Empty until the node is expanded.
    pub children: Vec<(S::Action, NodeId)>,
}

impl<S: SearchState> SearchNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            visit_count: 0,
            value_estimate: UNSET_VALUE,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: S::Action, state: S) -> Self {
        Self {
            parent,
            action: Some(action),
            state,
            visit_count: 0,
            value_estimate: UNSET_VALUE,
            children: Vec::new(),
        }
    }

    /// A node is a leaf until a simulation result has passed through it,
    /// whether or not children were installed.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.visit_count == 0
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Look up the child reached by `action`.
    pub fn child(&self, action: &S::Action) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, id)| *id)
    }

    /// Fold one simulation result into this node's statistics.
    #[inline]
    pub(crate) fn record(&mut self, value: f64) {
        self.value_estimate = self.value_estimate.max(value);
        self.visit_count += 1;
    }

    /// UCB1 score used for selection.
    ///
    /// UCB1 = V + c * sqrt(ln(N_parent) / N)
    ///
    /// Unvisited nodes score `+inf` so they are always tried first.
    #[inline]
    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = self.visit_count as f64;
        let ln_parent = (parent_visits as f64).ln();
        self.value_estimate + exploration * (ln_parent / n).sqrt()
    }
}
