//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! Parent links and child lists are plain indices, so the back-references
//! never form ownership cycles. The tree only grows: nodes are never removed
//! during a search.

use tracing::trace;

use crate::node::{NodeId, SearchNode};
use crate::search::SearchError;
use crate::state::SearchState;

/// Search tree with arena-based node storage.
#[derive(Debug)]
pub struct SearchTree<S: SearchState> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: SearchState> SearchTree<S> {
    /// Create a new tree holding only the root state.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Get the total number of nodes in the arena, including orphaned subtrees.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up the child of `id` reached by `action`.
    pub fn child(&self, id: NodeId, action: &S::Action) -> Option<NodeId> {
        self.get(id).child(action)
    }

    fn allocate(&mut self, node: SearchNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Install `state` as the child of `parent_id` under `action`.
    ///
    /// An existing entry for the same action is replaced; the subtree it
    /// pointed at stays in the arena but is no longer reachable.
    pub fn insert_child(&mut self, parent_id: NodeId, action: S::Action, state: S) -> NodeId {
        let child_id = self.allocate(SearchNode::new_child(parent_id, action.clone(), state));

        let parent = self.get_mut(parent_id);
        match parent.children.iter_mut().find(|(a, _)| *a == action) {
            Some(slot) => slot.1 = child_id,
            None => parent.children.push((action, child_id)),
        }

        child_id
    }

    /// Expand a node by installing one child per available action.
    ///
    /// Terminal nodes get no children. A live node reporting no actions
    /// breaks the state contract. Returns the number of children installed.
    pub fn expand(&mut self, node_id: NodeId) -> Result<usize, SearchError> {
        let node = self.get(node_id);
        if node.state.is_terminal() {
            return Ok(0);
        }

        let actions = node.state.available_actions();
        if actions.is_empty() {
            return Err(SearchError::ContractViolation(format!(
                "non-terminal state {:?} has no available actions",
                node.state
            )));
        }

        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let state = self.get(node_id).state.apply_action(&action)?;
            children.push((action, state));
        }

        let count = children.len();
        for (action, state) in children {
            self.insert_child(node_id, action, state);
        }

        trace!(node = node_id.0, children = count, "Expanded node");
        Ok(count)
    }

    /// Propagate a simulation result from a node up to the root.
    ///
    /// Each node on the ancestor chain keeps the maximum value seen and has
    /// its visit count incremented by one. Walks parent links iteratively.
    pub fn propagate(&mut self, node_id: NodeId, value: f64) {
        let mut current_id = node_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.record(value);
            current_id = node.parent;
        }
    }

    /// UCB1 score of a node relative to its parent.
    ///
    /// The root has no parent and is scored as if it were its own parent.
    pub fn ucb1(&self, node_id: NodeId, exploration: f64) -> f64 {
        let node = self.get(node_id);
        let parent_visits = if node.parent.is_some() {
            self.get(node.parent).visit_count
        } else {
            node.visit_count
        };
        node.ucb1(parent_visits, exploration)
    }

    /// Select the child of a node with the highest UCB1 score.
    ///
    /// Ties go to the child installed first, keeping selection reproducible.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let parent_visits = node.visit_count;

        let mut best: Option<(NodeId, f64)> = None;
        for (_, child_id) in &node.children {
            let score = self.get(*child_id).ucb1(parent_visits, exploration);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((*child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Actions leading from the root to `node_id`, in order.
    pub fn action_path(&self, node_id: NodeId) -> Vec<S::Action> {
        let mut path = Vec::new();
        let mut current_id = node_id;

        while current_id.is_some() {
            let node = self.get(current_id);
            if let Some(action) = &node.action {
                path.push(action.clone());
            }
            current_id = node.parent;
        }

        path.reverse();
        path
    }

    /// Number of edges between the root and `node_id`.
    pub fn depth(&self, node_id: NodeId) -> u32 {
        let mut depth = 0;
        let mut current_id = self.get(node_id).parent;
        while current_id.is_some() {
            depth += 1;
            current_id = self.get(current_id).parent;
        }
        depth
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);

        // Children are always allocated after their parent, so one forward
        // pass sees every parent depth before the child needs it.
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            let depth = depths[node.parent.index()] + 1;
            depths[i] = depth;
            max_depth = max_depth.max(depth);
        }

        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.value_estimate,
            max_depth,
        }
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
