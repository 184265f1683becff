//! Index of every node ever created during a run.

use std::collections::HashMap;
use std::hash::Hash;

use waypoint_kernel::tree::NodeId;

/// State → node handle map covering open and closed nodes alike.
///
/// A state is inserted once, the first time it is discovered; its handle
/// never changes afterwards even when the node is relaxed.
#[derive(Debug, Clone)]
pub struct VisitedIndex<S> {
    nodes: HashMap<S, NodeId>,
}

impl<S: Eq + Hash> VisitedIndex<S> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Handle of the node holding `state`, if discovered.
    #[must_use]
    pub fn get(&self, state: &S) -> Option<NodeId> {
        self.nodes.get(state).copied()
    }

    /// Record `state` as discovered at `node`.
    ///
    /// Returns `false` (first-seen wins) if `state` was already indexed.
    pub fn insert(&mut self, state: S, node: NodeId) -> bool {
        match self.nodes.entry(state) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    /// Whether `state` has been discovered.
    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.nodes.contains_key(state)
    }

    /// Number of discovered states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether nothing has been discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: Eq + Hash> Default for VisitedIndex<S> {
    fn default() -> Self {
        Self::new()
    }
}
