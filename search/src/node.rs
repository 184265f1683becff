//! Search node payload and frontier ordering key.

use std::hash::{Hash, Hasher};

use crate::cost::Cost;

/// Payload of every node in the search tree.
///
/// Tree structure (parent, children, depth) lives in the
/// [`waypoint_kernel::tree::Tree`] arena; this struct carries only what the
/// search adds on top. Equality and hashing use `state` alone, so a node keeps
/// its identity while its cost is relaxed.
#[derive(Debug, Clone)]
pub struct HeuristicNode<S, C> {
    /// The domain state this node stands for.
    pub state: S,
    /// Accumulated path cost from the search source.
    pub cost: C,
    /// Heuristic estimate to the destination (zero in predicate mode).
    pub estimate: C,
}

impl<S, C: Cost> HeuristicNode<S, C> {
    #[must_use]
    pub fn new(state: S, cost: C, estimate: C) -> Self {
        Self {
            state,
            cost,
            estimate,
        }
    }

    /// The A* priority `cost + estimate`. Lower is better.
    #[must_use]
    pub fn total(&self) -> C {
        self.cost + self.estimate
    }
}

impl<S: PartialEq, C> PartialEq for HeuristicNode<S, C> {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl<S: Eq, C> Eq for HeuristicNode<S, C> {}

impl<S: Hash, C> Hash for HeuristicNode<S, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state.hash(state);
    }
}

/// The frontier ordering key: `(total, creation_order)`.
///
/// Lower `total` first; ties go to the older node so runs are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey<C> {
    pub total: C,
    pub creation_order: u64,
}

impl<C: Ord> PartialOrd for FrontierKey<C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for FrontierKey<C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.total
            .cmp(&other.total)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}
