//! Typed search errors.
//!
//! "No path" is not an error: an exhausted open set is reported as
//! `Ok(None)` by the run operations. `SearchError` covers the two conditions
//! a caller must be able to tell apart from an unreachable goal.

use waypoint_kernel::tree::TreeError;

/// Failure of a search run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Heuristic search was requested without a concrete destination.
    ///
    /// Raised before any state is touched.
    #[error("heuristic search requires a destination state")]
    MissingDestination,

    /// A relaxation would lower the cost of the expanding node or one of its
    /// ancestors, i.e. the transition model has a negative-cost cycle.
    ///
    /// `depth` is the tree depth of the expanding node when the cycle closed.
    #[error("negative-cost cycle detected at search depth {depth}")]
    NegativeCycle { depth: usize },

    /// The search tree rejected a structural update. Indicates an engine bug.
    #[error("search tree invariant violated: {0}")]
    Tree(#[from] TreeError),
}
