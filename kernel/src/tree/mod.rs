//! Tree module: an arena of nodes with lazily cached structural metrics.
//!
//! Nodes are addressed by [`NodeId`] handles into a [`Tree`] arena. Parent and
//! child links are stored as handles, so re-parenting is an index rewrite and
//! the arena never forms reference cycles.
//!
//! # Cached metrics
//!
//! | Metric   | Meaning                          | Invalidation direction |
//! |----------|----------------------------------|------------------------|
//! | `size`   | nodes in the subtree (>= 1)      | upward (ancestors)     |
//! | `height` | longest child chain (leaf = 0)   | upward (ancestors)     |
//! | `depth`  | distance from the root (root = 0)| downward (descendants) |
//!
//! Invariants kept by [`Tree::set_parent`]:
//!
//! - a node with a stale `size`/`height` has only stale ancestors;
//! - a node with a stale `depth` has only stale descendants.
//!
//! Both let invalidation stop at the first already-stale node.

mod arena;
mod query;

pub use arena::{NodeId, Tree, TreeError};
pub use query::Preorder;
