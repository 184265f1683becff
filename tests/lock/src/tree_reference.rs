//! Naive tree metrics computed from parent pointers alone.
//!
//! Reference answers for checking the cached metrics of
//! [`waypoint_kernel::tree::Tree`].

use waypoint_kernel::tree::{NodeId, Tree};

/// Depth by walking to the root.
#[must_use]
pub fn naive_depth<T>(tree: &Tree<T>, id: NodeId) -> usize {
    let mut depth = 0;
    let mut cursor = id;
    while let Some(parent) = tree.parent(cursor) {
        depth += 1;
        cursor = parent;
    }
    depth
}

/// Subtree size: nodes whose ancestor chain passes through `id`.
#[must_use]
pub fn naive_size<T>(tree: &Tree<T>, id: NodeId) -> usize {
    tree.ids()
        .filter(|&other| {
            let mut cursor = Some(other);
            while let Some(node) = cursor {
                if node == id {
                    return true;
                }
                cursor = tree.parent(node);
            }
            false
        })
        .count()
}

/// Height: longest downward edge count, by brute force over descendants.
#[must_use]
pub fn naive_height<T>(tree: &Tree<T>, id: NodeId) -> usize {
    let base = naive_depth(tree, id);
    tree.ids()
        .filter(|&other| tree.is_ancestor_of(id, other) || other == id)
        .map(|other| naive_depth(tree, other) - base)
        .max()
        .unwrap_or(0)
}
