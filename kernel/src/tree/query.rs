//! Ancestry queries and traversals.
//!
//! All walks are iterative; none of them touch cached metrics except
//! [`Tree::lowest_common_ancestor`], which reads depths.

use super::arena::{NodeId, Tree};

impl<T> Tree<T> {
    /// The root of the tree containing `id`. O(depth).
    #[must_use]
    pub fn root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Whether `node` is a strict descendant of `ancestor`.
    ///
    /// A node is never its own child. O(depth of `node`).
    #[must_use]
    pub fn is_child_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Whether `ancestor` lies strictly above `node`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.is_child_of(node, ancestor)
    }

    /// Deepest node that is an ancestor-or-self of both `a` and `b`.
    ///
    /// Returns `None` when the two nodes live in different trees of the arena.
    ///
    /// # Panics
    ///
    /// Panics if either handle is not in the arena.
    #[must_use]
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let (mut shallow, mut deep) = if self.depth(a) <= self.depth(b) {
            (a, b)
        } else {
            (b, a)
        };
        for _ in 0..self.depth(deep) - self.depth(shallow) {
            deep = self.parent(deep)?;
        }
        while shallow != deep {
            match (self.parent(shallow), self.parent(deep)) {
                (Some(s), Some(d)) => {
                    shallow = s;
                    deep = d;
                }
                _ => return None,
            }
        }
        Some(shallow)
    }

    /// Handles from the root down to `id`, inclusive on both ends.
    #[must_use]
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Pre-order traversal of the subtree rooted at `id`, children visited in
    /// attachment order.
    #[must_use]
    pub fn preorder(&self, id: NodeId) -> Preorder<'_, T> {
        Preorder {
            tree: self,
            stack: vec![id],
        }
    }
}

/// Iterator returned by [`Tree::preorder`].
#[derive(Debug)]
pub struct Preorder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for Preorder<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
