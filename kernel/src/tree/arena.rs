//! Arena storage, re-parenting, and lazy metric recomputation.

use std::cell::Cell;
use std::ops::{Index, IndexMut};

/// Stable handle to a node in a [`Tree`].
///
/// Handles are assigned in insertion order starting at 0 and are never
/// reused, so `NodeId` order is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of this node in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Raw handle value (for serialization).
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Structural mutation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle does not belong to this arena.
    #[error("unknown node {node}")]
    UnknownNode { node: NodeId },
    /// Attaching `node` under `parent` would make a node its own ancestor.
    #[error("attaching {node} under {parent} would create a cycle")]
    WouldCycle { node: NodeId, parent: NodeId },
    /// The arena ran out of `u32` handles.
    #[error("tree capacity exhausted")]
    CapacityExhausted,
}

/// Cached metrics. `Cell`s let read-only getters refresh stale values.
#[derive(Debug, Clone)]
struct Metrics {
    size: Cell<usize>,
    height: Cell<usize>,
    depth: Cell<usize>,
    subtree_fresh: Cell<bool>,
    depth_fresh: Cell<bool>,
}

impl Metrics {
    fn detached() -> Self {
        Self {
            size: Cell::new(1),
            height: Cell::new(0),
            depth: Cell::new(0),
            subtree_fresh: Cell::new(true),
            depth_fresh: Cell::new(true),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    metrics: Metrics,
}

/// An arena-backed forest of nodes carrying payloads of type `T`.
///
/// Every inserted node starts as the root of its own tree; [`Tree::set_parent`]
/// links and unlinks them. A single arena may therefore hold several disjoint
/// trees.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Tree<T> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create an empty arena with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Number of nodes in the arena (across all trees).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `id` refers to a node of this arena.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.slots.len()
    }

    /// All handles in creation order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn ids(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        // `insert` caps the arena at u32::MAX nodes.
        (0..self.slots.len()).map(|i| NodeId(i as u32))
    }

    /// Insert a node, optionally attaching it under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::UnknownNode`] if `parent` is not in the arena and
    /// [`TreeError::CapacityExhausted`] past `u32::MAX` nodes. On error the
    /// arena is unchanged.
    pub fn insert(&mut self, value: T, parent: Option<NodeId>) -> Result<NodeId, TreeError> {
        if let Some(p) = parent {
            self.check(p)?;
        }
        let raw = u32::try_from(self.slots.len()).map_err(|_| TreeError::CapacityExhausted)?;
        let id = NodeId(raw);
        self.slots.push(Slot {
            value,
            parent: None,
            children: Vec::new(),
            metrics: Metrics::detached(),
        });
        if parent.is_some() {
            self.set_parent(id, parent)?;
        }
        Ok(id)
    }

    /// Payload of `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slots.get(id.index()).map(|s| &s.value)
    }

    /// Mutable payload of `id`, if it exists.
    ///
    /// Payload mutation never touches structure, so no metric is invalidated.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.slots.get_mut(id.index()).map(|s| &mut s.value)
    }

    /// Parent of `id` (`None` for a root or an unknown handle).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.index()).and_then(|s| s.parent)
    }

    /// Children of `id` in attachment order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.index())
            .map_or(&[][..], |s| s.children.as_slice())
    }

    /// Whether `id` has no parent.
    #[must_use]
    pub fn is_root(&self, id: NodeId) -> bool {
        self.parent(id).is_none()
    }

    /// Whether `id` has no children.
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id).is_empty()
    }

    /// Move `node` under `new_parent`, or detach it when `new_parent` is `None`.
    ///
    /// Setting the current parent again is a no-op. Size and height become
    /// stale on both the old and the new ancestor chains; depth becomes stale
    /// on the moved subtree only when the node's depth actually changes.
    ///
    /// # Errors
    ///
    /// - [`TreeError::UnknownNode`] for a foreign handle.
    /// - [`TreeError::WouldCycle`] if `new_parent` is `node` or one of its
    ///   descendants.
    ///
    /// The arena is unchanged on error.
    pub fn set_parent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<(), TreeError> {
        self.check(node)?;
        if let Some(p) = new_parent {
            self.check(p)?;
            // A leaf cannot be anyone's ancestor; skip the chain walk.
            if p == node || (!self.is_leaf(node) && self.is_ancestor_of(node, p)) {
                return Err(TreeError::WouldCycle { node, parent: p });
            }
        }

        let old_parent = self.slots[node.index()].parent;
        if old_parent == new_parent {
            return Ok(());
        }

        let old_depth = self.depth(node);
        let new_depth = new_parent.map_or(0, |p| self.depth(p) + 1);

        if let Some(p) = old_parent {
            self.slots[p.index()].children.retain(|&c| c != node);
            self.invalidate_upward(p);
        }

        self.slots[node.index()].parent = new_parent;
        if old_depth != new_depth {
            self.invalidate_downward(node);
        }

        if let Some(p) = new_parent {
            self.slots[p.index()].children.push(node);
            self.invalidate_upward(p);
        }
        Ok(())
    }

    /// Number of nodes in the subtree rooted at `id` (including `id`).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the arena.
    #[must_use]
    pub fn size(&self, id: NodeId) -> usize {
        self.refresh_subtree(id);
        self.slots[id.index()].metrics.size.get()
    }

    /// Length of the longest downward chain from `id` (leaf = 0).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the arena.
    #[must_use]
    pub fn height(&self, id: NodeId) -> usize {
        self.refresh_subtree(id);
        self.slots[id.index()].metrics.height.get()
    }

    /// Distance from `id` to its root (root = 0).
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in the arena.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.refresh_depth(id);
        self.slots[id.index()].metrics.depth.get()
    }

    fn check(&self, id: NodeId) -> Result<(), TreeError> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode { node: id })
        }
    }

    fn invalidate_upward(&self, from: NodeId) {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let m = &self.slots[id.index()].metrics;
            if !m.subtree_fresh.get() {
                break;
            }
            m.subtree_fresh.set(false);
            cursor = self.slots[id.index()].parent;
        }
    }

    fn invalidate_downward(&self, from: NodeId) {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let slot = &self.slots[id.index()];
            if !slot.metrics.depth_fresh.get() {
                continue;
            }
            slot.metrics.depth_fresh.set(false);
            stack.extend(slot.children.iter().copied());
        }
    }

    /// Post-order recompute of every stale node under `id`.
    ///
    /// Fresh children are read from cache: a fresh node's whole subtree is
    /// fresh, so the walk never descends into one.
    fn refresh_subtree(&self, id: NodeId) {
        if self.slots[id.index()].metrics.subtree_fresh.get() {
            return;
        }
        let mut stack = vec![(id, false)];
        while let Some((current, children_done)) = stack.pop() {
            let slot = &self.slots[current.index()];
            if children_done {
                let mut size = 1;
                let mut height = 0;
                for &child in &slot.children {
                    let cm = &self.slots[child.index()].metrics;
                    size += cm.size.get();
                    height = height.max(cm.height.get() + 1);
                }
                slot.metrics.size.set(size);
                slot.metrics.height.set(height);
                slot.metrics.subtree_fresh.set(true);
                continue;
            }
            stack.push((current, true));
            for &child in &slot.children {
                if !self.slots[child.index()].metrics.subtree_fresh.get() {
                    stack.push((child, false));
                }
            }
        }
    }

    /// Walk up to the nearest fresh ancestor (or the root), then assign depths
    /// back down the collected chain.
    fn refresh_depth(&self, id: NodeId) {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        let mut base = None;
        while let Some(current) = cursor {
            let slot = &self.slots[current.index()];
            if slot.metrics.depth_fresh.get() {
                base = Some(slot.metrics.depth.get());
                break;
            }
            chain.push(current);
            cursor = slot.parent;
        }

        // `base` is the depth of the fresh node above the chain; `None` means
        // the chain ends at a stale root.
        let mut depth = base.map_or(0, |d| d + 1);
        for &node in chain.iter().rev() {
            let m = &self.slots[node.index()].metrics;
            m.depth.set(depth);
            m.depth_fresh.set(true);
            depth += 1;
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Tree<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        &self.slots[id.index()].value
    }
}

impl<T> IndexMut<NodeId> for Tree<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.slots[id.index()].value
    }
}
