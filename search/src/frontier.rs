//! Mutable-priority open set.
//!
//! An indexed binary min-heap: every queued node remembers its heap slot in a
//! dense position table addressed by [`NodeId::index`], which gives O(1)
//! membership and O(log n) decrease-key without tombstones.

use waypoint_kernel::tree::NodeId;

use crate::node::FrontierKey;

#[derive(Debug, Clone, Copy)]
struct FrontierEntry<C> {
    key: FrontierKey<C>,
    node: NodeId,
}

/// Open set of discovered-but-unexpanded nodes, ordered by [`FrontierKey`].
///
/// Membership is keyed by node handle. The search keeps exactly one handle per
/// distinct state (see [`crate::visited::VisitedIndex`]), so membership by
/// handle is membership by state.
#[derive(Debug, Clone)]
pub struct OpenSet<C> {
    heap: Vec<FrontierEntry<C>>,
    positions: Vec<Option<usize>>,
    high_water: usize,
}

impl<C: Ord + Copy> OpenSet<C> {
    /// Create an empty open set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: Vec::new(),
            high_water: 0,
        }
    }

    /// Queue `node` with `key`.
    ///
    /// Returns `false` (and changes nothing) if `node` is already queued; use
    /// [`OpenSet::update_priority`] for that.
    pub fn push(&mut self, node: NodeId, key: FrontierKey<C>) -> bool {
        if self.contains(node) {
            return false;
        }
        if self.positions.len() <= node.index() {
            self.positions.resize(node.index() + 1, None);
        }
        let slot = self.heap.len();
        self.heap.push(FrontierEntry { key, node });
        self.positions[node.index()] = Some(slot);
        self.sift_up(slot);
        self.high_water = self.high_water.max(self.heap.len());
        true
    }

    /// Remove and return the node with the smallest key.
    pub fn pop_min(&mut self) -> Option<(NodeId, FrontierKey<C>)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions[entry.node.index()] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.node, entry.key))
    }

    /// Replace the key of a queued node, moving it up or down as needed.
    ///
    /// Returns `false` if `node` is not queued.
    pub fn update_priority(&mut self, node: NodeId, key: FrontierKey<C>) -> bool {
        let Some(slot) = self.position(node) else {
            return false;
        };
        let old = self.heap[slot].key;
        self.heap[slot].key = key;
        if key < old {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
        true
    }

    /// Whether `node` is currently queued. O(1).
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.position(node).is_some()
    }

    /// Current key of a queued node.
    #[must_use]
    pub fn priority(&self, node: NodeId) -> Option<FrontierKey<C>> {
        self.position(node).map(|slot| self.heap[slot].key)
    }

    /// Smallest key without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<(NodeId, FrontierKey<C>)> {
        self.heap.first().map(|e| (e.node, e.key))
    }

    /// Number of queued nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the open set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest size the open set ever reached.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    fn position(&self, node: NodeId) -> Option<usize> {
        self.positions.get(node.index()).copied().flatten()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].node.index()] = Some(a);
        self.positions[self.heap[b].node.index()] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].key >= self.heap[parent].key {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.heap[left].key < self.heap[smallest].key {
                smallest = left;
            }
            if right < len && self.heap[right].key < self.heap[smallest].key {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

impl<C: Ord + Copy> Default for OpenSet<C> {
    fn default() -> Self {
        Self::new()
    }
}
