//! Addressable pairing heap
//!
//! A min-priority queue that supports `decrease_cost` on a previously
//! returned handle, which a plain binary heap cannot do without a linear
//! scan. Used once per round of [`crate::graph::Graph::find_cycles`] to run
//! Dijkstra's algorithm over the reduced-cost graph.
//!
//! # Algorithm
//!
//! Standard two-pass pairing heap: `extract_min` removes the root and
//! re-merges its children by folding them left-to-right in pairs, then
//! folding that list right-to-left into one tree. `decrease_cost` detaches
//! the entry from its parent (if the new cost beats the parent's) and
//! re-merges it with the root. Both are amortized efficient in practice
//! despite the heap having no rebalancing step.

use crate::error::HeapError;
use crate::graph::NodeId;

/// Opaque handle to a heap entry, returned by [`Heap::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle(usize);

struct Entry {
    node: NodeId,
    cost: u64,
    child: Option<usize>,
    sibling: Option<usize>,
    prev: Option<usize>,
    used: bool,
}

/// A pairing heap of `(NodeId, cost)` entries, addressable by [`Handle`].
///
/// # Example
/// ```
/// use trademax_core::heap::Heap;
/// use trademax_core::graph::NodeId;
///
/// let mut heap = Heap::with_capacity(4);
/// let h = heap.insert(NodeId::new(0), 10);
/// heap.decrease_cost(h, 3).unwrap();
/// let (node, cost) = heap.extract_min().unwrap();
/// assert_eq!(cost, 3);
/// assert_eq!(node, NodeId::new(0));
/// ```
pub struct Heap {
    entries: Vec<Entry>,
    root: Option<usize>,
}

impl Heap {
    /// Create an empty heap with room for `expected_size` entries.
    pub fn with_capacity(expected_size: usize) -> Self {
        Self {
            entries: Vec::with_capacity(expected_size),
            root: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Current cost of the entry referenced by `handle`, whether or not it
    /// has been extracted yet. Used at round end to read each node's final
    /// Dijkstra key even for entries that were never popped because the
    /// search stopped early at the cheapest sink.
    pub fn cost(&self, handle: Handle) -> u64 {
        self.entries[handle.0].cost
    }

    /// Insert `node` at `cost` and merge it into the root. Returns a handle
    /// usable with [`Heap::decrease_cost`].
    pub fn insert(&mut self, node: NodeId, cost: u64) -> Handle {
        let idx = self.entries.len();
        self.entries.push(Entry {
            node,
            cost,
            child: None,
            sibling: None,
            prev: None,
            used: false,
        });
        self.root = Some(match self.root {
            None => idx,
            Some(root) => self.merge(idx, root),
        });
        Handle(idx)
    }

    /// Remove and return the `(node, cost)` with the lowest cost.
    pub fn extract_min(&mut self) -> Option<(NodeId, u64)> {
        let root_idx = self.root?;
        self.entries[root_idx].used = true;
        let first_child = self.entries[root_idx].child;
        self.root = self.merge_pairs(first_child);
        if let Some(r) = self.root {
            self.entries[r].prev = None;
        }
        let root = &self.entries[root_idx];
        Some((root.node, root.cost))
    }

    /// Two-pass pairing-heap merge: fold the sibling list into pairs
    /// left-to-right, then fold those results right-to-left via recursion.
    fn merge_pairs(&mut self, list: Option<usize>) -> Option<usize> {
        let first = list?;
        match self.entries[first].sibling {
            None => Some(first),
            Some(second) => {
                let rest = self.entries[second].sibling;
                self.entries[first].sibling = None;
                self.entries[second].sibling = None;
                let pair = self.merge(first, second);
                match self.merge_pairs(rest) {
                    None => Some(pair),
                    Some(r) => Some(self.merge(pair, r)),
                }
            }
        }
    }

    /// Lower the cost of `handle`'s entry to `to_cost`, re-homing it under
    /// the root if that beats its current parent.
    ///
    /// # Errors
    /// Returns [`HeapError::AlreadyExtracted`] if the entry has already been
    /// popped by [`Heap::extract_min`], or [`HeapError::NotADecrease`] if
    /// `to_cost` is not strictly lower than the entry's current cost.
    pub fn decrease_cost(&mut self, handle: Handle, to_cost: u64) -> Result<(), HeapError> {
        let idx = handle.0;
        if self.entries[idx].used {
            return Err(HeapError::AlreadyExtracted);
        }
        if to_cost >= self.entries[idx].cost {
            return Err(HeapError::NotADecrease {
                current_cost: self.entries[idx].cost,
                to_cost,
            });
        }
        self.entries[idx].cost = to_cost;

        if Some(idx) == self.root {
            return Ok(());
        }
        let parent = self.entries[idx].prev.unwrap();
        if self.entries[idx].cost >= self.entries[parent].cost {
            return Ok(());
        }

        // Detach from parent's child/sibling link.
        if self.entries[parent].child == Some(idx) {
            self.entries[parent].child = self.entries[idx].sibling;
        } else {
            self.entries[parent].sibling = self.entries[idx].sibling;
        }
        if let Some(sib) = self.entries[idx].sibling {
            self.entries[sib].prev = Some(parent);
        }
        self.entries[idx].sibling = None;
        self.entries[idx].prev = None;

        let root = self.root.unwrap();
        self.root = Some(self.merge(idx, root));
        Ok(())
    }

    /// Merge trees rooted at `a` and `b`, returning the index of the new root.
    fn merge(&mut self, a: usize, b: usize) -> usize {
        let (parent, child) = if self.entries[b].cost < self.entries[a].cost {
            (b, a)
        } else {
            (a, b)
        };
        self.entries[child].prev = Some(parent);
        self.entries[child].sibling = self.entries[parent].child;
        if let Some(sib) = self.entries[child].sibling {
            self.entries[sib].prev = Some(child);
        }
        self.entries[parent].child = Some(child);
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(n: usize) -> NodeId {
        NodeId::new(n)
    }

    #[test]
    fn extracts_in_sorted_order() {
        let mut heap = Heap::with_capacity(8);
        for (i, cost) in [5u64, 1, 9, 3, 7, 2].into_iter().enumerate() {
            heap.insert(node(i), cost);
        }
        let mut out = Vec::new();
        while let Some((_, cost)) = heap.extract_min() {
            out.push(cost);
        }
        assert_eq!(out, vec![1, 2, 3, 5, 7, 9]);
    }

    #[test]
    fn decrease_cost_reorders() {
        let mut heap = Heap::with_capacity(4);
        let a = heap.insert(node(0), 10);
        let b = heap.insert(node(1), 20);
        heap.decrease_cost(b, 1).unwrap();
        let (first, cost) = heap.extract_min().unwrap();
        assert_eq!(first, node(1));
        assert_eq!(cost, 1);
        assert_eq!(heap.cost(a), 10);
    }

    #[test]
    fn decrease_cost_rejects_non_decrease() {
        let mut heap = Heap::with_capacity(2);
        let a = heap.insert(node(0), 10);
        let err = heap.decrease_cost(a, 10).unwrap_err();
        assert_eq!(
            err,
            HeapError::NotADecrease {
                current_cost: 10,
                to_cost: 10
            }
        );
    }

    #[test]
    fn decrease_cost_rejects_used_entry() {
        let mut heap = Heap::with_capacity(2);
        let a = heap.insert(node(0), 10);
        heap.extract_min();
        let err = heap.decrease_cost(a, 1).unwrap_err();
        assert_eq!(err, HeapError::AlreadyExtracted);
    }

    #[test]
    fn cost_is_readable_without_extraction() {
        let mut heap = Heap::with_capacity(2);
        let a = heap.insert(node(0), 42);
        let _b = heap.insert(node(1), 5);
        assert_eq!(heap.cost(a), 42);
    }
}
