//! Node and edge types for the twin-graph arena
//!
//! Every real or dummy item produces a [`Direction::Wants`] node and a
//! [`Direction::Sends`] node, linked as twins. Nodes live in a single
//! `Vec<Node>` owned by [`super::Graph`] and are referred to everywhere
//! else by [`NodeId`], never by reference, so the graph stays a plain
//! owned value that can be moved across threads.

use crate::heap::Handle;

/// The cost sentinel for "no finite minimum incoming cost found yet" and
/// for Dijkstra's "unreached" key. `2^63 - 1`, chosen so doubling it during
/// price updates never overflows a `u64` before the explicit clamp kicks in.
pub const MAX_VALUE: u64 = i64::MAX as u64;

/// Dijkstra's "unreached" sentinel, distinct from [`MAX_VALUE`] so a price
/// update can still distinguish "never extracted this round" from "the
/// most expensive finite price we ever assign."
pub const INFINITY: u64 = 100_000_000_000_000;

/// Index into a [`super::Graph`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(idx: usize) -> Self {
        NodeId(idx)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Index into a [`super::Graph`]'s edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(usize);

impl EdgeId {
    pub fn new(idx: usize) -> Self {
        EdgeId(idx)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Which side of an item's twin pair a node represents.
///
/// A `Wants` node's edges are items it is willing to receive; a `Sends`
/// node's edges are (via its twin) the items willing to receive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Wants,
    Sends,
}

/// One side of an item's twin pair.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub owner: String,
    pub is_dummy: bool,
    pub direction: Direction,

    /// Edges incident to this node, in this node's own direction.
    pub edges: Vec<EdgeId>,

    pub twin: NodeId,
    pub matched: Option<NodeId>,
    pub match_cost: u64,

    /// Lowest-cost incoming edge; meaningful only on `Sends` nodes, used to
    /// seed that node's initial Dijkstra price.
    pub min_in_cost: u64,

    pub mark: u32,
    pub from: Option<NodeId>,
    pub price: u64,
    pub component: u32,

    /// Valid only while a round's [`crate::heap::Heap`] is live; `None`
    /// outside of `find_cycles`.
    pub heap_handle: Option<Handle>,
}

impl Node {
    pub(super) fn new(name: String, owner: String, is_dummy: bool, direction: Direction, twin: NodeId) -> Self {
        Node {
            name,
            owner,
            is_dummy,
            direction,
            edges: Vec::new(),
            twin,
            matched: None,
            match_cost: 0,
            min_in_cost: MAX_VALUE,
            mark: 0,
            from: None,
            price: 0,
            component: 0,
            heap_handle: None,
        }
    }

    /// Display name for results: bare item name for unowned/dummy items,
    /// `"item owner"` or `"owner item"` otherwise.
    pub fn show(&self, sort_by_item: bool) -> String {
        if self.owner.is_empty() || self.is_dummy {
            return self.name.clone();
        }
        if sort_by_item {
            format!("{} {}", self.name, self.owner)
        } else {
            format!("{} {}", self.owner, self.name)
        }
    }
}

/// A directed offer: `wanter` is willing to receive from `sender`, at `cost`.
#[derive(Debug, Clone)]
pub struct Edge {
    pub wanter: NodeId,
    pub sender: NodeId,
    pub cost: u64,
}
