//! The twin-node trade graph and its algorithms
//!
//! [`Graph`] owns every node and edge in a single arena (`Vec<Node>` /
//! `Vec<Edge>`), indexed by [`NodeId`] / [`EdgeId`] rather than linked by
//! raw pointer. This keeps a graph a plain, movable, `Send` value: an
//! entire graph can be handed to a worker thread by value, which is what
//! [`crate::scheduler::Scheduler`] does for every iteration.
//!
//! The algorithms are split across submodules by concern:
//! - [`mod@self`]: node/edge creation, freezing, name lookup.
//! - `scc`: Kosaraju pruning to strongly connected components and orphan removal.
//! - `shuffle`: reference-order shuffle and deep copy.
//! - `matching`: reduced-cost Dijkstra, successive augmenting paths, dummy elision, cycle extraction.

mod matching;
mod node;
mod scc;
mod shuffle;

pub use matching::{Cycle, CycleItem};
pub use node::{Direction, Edge, EdgeId, Node, NodeId, INFINITY, MAX_VALUE};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32};
use std::sync::Arc;

/// Shared control signals for one graph's lifetime: whether the run has
/// been canceled, whether it is currently paused, and a 0..=256 progress
/// counter for [`crate::graph::Graph::find_cycles`].
///
/// Cloning is cheap (it clones the inner `Arc`s) and shares all three
/// signals with the original. Copies made by [`Graph::copy_shuffled`] use
/// [`Control::for_worker`] instead, which keeps the shared cancel/pause
/// `Arc`s but gives the copy its own progress counter.
#[derive(Clone)]
pub struct Control {
    pub cancel: Arc<AtomicBool>,
    pub paused: Arc<AtomicBool>,
    pub progress: Arc<AtomicU32>,
}

impl Control {
    pub fn new() -> Self {
        Control {
            cancel: Arc::new(AtomicBool::new(false)),
            paused: Arc::new(AtomicBool::new(false)),
            progress: Arc::new(AtomicU32::new(0)),
        }
    }

    /// A control sharing this one's cancel/pause signals but with its own,
    /// independent progress counter. Used to give each worker's graph copy a
    /// progress counter the scheduler can read in isolation, while still
    /// letting one cancel/pause toggle reach every in-flight worker at once.
    pub fn for_worker(&self) -> Self {
        Control {
            cancel: self.cancel.clone(),
            paused: self.paused.clone(),
            progress: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

/// The bipartite wanter/sender twin graph.
///
/// A `Graph` moves through three phases: unfrozen (nodes/edges may be
/// added), frozen-and-pruned (ready for repeated matching), and, per
/// iteration, a disposable shuffled copy that [`Graph::find_cycles`]
/// consumes and [`Scheduler`](crate::scheduler::Scheduler) drops once
/// scored.
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,

    pub wanters: Vec<NodeId>,
    pub senders: Vec<NodeId>,
    pub orphans: Vec<NodeId>,

    name_map: HashMap<String, NodeId>,
    frozen: bool,
    timestamp: u32,
    component_counter: u32,
    finished: Vec<NodeId>,

    pub num_copies: u32,
    pub viable_real_items: u32,

    pub control: Control,
}

impl Graph {
    pub fn new(control: Control) -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            wanters: Vec::new(),
            senders: Vec::new(),
            orphans: Vec::new(),
            name_map: HashMap::new(),
            frozen: false,
            timestamp: 0,
            component_counter: 0,
            finished: Vec::new(),
            num_copies: 0,
            viable_real_items: 0,
            control,
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Look up a wanter node by item name. Sender nodes are never looked up
    /// by name; reach one via `.twin` on its wanter.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.name_map.get(name).copied()
    }

    /// Create a wanter/sender twin pair for `name` and return the wanter id.
    ///
    /// # Panics (debug builds)
    /// Panics if the graph is already frozen, or if `name` was already added.
    pub fn add_node(&mut self, name: impl Into<String>, owner: impl Into<String>, is_dummy: bool) -> NodeId {
        debug_assert!(!self.frozen, "cannot add a node to a frozen graph");
        let name = name.into();
        debug_assert!(!self.name_map.contains_key(&name), "duplicate node name {name:?}");
        let owner = owner.into();

        let wanter_id = NodeId::new(self.nodes.len());
        let sender_id = NodeId::new(self.nodes.len() + 1);

        self.nodes.push(Node::new(name.clone(), owner.clone(), is_dummy, Direction::Wants, sender_id));
        self.nodes.push(Node::new(name.clone(), owner, is_dummy, Direction::Sends, wanter_id));

        self.wanters.push(wanter_id);
        self.senders.push(sender_id);
        self.name_map.insert(name, wanter_id);

        wanter_id
    }

    /// Add a directed offer from `wanter` to `sender` at `cost`.
    ///
    /// # Panics (debug builds)
    /// Panics if the graph is already frozen.
    pub fn add_edge(&mut self, wanter: NodeId, sender: NodeId, cost: u64) -> EdgeId {
        debug_assert!(!self.frozen, "cannot add an edge to a frozen graph");
        debug_assert!(matches!(self.node(wanter).direction, Direction::Wants));
        debug_assert!(matches!(self.node(sender).direction, Direction::Sends));

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge { wanter, sender, cost });
        self.node_mut(wanter).edges.push(id);
        self.node_mut(sender).edges.push(id);
        id
    }

    /// Returns true if `wanter` already has an edge to `sender`.
    pub fn contains_edge(&self, wanter: NodeId, sender: NodeId) -> bool {
        self.node(wanter).edges.iter().any(|&e| self.edge(e).sender == sender)
    }

    /// Edge ids incident to `node`, in this node's own direction.
    pub fn edges_of(&self, node: NodeId) -> Vec<EdgeId> {
        self.node(node).edges.clone()
    }

    /// `(sender, cost)` for a wanter-side edge.
    pub fn edge_endpoints(&self, id: EdgeId) -> (NodeId, u64) {
        let e = self.edge(id);
        (e.sender, e.cost)
    }

    /// Overwrite an edge's cost. Used by the builder's post-hoc priority
    /// rescaling; never called once the graph is frozen.
    ///
    /// # Panics (debug builds)
    /// Panics if the graph is already frozen.
    pub fn set_edge_cost(&mut self, id: EdgeId, cost: u64) {
        debug_assert!(!self.frozen, "cannot edit an edge on a frozen graph");
        self.edges[id.index()].cost = cost;
    }

    /// Lock the graph against further node/edge additions.
    ///
    /// # Panics (debug builds)
    /// Panics if already frozen.
    pub fn freeze(&mut self) {
        debug_assert!(!self.frozen, "graph was already frozen");
        self.frozen = true;
    }

    fn bump_timestamp(&mut self) -> u32 {
        self.timestamp += 1;
        self.timestamp
    }
}
