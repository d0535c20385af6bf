//! Min-cost perfect matching via successive shortest augmenting paths
//!
//! One round per wanter: run Dijkstra over reduced costs to find the
//! cheapest unmatched sender reachable from any unmatched wanter, augment
//! the matching along the path that found it, then update every node's
//! price by the shortest-path distance it was assigned this round. This is
//! the standard Jonker-Volgenant / successive-shortest-paths scheme for
//! min-cost bipartite perfect matching; it terminates with a matching that
//! is optimal under the edge costs the builder assigned.

use std::thread;
use std::time::Duration;

use std::sync::atomic::Ordering;

use super::node::{INFINITY, MAX_VALUE};
use super::{Direction, Graph, NodeId};
use crate::heap::Heap;

/// One item's position in a completed trade cycle.
#[derive(Debug, Clone)]
pub struct CycleItem {
    pub name: String,
    pub owner: String,
    pub is_dummy: bool,
    /// Cost of the edge this item used to receive what it received.
    pub match_cost: u64,
    /// `NodeId` of this item's wanter node, for callers that want to look
    /// up more detail (e.g. metrics) directly on the graph that produced it.
    pub wanter: NodeId,
}

/// A closed sequence of matched items: each entry receives from the
/// previous entry's match and sends to the next entry.
pub type Cycle = Vec<CycleItem>;

impl Graph {
    /// Solve min-cost perfect matching and return the resulting trade
    /// cycles, or `None` if the control's cancel flag was observed.
    ///
    /// # Panics (debug builds)
    /// Panics if the graph has not been frozen.
    pub fn find_cycles(&mut self) -> Option<Vec<Cycle>> {
        debug_assert!(self.is_frozen(), "graph must be frozen before matching");

        for &w in &self.wanters {
            self.node_mut(w).matched = None;
            self.node_mut(w).price = 0;
        }
        for &s in &self.senders {
            self.node_mut(s).matched = None;
            let min_in = self.node(s).min_in_cost;
            self.node_mut(s).price = min_in;
        }

        let total_rounds = self.wanters.len();
        for round in 0..total_rounds {
            if round & 0x3F == 0 {
                let progress = ((round << 8) / total_rounds.max(1) + 1) as u32;
                self.control.progress.store(progress, Ordering::Relaxed);
                if self.control.cancel.load(Ordering::Relaxed) {
                    return None;
                }
                while self.control.paused.load(Ordering::Relaxed) {
                    thread::sleep(Duration::from_secs(1));
                }
            }

            let mut heap = Heap::with_capacity(self.senders.len() * 2);
            let (sink_from, _sink_cost) = self.dijkstra(&mut heap);
            let sink_from = sink_from.expect("dijkstra must find a sink every round on a pruned graph");

            self.augment(sink_from);
            self.update_prices(&heap);
        }
        self.control.progress.store(256, Ordering::Relaxed);

        self.elide_dummies();
        Some(self.extract_cycles())
    }

    /// Run one round of reduced-cost Dijkstra. Returns the cheapest
    /// unmatched sender reached (the augmenting path's sink) and its cost.
    fn dijkstra(&mut self, heap: &mut Heap) -> (Option<NodeId>, u64) {
        let mut sink_from: Option<NodeId> = None;
        let mut sink_cost = MAX_VALUE;

        for &s in &self.senders {
            self.node_mut(s).from = None;
            let h = heap.insert(s, INFINITY);
            self.node_mut(s).heap_handle = Some(h);
        }
        for &w in &self.wanters {
            self.node_mut(w).from = None;
            let cost = if self.node(w).matched.is_none() { 0 } else { INFINITY };
            let h = heap.insert(w, cost);
            self.node_mut(w).heap_handle = Some(h);
        }

        while let Some((node, cost)) = heap.extract_min() {
            if cost == INFINITY {
                break;
            }

            match self.node(node).direction {
                Direction::Wants => {
                    let matched = self.node(node).matched;
                    let edges = self.node(node).edges.clone();
                    let price = self.node(node).price;
                    for e in edges {
                        let edge = self.edge(e).clone();
                        if Some(edge.sender) == matched {
                            continue;
                        }
                        let other_price = self.node(edge.sender).price;
                        let c = price + edge.cost - other_price;
                        debug_assert!(c <= MAX_VALUE, "reduced cost must stay non-negative");
                        let other_handle = self.node(edge.sender).heap_handle.unwrap();
                        if cost + c < heap.cost(other_handle) {
                            heap.decrease_cost(other_handle, cost + c).ok();
                            self.node_mut(edge.sender).from = Some(node);
                        }
                    }
                }
                Direction::Sends => match self.node(node).matched {
                    None => {
                        if cost < sink_cost {
                            sink_from = Some(node);
                            sink_cost = cost;
                        }
                    }
                    Some(other) => {
                        let price = self.node(node).price;
                        let other_match_cost = self.node(other).match_cost;
                        let other_price = self.node(other).price;
                        let c = price - other_match_cost - other_price;
                        debug_assert!(c <= MAX_VALUE, "reduced cost must stay non-negative");
                        let other_handle = self.node(other).heap_handle.unwrap();
                        if cost + c < heap.cost(other_handle) {
                            heap.decrease_cost(other_handle, cost + c).ok();
                            self.node_mut(other).from = Some(node);
                        }
                    }
                },
            }
        }

        (sink_from, sink_cost)
    }

    /// Walk back from `sink_from` through `from` pointers, alternating
    /// sender/wanter, re-pointing matches along the augmenting path.
    fn augment(&mut self, sink_from: NodeId) {
        let mut sender = Some(sink_from);
        while let Some(s) = sender {
            let wanter = self.node(s).from.expect("augmenting path must reach a wanter");

            if let Some(old_match) = self.node(s).matched {
                self.node_mut(old_match).matched = None;
            }
            if let Some(old_match) = self.node(wanter).matched {
                self.node_mut(old_match).matched = None;
            }

            self.node_mut(s).matched = Some(wanter);
            self.node_mut(wanter).matched = Some(s);

            for &e in &self.node(wanter).edges.clone() {
                let edge = self.edge(e);
                if edge.sender == s {
                    self.node_mut(wanter).match_cost = edge.cost;
                    break;
                }
            }

            sender = self.node(wanter).from;
        }
    }

    fn update_prices(&mut self, heap: &Heap) {
        for &w in &self.wanters.clone() {
            let h = self.node(w).heap_handle.unwrap();
            let new_price = self.node(w).price.saturating_add(heap.cost(h)).min(MAX_VALUE);
            self.node_mut(w).price = new_price;
        }
        for &s in &self.senders.clone() {
            let h = self.node(s).heap_handle.unwrap();
            let new_price = self.node(s).price.saturating_add(heap.cost(h)).min(MAX_VALUE);
            self.node_mut(s).price = new_price;
        }
    }

    /// Route around matched dummy senders so a dummy never appears in the
    /// final cycles: if `w` matched a dummy `d`, re-match `w` to whatever
    /// `d`'s twin was matched to, and let `d` match itself.
    fn elide_dummies(&mut self) {
        for idx in 0..self.wanters.len() {
            let w = self.wanters[idx];
            if self.node(w).is_dummy {
                continue;
            }
            loop {
                let matched = self.node(w).matched.expect("wanter must be matched after find_cycles' round loop");
                if !self.node(matched).is_dummy {
                    break;
                }
                let dummy_sender = matched;
                let dummy_wanter = self.node(dummy_sender).twin;
                let next_sender = self.node(dummy_wanter).matched.expect("dummy wanter twin must be matched");

                self.node_mut(w).matched = Some(next_sender);
                self.node_mut(next_sender).matched = Some(w);
                self.node_mut(dummy_sender).matched = Some(dummy_wanter);
                self.node_mut(dummy_wanter).matched = Some(dummy_sender);
            }
        }
    }

    /// Walk the matching to produce disjoint cycles, skipping self-matched
    /// (non-trading) items.
    fn extract_cycles(&mut self) -> Vec<Cycle> {
        let ts = self.bump_timestamp();
        let mut cycles = Vec::new();

        for idx in 0..self.wanters.len() {
            let start = self.wanters[idx];
            if self.node(start).mark == ts || self.node(start).matched == Some(self.node(start).twin) {
                continue;
            }

            let mut cycle = Vec::new();
            let mut node = start;
            while self.node(node).mark != ts {
                self.node_mut(node).mark = ts;
                let n = self.node(node);
                cycle.push(CycleItem {
                    name: n.name.clone(),
                    owner: n.owner.clone(),
                    is_dummy: n.is_dummy,
                    match_cost: n.match_cost,
                    wanter: node,
                });
                let matched = n.matched.expect("trading item must be matched");
                node = self.node(matched).twin;
            }
            cycles.push(cycle);
        }
        cycles
    }
}
