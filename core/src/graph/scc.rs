//! Strongly-connected-component pruning (Kosaraju's algorithm)
//!
//! A trade is only possible along an edge if there is some path back from
//! the sender to the wanter; otherwise the item could never return to
//! complete a cycle. `remove_impossible_edges` keeps only the edges whose
//! endpoints lie in the same strongly connected component of the
//! wanter/sender twin graph, then drops any item left with nothing but its
//! own self-loop.
//!
//! The traversal below is the textbook two-pass Kosaraju DFS, but written
//! iteratively with an explicit stack (one stack frame per node, one
//! resumable edge index per frame) instead of recursion, since want-list
//! graphs can be large enough that the natural recursive formulation would
//! risk overflowing the native stack. The visiting order, and therefore the
//! `finished` order and the resulting `component` labels, is identical to
//! the recursive formulation.

use std::sync::atomic::Ordering;

use super::{EdgeId, Graph, NodeId};

impl Graph {
    /// Cull edges that cross strongly-connected-component boundaries, then
    /// drop the resulting orphans. Cooperative: bails out early (leaving a
    /// partially pruned graph) if the control's cancel flag is observed.
    ///
    /// # Panics (debug builds)
    /// Panics if the graph has not been frozen yet.
    pub fn remove_impossible_edges(&mut self) {
        debug_assert!(self.is_frozen(), "graph must be frozen before pruning");

        let ts = self.bump_timestamp();
        self.finished.clear();

        for i in 0..self.wanters.len() {
            if self.control.cancel.load(Ordering::Relaxed) {
                break;
            }
            let w = self.wanters[i];
            if self.node(w).mark != ts {
                self.visit_wanters(w, ts);
            }
        }

        for idx in (0..self.finished.len()).rev() {
            let s = self.finished[idx];
            if self.node(s).mark != ts {
                self.component_counter += 1;
                let component = self.component_counter;
                self.visit_senders(s, ts, component);
            }
        }

        for i in 0..self.wanters.len() {
            if self.control.cancel.load(Ordering::Relaxed) {
                break;
            }
            let w = self.wanters[i];
            self.remove_bad_edges(w);
        }
        for i in 0..self.senders.len() {
            if self.control.cancel.load(Ordering::Relaxed) {
                break;
            }
            let s = self.senders[i];
            self.remove_bad_edges(s);
            self.recompute_min_in_cost(s);
        }

        self.remove_orphans();
    }

    /// DFS over the WANTS side: visiting `w` means visiting every sender
    /// twin it has an edge to (itself a WANTS node once we hop to its
    /// twin), then recording `w`'s sender twin as finished.
    fn visit_wanters(&mut self, start: NodeId, ts: u32) {
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
        self.node_mut(start).mark = ts;

        while let Some(&(node, idx)) = stack.last() {
            let edges_len = self.node(node).edges.len();
            if idx >= edges_len {
                stack.pop();
                let finished_twin = self.node(node).twin;
                self.finished.push(finished_twin);
                continue;
            }
            let edge_id: EdgeId = self.node(node).edges[idx];
            let sender = self.edge(edge_id).sender;
            let child = self.node(sender).twin;
            stack.last_mut().unwrap().1 = idx + 1;
            if self.node(child).mark != ts {
                self.node_mut(child).mark = ts;
                stack.push((child, 0));
            }
        }
    }

    /// DFS over the SENDS side, following the reverse direction (a sender's
    /// "out" edges, for this pass, are its wanter twin's wanters). Every
    /// node visited in one call gets the same `component` label.
    fn visit_senders(&mut self, start: NodeId, ts: u32, component: u32) {
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
        self.node_mut(start).mark = ts;

        while let Some(&(node, idx)) = stack.last() {
            let edges_len = self.node(node).edges.len();
            if idx >= edges_len {
                stack.pop();
                let twin = self.node(node).twin;
                self.node_mut(node).component = component;
                self.node_mut(twin).component = component;
                continue;
            }
            let edge_id: EdgeId = self.node(node).edges[idx];
            let wanter = self.edge(edge_id).wanter;
            let child = self.node(wanter).twin;
            stack.last_mut().unwrap().1 = idx + 1;
            if self.node(child).mark != ts {
                self.node_mut(child).mark = ts;
                stack.push((child, 0));
            }
        }
    }

    /// Drop every edge on `node` whose wanter and sender ended up in
    /// different components.
    fn remove_bad_edges(&mut self, node: NodeId) {
        let keep: Vec<EdgeId> = self
            .node(node)
            .edges
            .iter()
            .copied()
            .filter(|&e| {
                let edge = self.edge(e);
                self.node(edge.wanter).component == self.node(edge.sender).component
            })
            .collect();
        self.node_mut(node).edges = keep;
    }

    fn recompute_min_in_cost(&mut self, sender: NodeId) {
        let min = self
            .node(sender)
            .edges
            .iter()
            .map(|&e| self.edge(e).cost)
            .min()
            .unwrap_or(super::MAX_VALUE);
        self.node_mut(sender).min_in_cost = min;
    }

    /// Drop wanters (and their sender twins) left with nothing but their
    /// own no-trade self-loop. Counts surviving non-dummy items into
    /// `viable_real_items` for reporting.
    fn remove_orphans(&mut self) {
        for idx in (0..self.wanters.len()).rev() {
            let w = self.wanters[idx];
            if self.node(w).edges.len() < 2 {
                debug_assert_eq!(self.node(w).edges.len(), 1);
                debug_assert_eq!(self.edge(self.node(w).edges[0]).sender, self.node(w).twin);
                self.orphans.push(w);
                self.wanters.remove(idx);
            } else if !self.node(w).is_dummy {
                self.viable_real_items += 1;
            }
        }

        for idx in (0..self.senders.len()).rev() {
            let s = self.senders[idx];
            if self.node(s).edges.len() < 2 {
                self.senders.remove(idx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Control;

    fn add_pair(g: &mut Graph, a: &str, b: &str) {
        let wa = g.find(a).unwrap_or_else(|| g.add_node(a, "", false));
        let wb = g.find(b).unwrap_or_else(|| g.add_node(b, "", false));
        g.add_edge(wa, g.node(wb).twin, 1);
        g.add_edge(wb, g.node(wa).twin, 1);
    }

    #[test]
    fn mutual_pair_survives_pruning() {
        let mut g = Graph::new(Control::new());
        add_pair(&mut g, "A", "B");
        let a = g.find("A").unwrap();
        let b = g.find("B").unwrap();
        g.add_edge(a, g.node(a).twin, 1_000_000_000);
        g.add_edge(b, g.node(b).twin, 1_000_000_000);
        g.freeze();
        g.remove_impossible_edges();
        assert_eq!(g.wanters.len(), 2);
        assert!(g.orphans.is_empty());
    }

    #[test]
    fn dangling_wanter_becomes_orphan() {
        let mut g = Graph::new(Control::new());
        add_pair(&mut g, "A", "B");
        let a = g.find("A").unwrap();
        let b = g.find("B").unwrap();
        g.add_edge(a, g.node(a).twin, 1_000_000_000);
        g.add_edge(b, g.node(b).twin, 1_000_000_000);

        let c = g.add_node("C", "", false);
        g.add_edge(c, g.node(c).twin, 1_000_000_000);
        // C wants A, but nothing wants C back.
        g.add_edge(c, g.node(a).twin, 1);

        g.freeze();
        g.remove_impossible_edges();
        assert_eq!(g.wanters.len(), 2);
        assert_eq!(g.orphans.len(), 1);
        assert_eq!(g.node(g.orphans[0]).name, "C");
    }
}
