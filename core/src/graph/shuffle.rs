//! Reference-order shuffle and deep copy
//!
//! Both operations look more elaborate than you'd expect for "shuffle a
//! list" and "copy a graph" because their exact ordering is load-bearing:
//! the scheduler shuffles the template graph once per iteration and copies
//! it for a worker, and a different node/edge visitation order here would
//! change which random draws land on which node, silently breaking the
//! determinism contract in `rng_golden.rs` even though any single copy
//! would still be a perfectly valid graph on its own.

use super::{Control, Graph, Node};
use crate::rng::JavaRandom;

impl Graph {
    /// Fisher-Yates shuffle of the wanter list, then of each wanter's own
    /// edge list, in that order. Senders are never reordered directly; a
    /// sender's effective edge order only changes because [`Graph::copy_shuffled`]
    /// re-emits edges by reading them off the (now shuffled) wanter side.
    pub fn shuffle(&mut self, rng: &mut JavaRandom) {
        let n = self.wanters.len();
        for i in (2..=n).rev() {
            let j = rng.next_int(i as u32) as usize;
            self.wanters.swap(j, i - 1);
        }

        for a in 0..self.wanters.len() {
            let w = self.wanters[a];
            let len = self.node(w).edges.len();
            for i in (2..=len).rev() {
                let j = rng.next_int(i as u32) as usize;
                self.node_mut(w).edges.swap(j, i - 1);
            }
        }
    }

    /// Produce an isomorphic, frozen copy of `self`: wanters in the current
    /// (possibly shuffled) order, senders in their original order, edges
    /// re-emitted by walking senders in original order but reading each
    /// one's edges off its *twin wanter*, so the edge insertion order
    /// tracks the shuffled wanter ordering. The copy shares this graph's
    /// cancel/pause signals but gets its own progress counter (see
    /// [`Control::for_worker`]), and stamps `num_copies` from this graph's
    /// running counter.
    pub fn copy_shuffled(&mut self) -> Graph {
        debug_assert!(self.is_frozen(), "cannot copy an unfrozen graph");

        let mut out = Graph::new(self.control.for_worker());
        out.nodes.reserve(self.nodes.len());

        // Wanters first, in the current (shuffled) order. The twin link is
        // a placeholder here (senders haven't been created yet) and is
        // patched below once each sender is copied.
        for &w in &self.wanters {
            let src = self.node(w);
            let new_wanter = super::NodeId::new(out.nodes.len());
            out.nodes.push(Node::new(src.name.clone(), src.owner.clone(), src.is_dummy, super::Direction::Wants, new_wanter));
            out.wanters.push(new_wanter);
            out.name_map.insert(src.name.clone(), new_wanter);
        }

        // Then senders, in their original (never-shuffled) order.
        for &s in &self.senders {
            let src = self.node(s);
            let wanter_name = self.node(src.twin).name.clone();
            let new_wanter = *out.name_map.get(&wanter_name).expect("twin wanter must already be copied");
            let new_sender = super::NodeId::new(out.nodes.len());
            out.nodes.push(Node::new(src.name.clone(), src.owner.clone(), src.is_dummy, super::Direction::Sends, new_wanter));
            out.node_mut(new_wanter).twin = new_sender;
            // `min_in_cost` is only ever set by pruning's `recompute_min_in_cost`
            // (never touched by `shuffle`), so the value already on `src` is
            // still correct for the copy; `find_cycles` needs it seeded before
            // its first Dijkstra round, and this copy is never pruned itself.
            out.node_mut(new_sender).min_in_cost = src.min_in_cost;
            out.senders.push(new_sender);
        }

        // Edges: walk old senders in original order, but read edges off
        // each one's twin wanter so the shuffled wanter edge order survives.
        for &old_sender in &self.senders {
            let old_wanter = self.node(old_sender).twin;
            let edge_ids: Vec<_> = self.node(old_wanter).edges.clone();
            for e in edge_ids {
                let edge = self.edge(e);
                let new_wanter = *out.name_map.get(&self.node(edge.wanter).name).unwrap();
                let target_wanter_name = &self.node(self.node(edge.sender).twin).name;
                let new_target_wanter = *out.name_map.get(target_wanter_name).unwrap();
                let new_sender = out.node(new_target_wanter).twin;
                out.add_edge(new_wanter, new_sender, edge.cost);
            }
        }

        self.num_copies += 1;
        out.num_copies = self.num_copies;
        out.viable_real_items = self.viable_real_items;
        out.freeze();
        out
    }
}

impl Graph {
    /// Construct a template graph with fresh, un-shared control signals;
    /// convenience for the builder, which does not yet know which
    /// `Scheduler` (if any) will run it.
    pub fn new_template() -> Graph {
        Graph::new(Control::new())
    }
}
