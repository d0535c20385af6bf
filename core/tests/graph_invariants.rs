//! Property tests over randomly generated want-list graphs, checking the
//! structural invariants the builder and matcher are both supposed to
//! preserve: twin symmetry, SCC-pruning leaving no orphan reachable via a
//! cycle, a perfect matching existing whenever the graph is a disjoint
//! union of rotations, and determinism of repeated runs from a fixed seed.

use proptest::prelude::*;
use trademax_core::graph::{Control, Direction, Graph};
use trademax_core::JavaRandom;

/// Builds a graph out of `n` items owned by `n` distinct owners, wired as a
/// single rotation by `offset` (item `i` wants item `(i + offset) % n`).
/// Since `offset != 0`, no item wants itself, and the rotation is a single
/// cycle (when gcd(offset, n) == 1) or a union of cycles covering every
/// item exactly once either way, so a perfect matching always exists.
fn rotation_graph(n: usize, offset: usize) -> Graph {
    let mut graph = Graph::new(Control::new());
    let wanters: Vec<_> = (0..n)
        .map(|i| graph.add_node(format!("item{i}"), format!("owner{i}"), false))
        .collect();
    for i in 0..n {
        let target = wanters[(i + offset) % n];
        let sender = graph.node(target).twin;
        graph.add_edge(wanters[i], sender, 0);
    }
    graph.freeze();
    graph
}

proptest! {
    #[test]
    fn every_wanter_and_sender_are_reciprocal_twins(n in 2usize..15) {
        let graph = rotation_graph(n, 1);
        for &w in &graph.wanters {
            let s = graph.node(w).twin;
            prop_assert_eq!(graph.node(s).direction, Direction::Sends);
            prop_assert_eq!(graph.node(s).twin, w);
        }
    }

    #[test]
    fn rotation_graph_has_no_orphans_after_pruning(n in 2usize..15, offset in 1usize..14) {
        prop_assume!(offset < n);
        let mut graph = rotation_graph(n, offset);
        graph.remove_impossible_edges();
        prop_assert!(graph.orphans.is_empty());
    }

    #[test]
    fn rotation_graph_always_has_a_perfect_matching(n in 2usize..12, offset in 1usize..11) {
        prop_assume!(offset < n);
        let mut graph = rotation_graph(n, offset);
        graph.remove_impossible_edges();
        let cycles = graph.find_cycles().expect("not canceled");
        let total: usize = cycles.iter().map(|c| c.len()).sum();
        prop_assert_eq!(total, n);

        // Every item appears in exactly one cycle.
        let mut seen = std::collections::HashSet::new();
        for cycle in &cycles {
            for item in cycle {
                prop_assert!(seen.insert(item.name.clone()));
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_shuffle_order(n in 2usize..12, seed in 0u64..1_000_000) {
        let graph_a = rotation_graph(n, 1);
        let graph_b = rotation_graph(n, 1);

        let mut rng_a = JavaRandom::new(seed);
        let mut rng_b = JavaRandom::new(seed);

        let mut a = graph_a;
        a.shuffle(&mut rng_a);
        let copy_a = a.copy_shuffled();

        let mut b = graph_b;
        b.shuffle(&mut rng_b);
        let copy_b = b.copy_shuffled();

        let names_a: Vec<_> = copy_a.wanters.iter().map(|&w| copy_a.node(w).name.clone()).collect();
        let names_b: Vec<_> = copy_b.wanters.iter().map(|&w| copy_b.node(w).name.clone()).collect();
        prop_assert_eq!(names_a, names_b);
    }

    #[test]
    fn copy_shuffled_preserves_every_edge_as_some_reordering(n in 2usize..10) {
        let mut graph = rotation_graph(n, 1);
        let mut rng = JavaRandom::new(42);
        graph.shuffle(&mut rng);
        let copy = graph.copy_shuffled();

        let mut original_pairs: Vec<(String, String)> = graph
            .wanters
            .iter()
            .flat_map(|&w| graph.edges_of(w).into_iter().map(move |e| {
                let (sender, _) = graph.edge_endpoints(e);
                (graph.node(w).name.clone(), graph.node(sender).name.clone())
            }))
            .collect();
        let mut copy_pairs: Vec<(String, String)> = copy
            .wanters
            .iter()
            .flat_map(|&w| copy.edges_of(w).into_iter().map(move |e| {
                let (sender, _) = copy.edge_endpoints(e);
                (copy.node(w).name.clone(), copy.node(sender).name.clone())
            }))
            .collect();
        original_pairs.sort();
        copy_pairs.sort();
        prop_assert_eq!(original_pairs, copy_pairs);
    }
}
