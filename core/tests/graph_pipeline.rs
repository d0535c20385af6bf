//! End-to-end tests over the builder -> prune -> shuffle/copy -> match
//! pipeline, using small hand-written want lists where the expected trades
//! are obvious by inspection.

use trademax_core::{build_graph, parse_input, JavaRandom, Options};

fn solve(input: &str) -> (Vec<trademax_core::Cycle>, trademax_core::ParseData) {
    let mut options = Options::default();
    let mut parsed = parse_input(input, &mut options).expect("input should parse");
    let mut graph = build_graph(&mut parsed, &options);
    graph.remove_impossible_edges();
    let cycles = graph.find_cycles().expect("not canceled");
    (cycles, parsed)
}

#[test]
fn two_party_swap_trades_both_items() {
    let (cycles, _) = solve("(ALICE) A: B\n(BOB) B: A\n");
    let total_items: usize = cycles.iter().map(|c| c.len()).sum();
    assert_eq!(total_items, 2);
    assert_eq!(cycles.len(), 1);
}

#[test]
fn three_way_cycle_is_found() {
    let (cycles, _) = solve("(ALICE) A: B\n(BOB) B: C\n(CARL) C: A\n");
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 3);
}

#[test]
fn item_with_no_path_back_is_pruned_as_an_orphan() {
    // D wants A, but nothing in turn wants D, so no cycle can ever include
    // D; A and B still swap with each other.
    let mut options = Options::default();
    let mut parsed = parse_input("(ALICE) A: B\n(BOB) B: A\n(DAN) D: A\n", &mut options).unwrap();
    let mut graph = build_graph(&mut parsed, &options);
    graph.remove_impossible_edges();
    assert_eq!(graph.orphans.len(), 1);
    assert_eq!(graph.node(graph.orphans[0]).name, "D");

    let cycles = graph.find_cycles().unwrap();
    let total_items: usize = cycles.iter().map(|c| c.len()).sum();
    assert_eq!(total_items, 2);
}

#[test]
fn shuffled_copy_still_finds_a_perfect_matching() {
    let mut options = Options::default();
    let mut parsed = parse_input("(ALICE) A: B\n(BOB) B: C\n(CARL) C: A\n", &mut options).unwrap();
    let mut graph = build_graph(&mut parsed, &options);
    graph.remove_impossible_edges();

    let mut rng = JavaRandom::new(42);
    graph.shuffle(&mut rng);
    let mut copy = graph.copy_shuffled();
    let cycles = copy.find_cycles().unwrap();
    let total_items: usize = cycles.iter().map(|c| c.len()).sum();
    assert_eq!(total_items, 3);
    assert_eq!(copy.num_copies, 1);
}

#[test]
fn dummy_item_is_never_reported_as_part_of_a_trade() {
    let (cycles, _) = solve("#! ALLOW-DUMMIES\n(ALICE) A: %NOTHING\n(ALICE) %NOTHING: B\n(BOB) B: A\n");
    for cycle in &cycles {
        assert!(cycle.iter().all(|item| !item.is_dummy));
    }
}
