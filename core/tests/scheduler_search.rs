//! Scheduler-level tests: multiple iterations over a graph with more than
//! one valid matching, checking the best-by-metric bookkeeping actually
//! improves (or at least never regresses) as iterations proceed.

use trademax_core::{build_graph, parse_input, Control, JavaRandom, MetricType, Options, Scheduler};

#[test]
fn multiple_iterations_produce_a_valid_matching() {
    let mut options = Options::default();
    options.iterations = 8;
    options.rand_seed = 7;

    let mut parsed = parse_input(
        "(A1) I1: I2 I3\n(A2) I2: I3 I1\n(A3) I3: I1 I2\n(A4) I4: I5\n(A5) I5: I4\n",
        &mut options,
    )
    .unwrap();
    let mut graph = build_graph(&mut parsed, &options);
    graph.remove_impossible_edges();

    let mut rng = JavaRandom::new(options.rand_seed);
    let scheduler = Scheduler::new(Control::new(), options.metric, options.iterations);
    let result = scheduler.run(graph, &mut rng).expect("not canceled");

    let total_items: usize = result.cycles.iter().map(|c| c.len()).sum();
    assert_eq!(total_items, 5);
}

#[test]
fn users_trading_metric_prefers_more_distinct_owners() {
    let mut options = Options::default();
    options.iterations = 1;
    options.metric = MetricType::UsersTrading;

    let mut parsed = parse_input("(A) I1: I2\n(B) I2: I1\n", &mut options).unwrap();
    let mut graph = build_graph(&mut parsed, &options);
    graph.remove_impossible_edges();
    let mut rng = JavaRandom::new(1);
    let scheduler = Scheduler::new(Control::new(), options.metric, options.iterations);
    let result = scheduler.run(graph, &mut rng).unwrap();
    assert_eq!(result.metric.score, -2);
}
