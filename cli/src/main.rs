//! Command-line front end for the trade-cycle solver
//!
//! Reads want-list input from a file (or stdin), parses and builds the
//! graph, prunes it, then runs the configured number of iterations looking
//! for the best-scoring set of trade cycles, and prints a trade loop / item
//! summary / stats report.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use trademax_core::{build_graph, parse_input, Control, JavaRandom, MetricType, Options, Scheduler};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let input_path = args.get(1).map(String::as_str);

    let input = match read_input(input_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error reading input: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut options = Options::default();
    let mut parsed = match parse_input(&input, &mut options) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("input error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if options.show_errors && !parsed.errors.is_empty() {
        parsed.errors.sort();
        eprintln!("ERRORS:");
        for err in &parsed.errors {
            eprintln!("{err}");
        }
        eprintln!();
    }

    if options.iterations > 1 && options.rand_seed == 0 {
        options.rand_seed = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.subsec_millis() as u64).unwrap_or(1).max(1);
        eprintln!("No explicit SEED; using {}", options.rand_seed);
    }
    if options.metric != MetricType::ChainSizesSos && options.priority_scheme != trademax_core::PriorityScheme::NoPriorities {
        eprintln!("Warning: using priorities with the non-default metric is normally worthless");
    }

    let mut graph = build_graph(&mut parsed, &options);

    let control = Control::new();
    let scheduler = Scheduler::new(control, options.metric, options.iterations);
    graph.control = scheduler.control().clone();
    graph.remove_impossible_edges();

    let mut rng = JavaRandom::new(options.rand_seed);
    let Some(result) = scheduler.run(graph, &mut rng) else {
        eprintln!("OPERATION CANCELED.");
        return ExitCode::FAILURE;
    };

    print_report(&result, &parsed, &options);
    ExitCode::SUCCESS
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn pad(name: &str, width: usize) -> String {
    if name.len() >= width {
        name.to_string()
    } else {
        format!("{name:<width$}")
    }
}

fn print_report(result: &trademax_core::SolveResult, parsed: &trademax_core::ParseData, options: &Options) {
    let width = parsed.max_name_width;
    let mut loops: Vec<String> = Vec::new();
    let mut summary: Vec<String> = Vec::new();
    let mut num_trades = 0usize;
    let mut total_cost: u64 = 0;

    for cycle in &result.cycles {
        let len = cycle.len();
        num_trades += len;
        for (j, item) in cycle.iter().enumerate() {
            let receives_from = &cycle[(j + 1) % len];
            let sends_to = &cycle[if j == 0 { len - 1 } else { j - 1 }];
            let receiver_label = show_item(item, options.sort_by_item);
            let received_label = show_item(receives_from, options.sort_by_item);
            let sender_label = show_item(sends_to, options.sort_by_item);

            loops.push(format!("{} receives {}", pad(&receiver_label, width), received_label));
            summary.push(format!("{} receives {} and sends to {}", pad(&receiver_label, width), pad(&received_label, width), sender_label));
            total_cost += item.match_cost;
        }
        loops.push(String::new());
    }

    if options.show_loops {
        println!("TRADE LOOPS ({num_trades} total trades):\n");
        for line in &loops {
            println!("{line}");
        }
    }

    if options.show_summary {
        summary.sort();
        println!("ITEM SUMMARY ({num_trades} total trades):\n");
        for line in &summary {
            println!("{line}");
        }
        println!();
    }

    let real_items = parsed.num_items.saturating_sub(parsed.num_dummy_items);
    print!("Num trades  = {num_trades} of {real_items} items");
    if real_items > 0 {
        println!(" ({:.1}%)", 100.0 * num_trades as f64 / real_items as f64);
    } else {
        println!();
    }

    if options.show_stats {
        print!("Total cost  = {total_cost}");
        if num_trades > 0 {
            println!(" (avg {:.2})", total_cost as f64 / num_trades as f64);
        } else {
            println!();
        }
        println!("Num groups  = {}", result.cycles.len());
        let mut sizes: Vec<usize> = result.cycles.iter().map(|c| c.len()).collect();
        sizes.sort_unstable();
        print!("Group sizes =");
        for size in sizes.iter().rev() {
            print!(" {size}");
        }
        println!();
        println!("{}", result.metric.summary);
    }
}

fn show_item(item: &trademax_core::CycleItem, sort_by_item: bool) -> String {
    if item.owner.is_empty() || item.is_dummy {
        item.name.clone()
    } else if sort_by_item {
        format!("{} {}", item.name, item.owner)
    } else {
        format!("{} {}", item.owner, item.name)
    }
}
