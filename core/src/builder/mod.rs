//! Turning parsed want lists into a solvable [`Graph`]
//!
//! Two passes: first create a wanter/sender pair for every item with a want
//! list, then walk every want list again adding edges, since an edge's
//! target node might not exist until the first pass has run to completion.

mod options;
mod parse_data;

pub use options::{Options, PriorityScheme};
pub use parse_data::{parse_input, ParseData};

use std::collections::HashMap;

use crate::graph::{Graph, NodeId};

/// Build a frozen, pruning-ready graph from `parsed`, recording additional
/// diagnostics into `parsed.errors` as it goes (unknown items, repeats,
/// self-wants, etc. - the same non-fatal problems a failed-to-parse item
/// produces without aborting the whole run).
pub fn build_graph(parsed: &mut ParseData, options: &Options) -> Graph {
    let mut graph = Graph::new_template();
    let mut known_names: HashMap<String, bool> = HashMap::new();

    parsed.num_items = 0;
    parsed.num_dummy_items = 0;
    parsed.max_name_width = 0;

    // Pass 1: nodes -----------------------------------------------------
    for i in 0..parsed.want_lists.len() {
        if parsed.want_lists[i].is_empty() {
            continue;
        }
        let mut name = parsed.want_lists[i][0].clone();
        let mut owner = String::new();

        if name.starts_with('(') {
            owner = name.replace('#', " ");
            parsed.want_lists[i].remove(0);
            name = parsed.want_lists[i][0].clone();
            if !parsed.usernames.contains(&owner) {
                parsed.usernames.push(owner.clone());
            }
        }

        let is_dummy = name.starts_with('%');
        if is_dummy {
            if owner.is_empty() {
                parsed.errors.push(format!("**** Dummy item {name} declared without a username."));
                continue;
            }
            if !options.allow_dummies {
                parsed.errors.push(format!("**** Dummy items not allowed. ({name})"));
                continue;
            }
            name = format!("{name} for user {owner}");
            parsed.want_lists[i][0] = name.clone();
        }

        if !parsed.official_names.is_empty() && !parsed.official_names.contains(&name) && !is_dummy {
            parsed.errors.push(format!(
                "**** Cannot define want list for {name} because it is not an official name.  (Usually indicates a typo by the item owner.)"
            ));
            parsed.want_lists[i] = Vec::new();
            continue;
        }
        if known_names.contains_key(&name) {
            parsed.errors.push(format!(
                "**** Item {name} has multiple want lists--ignoring all but first.  (Sometimes the result of an accidental line break in the middle of a want list.)"
            ));
            parsed.want_lists[i] = Vec::new();
            continue;
        }

        parsed.num_items += 1;
        if is_dummy {
            parsed.num_dummy_items += 1;
        }
        known_names.insert(name.clone(), true);

        let wanter = graph.add_node(name.clone(), owner, is_dummy);
        if parsed.official_names.contains(&name) {
            parsed.used_names.push(name.clone());
        }
        if !is_dummy {
            let width = graph.node(wanter).show(options.sort_by_item).len();
            if width > parsed.max_name_width {
                parsed.max_name_width = width;
            }
        }
    }

    // Pass 2: edges -------------------------------------------------------
    let mut unknown_names: HashMap<String, u32> = HashMap::new();

    for i in 0..parsed.want_lists.len() {
        let list = parsed.want_lists[i].clone();
        if list.is_empty() {
            continue;
        }

        let from_name = &list[0];
        let Some(from_wanter) = graph.find(from_name) else { continue };
        let from_sender = graph.node(from_wanter).twin;

        graph.add_edge(from_wanter, from_sender, options.non_trade_cost);

        let mut rank: u64 = 1;
        let mut j = 1;
        while j < list.len() {
            let mut to_name = list[j].clone();
            j += 1;

            if to_name == ";" {
                rank += options.big_step;
                continue;
            }

            if let Some(eq_pos) = to_name.find('=') {
                if options.priority_scheme != PriorityScheme::Explicit {
                    parsed.errors.push(format!(
                        "**** Cannot use '=' annotation in item {to_name} in want list for item {from_name} unless using EXPLICIT_PRIORITIES."
                    ));
                    continue;
                }
                let (item_part, cost_part) = (to_name[..eq_pos].to_string(), &to_name[eq_pos + 1..]);
                let Ok(explicit_cost) = cost_part.parse::<u64>() else {
                    parsed.errors.push(format!("**** Item {to_name} in want list for item {from_name} must have the format 'name=number'."));
                    continue;
                };
                if explicit_cost < 1 {
                    parsed.errors.push(format!("**** Explicit priority must be positive in item {to_name} in want list for item {from_name}."));
                    continue;
                }
                rank = explicit_cost;
                to_name = item_part;
            }

            if to_name.starts_with('%') {
                let owner = graph.node(from_wanter).owner.clone();
                if owner.is_empty() {
                    parsed.errors.push(format!("**** Dummy item {to_name} used in want list for item {from_name}, which does not have a username."));
                    continue;
                }
                to_name = format!("{to_name} for user {owner}");
            }

            let Some(to_wanter) = graph.find(&to_name) else {
                if parsed.official_names.contains(&to_name) {
                    rank += options.small_step;
                } else {
                    *unknown_names.entry(to_name).or_insert(0) += 1;
                }
                continue;
            };
            let to_sender = graph.node(to_wanter).twin;

            if to_sender == from_sender {
                parsed.errors.push(format!("**** Item {to_name} appears in its own want list."));
            } else if graph.contains_edge(from_wanter, to_sender) {
                if options.show_repeats {
                    parsed.errors.push(format!("**** Item {to_name} is repeated in want list for {from_name}."));
                }
            } else if !graph.node(to_sender).is_dummy && graph.node(from_wanter).owner == graph.node(to_sender).owner {
                parsed.errors.push(format!(
                    "**** Item {} contains item {} from the same user ({})",
                    graph.node(from_wanter).name,
                    graph.node(to_sender).name,
                    graph.node(from_wanter).owner
                ));
            } else {
                let mut cost = match options.priority_scheme {
                    PriorityScheme::NoPriorities => 1,
                    PriorityScheme::Linear => rank,
                    PriorityScheme::Triangle => rank * (rank + 1) / 2,
                    PriorityScheme::Square => rank * rank,
                    PriorityScheme::Scaled => rank,
                    PriorityScheme::Explicit => rank,
                };
                if graph.node(from_wanter).is_dummy {
                    cost = options.non_trade_cost;
                }
                graph.add_edge(from_wanter, to_sender, cost);
                rank += options.small_step;
            }
        }

        if options.priority_scheme == PriorityScheme::Scaled && !graph.node(from_wanter).is_dummy {
            rescale_edges(&mut graph, from_wanter, from_sender, options);
        }
    }

    graph.freeze();

    for (item, occurrences) in unknown_names {
        let plural = if occurrences == 1 { "" } else { "s" };
        parsed.errors.push(format!("**** Unknown item {item} ({occurrences} occurrence{plural})"));
    }

    graph
}

/// `SCALED_PRIORITIES`: after a wanter's full want list is known, rescale
/// every real want's cost (the no-trade self-loop is untouched) so costs
/// span a fixed range regardless of how many wants were listed.
fn rescale_edges(graph: &mut Graph, from_wanter: NodeId, from_sender: NodeId, _options: &Options) {
    let edges = graph.edges_of(from_wanter);
    let n = edges.len().saturating_sub(1);
    if n == 0 {
        return;
    }
    for e in edges {
        let (sender, cost) = graph.edge_endpoints(e);
        if sender != from_sender {
            graph.set_edge_cost(e, 1 + (cost - 1) * 2520 / n as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_item_swap_builds_two_viable_wanters() {
        let mut options = Options::default();
        let mut parsed = parse_input("A: B\nB: A\n", &mut options).unwrap();
        let mut graph = build_graph(&mut parsed, &options);
        graph.remove_impossible_edges();
        assert_eq!(graph.wanters.len(), 2);
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn unknown_want_is_reported_without_aborting() {
        let mut options = Options::default();
        let mut parsed = parse_input("A: B\nB: A\n", &mut options).unwrap();
        parsed.want_lists[0].push("ZZZ".to_string());
        let _graph = build_graph(&mut parsed, &options);
        assert!(parsed.errors.iter().any(|e| e.contains("Unknown item ZZZ")));
    }

    #[test]
    fn self_want_is_reported() {
        let mut options = Options::default();
        let mut parsed = parse_input("A: A\n", &mut options).unwrap();
        let _graph = build_graph(&mut parsed, &options);
        assert!(parsed.errors.iter().any(|e| e.contains("appears in its own want list")));
    }

    #[test]
    fn dummy_item_requires_allow_dummies_option() {
        let mut options = Options::default();
        let mut parsed = parse_input("(ALICE) A: B\n(ALICE) %DUMMY: B\nB: A\n", &mut options).unwrap();
        let _graph = build_graph(&mut parsed, &options);
        assert!(parsed.errors.iter().any(|e| e.contains("Dummy items not allowed")));
    }
}
