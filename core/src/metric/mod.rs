//! Ranking a completed set of trade cycles
//!
//! All four metrics return a score where *lower is better*, so the
//! scheduler can always keep "the iteration with the smallest score seen so
//! far" regardless of which metric is configured. Two of the four
//! (`UsersTrading`, `CombineShipping`) are naturally "bigger is better", so
//! their score is the negated count.

use std::collections::HashMap;
use std::fmt;

use crate::graph::Cycle;

/// Which scoring function ranks a round's cycles against another round's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MetricType {
    /// Minimize the sum of squares of cycle lengths (favors many small trades).
    ChainSizesSos,
    /// Maximize the number of distinct owners who trade at least one item.
    UsersTrading,
    /// Minimize the sum of squares of each owner's trade count (spreads trades evenly).
    UsersSos,
    /// Maximize the number of shipments two owners can combine into one package.
    CombineShipping,
}

/// A metric's score plus the human-readable summary printed alongside a
/// result (e.g. `"[ 14 : 3 2 2 1 ]"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricResult {
    pub score: i64,
    pub summary: String,
}

impl fmt::Display for MetricResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}

/// Score a completed list of cycles under `metric`.
pub fn calculate(cycles: &[Cycle], metric: MetricType) -> MetricResult {
    match metric {
        MetricType::ChainSizesSos => chain_sizes_sos(cycles),
        MetricType::UsersTrading => users_trading(cycles),
        MetricType::UsersSos => users_sos(cycles),
        MetricType::CombineShipping => combine_shipping(cycles),
    }
}

fn chain_sizes_sos(cycles: &[Cycle]) -> MetricResult {
    let mut sizes: Vec<usize> = cycles.iter().map(|c| c.len()).collect();
    let sum: i64 = sizes.iter().map(|&n| (n * n) as i64).sum();
    sizes.sort_unstable();

    let mut summary = format!("[ {sum} :");
    for size in sizes.iter().rev() {
        summary.push_str(&format!(" {size}"));
    }
    summary.push_str(" ]");

    MetricResult { score: sum, summary }
}

fn users_trading(cycles: &[Cycle]) -> MetricResult {
    let mut seen: Vec<&str> = Vec::new();
    for cycle in cycles {
        for item in cycle {
            if !seen.contains(&item.owner.as_str()) {
                seen.push(&item.owner);
            }
        }
    }
    let count = seen.len() as i64;
    MetricResult {
        score: -count,
        summary: format!("[ users trading = {count} ]"),
    }
}

fn users_sos(cycles: &[Cycle]) -> MetricResult {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for cycle in cycles {
        for item in cycle {
            *counts.entry(item.owner.as_str()).or_insert(0) += 1;
        }
    }
    let sum: i64 = counts.values().map(|&n| n * n).sum();
    MetricResult {
        score: sum,
        summary: format!("[ users trading = {}, sum of squares = {sum} ]", counts.len()),
    }
}

fn combine_shipping(cycles: &[Cycle]) -> MetricResult {
    let mut pairs: HashMap<(&str, &str), i64> = HashMap::new();
    for cycle in cycles {
        let len = cycle.len();
        for j in 0..len {
            let receiver = &cycle[j];
            let sender = &cycle[(j + 1) % len];
            *pairs.entry((receiver.owner.as_str(), sender.owner.as_str())).or_insert(0) += 1;
        }
    }
    let count: i64 = pairs.values().filter(|&&n| n > 1).map(|&n| n - 1).sum();
    MetricResult {
        score: -count,
        summary: format!("[ combine shipping = {count} ]"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    fn item(name: &str, owner: &str) -> crate::graph::CycleItem {
        crate::graph::CycleItem {
            name: name.to_string(),
            owner: owner.to_string(),
            is_dummy: false,
            match_cost: 0,
            wanter: NodeId::new(0),
        }
    }

    #[test]
    fn chain_sizes_sos_sums_squares_and_sorts_descending() {
        let cycles = vec![vec![item("A", "alice"), item("B", "bob"), item("C", "carl")], vec![item("D", "dan"), item("E", "eve")]];
        let result = chain_sizes_sos(&cycles);
        assert_eq!(result.score, 9 + 4);
        assert_eq!(result.summary, "[ 13 : 3 2 ]");
    }

    #[test]
    fn users_trading_counts_distinct_owners_once() {
        let cycles = vec![vec![item("A", "alice"), item("B", "alice"), item("C", "bob")]];
        let result = users_trading(&cycles);
        assert_eq!(result.score, -2);
    }

    #[test]
    fn combine_shipping_counts_extra_shipments_in_a_pair() {
        // alice receives from bob three separate times: two can be combined.
        let cycles = vec![
            vec![item("A1", "alice"), item("B1", "bob")],
            vec![item("A2", "alice"), item("B2", "bob")],
            vec![item("A3", "alice"), item("B3", "bob")],
        ];
        // Each 2-item cycle contributes to both the "alice receives from bob"
        // and "bob receives from alice" pairs, so three repeats of the same
        // pair combine into two extra shipments in each direction.
        let result = combine_shipping(&cycles);
        assert_eq!(result.score, -4);
    }
}
