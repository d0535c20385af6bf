//! Run options
//!
//! One flat struct keyed by field rather than by option name, so the
//! compiler catches a typo'd option name instead of it silently defaulting.

use crate::metric::MetricType;

/// How a want list position ("rank") is turned into an edge cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PriorityScheme {
    /// Every want costs the same; only topology matters.
    NoPriorities,
    /// Cost equals the 1-based rank in the want list.
    Linear,
    /// Cost equals the rank-th triangular number `rank*(rank+1)/2`.
    Triangle,
    /// Cost equals `rank*rank`.
    Square,
    /// Like `Linear`, but costs are rescaled afterward to span a fixed range.
    Scaled,
    /// Costs come from explicit `item=N` annotations in the want list.
    Explicit,
}

impl Default for PriorityScheme {
    fn default() -> Self {
        PriorityScheme::NoPriorities
    }
}

/// Parsed run configuration: every `#!...` option line applied on top of
/// the compiled-in defaults.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Options {
    pub case_sensitive: bool,
    pub require_colons: bool,
    pub require_usernames: bool,
    pub show_missing: bool,
    pub sort_by_item: bool,
    pub allow_dummies: bool,
    pub show_elapsed_time: bool,
    pub verbose: bool,

    pub show_errors: bool,
    pub show_repeats: bool,
    pub show_loops: bool,
    pub show_summary: bool,
    pub show_non_trades: bool,
    pub show_stats: bool,

    pub metric: MetricType,
    pub priority_scheme: PriorityScheme,
    pub small_step: u64,
    pub big_step: u64,
    pub non_trade_cost: u64,
    pub iterations: u32,
    pub rand_seed: u64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            case_sensitive: false,
            require_colons: false,
            require_usernames: false,
            show_missing: false,
            sort_by_item: false,
            allow_dummies: false,
            show_elapsed_time: false,
            verbose: false,

            show_errors: true,
            show_repeats: true,
            show_loops: true,
            show_summary: true,
            show_non_trades: true,
            show_stats: true,

            metric: MetricType::ChainSizesSos,
            priority_scheme: PriorityScheme::NoPriorities,
            small_step: 1,
            big_step: 9,
            non_trade_cost: 1_000_000_000,
            iterations: 1,
            rand_seed: 0,
        }
    }
}

impl Options {
    /// Apply one `#!`-line token (already upper-cased and stripped of the
    /// `#!` prefix) to these options.
    ///
    /// Returns `Err` for a token this scheme does not recognize at all;
    /// malformed *arguments* to a recognized option (e.g. `SEED=abc`) are
    /// also reported as `Err` with a message describing the problem.
    pub fn apply_token(&mut self, token: &str) -> Result<(), String> {
        match token {
            "CASE-SENSITIVE" => self.case_sensitive = true,
            "REQUIRE-COLONS" => self.require_colons = true,
            "REQUIRE-USERNAMES" => self.require_usernames = true,
            "HIDE-ERRORS" => self.show_errors = false,
            "HIDE-REPEATS" => self.show_repeats = false,
            "HIDE-LOOPS" => self.show_loops = false,
            "HIDE-SUMMARY" => self.show_summary = false,
            "HIDE-NONTRADES" => self.show_non_trades = false,
            "HIDE-STATS" => self.show_stats = false,
            "SHOW-MISSING" => self.show_missing = true,
            "SORT-BY-ITEM" => self.sort_by_item = true,
            "ALLOW-DUMMIES" => self.allow_dummies = true,
            "SHOW-ELAPSED-TIME" => self.show_elapsed_time = true,
            "VERBOSE" => self.verbose = true,
            "LINEAR-PRIORITIES" => self.priority_scheme = PriorityScheme::Linear,
            "TRIANGLE-PRIORITIES" => self.priority_scheme = PriorityScheme::Triangle,
            "SQUARE-PRIORITIES" => self.priority_scheme = PriorityScheme::Square,
            "SCALED-PRIORITIES" => self.priority_scheme = PriorityScheme::Scaled,
            "EXPLICIT-PRIORITIES" => self.priority_scheme = PriorityScheme::Explicit,
            _ if token.starts_with("SMALL-STEP=") => {
                self.small_step = parse_non_negative(&token[11..], "SMALL-STEP")?;
            }
            _ if token.starts_with("BIG-STEP=") => {
                self.big_step = parse_non_negative(&token[9..], "BIG-STEP")?;
            }
            _ if token.starts_with("NONTRADE-COST=") => {
                self.non_trade_cost = parse_positive(&token[14..], "NONTRADE-COST")?;
            }
            _ if token.starts_with("ITERATIONS=") => {
                self.iterations = parse_positive(&token[11..], "ITERATIONS")? as u32;
            }
            _ if token.starts_with("SEED=") => {
                self.rand_seed = parse_positive(&token[5..], "SEED")?;
            }
            _ if token.starts_with("METRIC=") => {
                self.metric = match &token[7..] {
                    "USERS-TRADING" => MetricType::UsersTrading,
                    "USERS-SOS" => MetricType::UsersSos,
                    "COMBINE-SHIPPING" => MetricType::CombineShipping,
                    "CHAIN-SIZES-SOS" => MetricType::ChainSizesSos,
                    other => return Err(format!("Unknown metric option \"{other}\"")),
                };
            }
            other => return Err(format!("Unknown option \"{other}\"")),
        }
        Ok(())
    }
}

fn parse_non_negative(s: &str, option: &str) -> Result<u64, String> {
    s.parse::<u64>().map_err(|_| format!("{option} argument must be a non-negative integer"))
}

fn parse_positive(s: &str, option: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("{option} argument must be a positive integer")),
    }
}
