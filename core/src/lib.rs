//! Trade Maximizer Core - Rust Engine
//!
//! A deterministic multi-party barter solver: given a set of items and each
//! item's owner's ranked want list, finds a set of disjoint trade cycles
//! that is optimal (minimum cost) under the graph as pruned, then tries
//! several random re-shufflings to search for a cycle set that scores
//! better under the configured metric.
//!
//! # Architecture
//!
//! - **builder**: Parses want-list input and assembles the initial [`graph::Graph`]
//! - **graph**: The twin-node trade graph - pruning, shuffling, min-cost matching
//! - **heap**: Addressable pairing heap backing Dijkstra's algorithm
//! - **metric**: Scoring functions for ranking candidate cycle sets
//! - **rng**: Deterministic random number generation
//! - **scheduler**: Worker-pool orchestration across iterations
//!
//! # Critical Invariants
//!
//! 1. All costs are u64, with [`graph::MAX_VALUE`] as the "infinite" sentinel
//! 2. All randomness is deterministic (seeded RNG) and replayed through [`rng::JavaRandom`]
//! 3. A [`graph::Graph`] is a plain owned value; a copy can move to a worker thread outright

pub mod builder;
pub mod error;
pub mod graph;
pub mod heap;
pub mod metric;
pub mod rng;
pub mod scheduler;

pub use builder::{build_graph, parse_input, Options, ParseData, PriorityScheme};
pub use error::{BuilderError, HeapError};
pub use graph::{Control, Cycle, CycleItem, Graph};
pub use heap::{Handle, Heap};
pub use metric::{MetricResult, MetricType};
pub use rng::JavaRandom;
pub use scheduler::{Scheduler, SolveResult};
