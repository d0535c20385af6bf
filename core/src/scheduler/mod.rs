//! Cooperative worker-pool scheduler
//!
//! One template graph is shuffled and copied once per iteration; each copy
//! is handed by value to its own OS thread, which runs [`Graph::find_cycles`]
//! to completion and reports back over a channel. The scheduling loop spawns
//! up to `idealThreadCount() + slack`, harvests finishers, and spawns more,
//! as a plain blocking loop rather than hanging off a GUI event timer.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::graph::{Control, Cycle, Graph};
use crate::metric::{self, MetricResult, MetricType};
use crate::rng::JavaRandom;

/// The best result found across all iterations run so far.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub cycles: Vec<Cycle>,
    pub metric: MetricResult,
    pub num_copies: u32,
}

struct Finished {
    worker_id: u32,
    cycles: Option<Vec<Cycle>>,
    num_copies: u32,
}

/// Drives repeated solves of one pruned template graph, keeping the best
/// result by `metric`, tie-broken toward the iteration that needed fewer
/// graph copies.
pub struct Scheduler {
    control: Control,
    metric: MetricType,
    iterations: u32,
}

impl Scheduler {
    pub fn new(control: Control, metric: MetricType, iterations: u32) -> Self {
        Scheduler { control, metric, iterations }
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    /// Run every configured iteration to completion and return the best
    /// [`SolveResult`], or `None` if canceled before any iteration finished.
    ///
    /// `template` must already be frozen and pruned
    /// ([`Graph::remove_impossible_edges`]). The first iteration runs the
    /// template unshuffled; only the second and later iterations shuffle it.
    pub fn run(&self, mut template: Graph, rng: &mut JavaRandom) -> Option<SolveResult> {
        debug_assert!(template.is_frozen(), "template graph must be frozen before scheduling");

        let ideal_threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        let mut waiting_slack: usize = 2;

        let (tx, rx) = mpsc::channel::<Finished>();
        let mut in_flight: HashMap<u32, Control> = HashMap::new();
        let mut spawned = 0u32;
        let mut completions = 0u32;

        let mut best: Option<SolveResult> = None;

        loop {
            if self.control.cancel.load(Ordering::Relaxed) {
                return best;
            }

            let mut just_finished = 0usize;
            while let Ok(done) = rx.try_recv() {
                in_flight.remove(&done.worker_id);
                just_finished += 1;
                if self.control.cancel.load(Ordering::Relaxed) {
                    continue;
                }
                completions += 1;
                let Some(cycles) = done.cycles else { continue };
                let scored = metric::calculate(&cycles, self.metric);
                let replace = match &best {
                    None => true,
                    Some(current) => scored.score < current.metric.score || (scored.score == current.metric.score && done.num_copies < current.num_copies),
                };
                if replace {
                    best = Some(SolveResult { cycles, metric: scored, num_copies: done.num_copies });
                }
            }

            if just_finished >= waiting_slack {
                waiting_slack = just_finished + 2;
            }

            while !self.control.cancel.load(Ordering::Relaxed) && in_flight.len() < ideal_threads + waiting_slack && spawned < self.iterations {
                if spawned > 0 {
                    template.shuffle(rng);
                }
                let worker_id = spawned;
                spawned += 1;
                let mut copy = template.copy_shuffled();
                let worker_control = copy.control.clone();
                let tx = tx.clone();
                thread::spawn(move || {
                    let num_copies = copy.num_copies;
                    // A panicking worker must not wedge the scheduler's
                    // in_flight bookkeeping; treat it as a no-result
                    // iteration like an ordinary cancellation would be.
                    let cycles = panic::catch_unwind(AssertUnwindSafe(|| copy.find_cycles())).unwrap_or(None);
                    let _ = tx.send(Finished { worker_id, cycles, num_copies });
                });
                in_flight.insert(worker_id, worker_control);
            }

            let in_flight_progress: u32 = in_flight.values().map(|c| c.progress.load(Ordering::Relaxed)).sum();
            self.control.progress.store(256 * completions + in_flight_progress, Ordering::Relaxed);

            if in_flight.is_empty() && spawned >= self.iterations {
                return best;
            }

            thread::sleep(Duration::from_millis(500));
        }
    }
}
