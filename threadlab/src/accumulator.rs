//!
//! Shared Accumulation Under One Lock
//!
//! Many workers add into a single total guarded by one mutex, acquiring
//! the guard for exactly one increment at a time. The fine grain is the
//! point: the exercise is heavy lock contention proving the absence of
//! lost updates, not throughput (per-thread partial sums would avoid the
//! contention and prove nothing).
//!
//! The counter is an explicitly shared, jointly owned object scoped to one
//! run -- never process-wide state.
//!

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::LabError;
use crate::worker::Worker;

/// One shared total behind one mutual-exclusion guard.
///
/// Clones share the same total; the counter lives as long as any clone.
#[derive(Clone)]
pub struct SharedCounter {
    total: Arc<Mutex<i64>>,
}

impl SharedCounter {
    /// A fresh counter at zero.
    pub fn new() -> SharedCounter {
        SharedCounter {
            total: Arc::new(Mutex::new(0)),
        }
    }

    /// Adds `n` to the total under the guard.
    ///
    /// One acquisition per call; the guard is never held across unrelated
    /// work.
    pub fn add(&self, n: i64) {
        *self.total.lock().unwrap() += n;
    }

    /// Reads the current total.
    ///
    /// Reports [`LabError::Poisoned`] if a worker panicked while holding
    /// the guard, rather than trusting a half-updated total.
    pub fn total(&self) -> Result<i64, LabError> {
        self.total
            .lock()
            .map(|guard| *guard)
            .map_err(|_| LabError::Poisoned {
                context: "shared counter",
            })
    }
}

impl Default for SharedCounter {
    fn default() -> SharedCounter {
        SharedCounter::new()
    }
}

/// The closed-form total `workers * limit * (limit + 1) / 2`.
pub fn expected_total(workers: usize, limit: i64) -> i64 {
    workers as i64 * limit * (limit + 1) / 2
}

/// Runs the full mutual-exclusion exercise: `workers` threads each add
/// `1..=limit` into one shared counter, one guarded increment at a time.
///
/// Joins every worker before returning the final total. If any spawn
/// fails, no further workers are started and the already-running ones are
/// joined before the error is reported, so a partial launch never leaks
/// threads.
pub fn accumulate(workers: usize, limit: i64) -> Result<i64, LabError> {
    let counter = SharedCounter::new();
    let mut spawned: Vec<Worker> = Vec::with_capacity(workers);

    for index in 0..workers {
        let counter = counter.clone();
        let result = Worker::spawn(&format!("acc-{index}"), move || {
            for i in 1..=limit {
                counter.add(i);
            }
        });

        match result {
            Ok(worker) => spawned.push(worker),
            Err(err) => {
                debug!(spawned = spawned.len(), "spawn failed mid-launch, unwinding");
                for worker in spawned {
                    worker.join();
                }
                return Err(err.into());
            }
        }
    }

    for worker in spawned {
        worker.join();
    }
    counter.total()
}
