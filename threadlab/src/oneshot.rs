//!
//! One-shot Result Channels
//!
//! Carries exactly one success value or one typed error from a producer
//! (the worker) to a waiter. The slot behind the channel transitions from
//! pending to ready exactly once; publishing consumes the producer, so
//! double-publish is a compile error rather than a runtime protocol
//! violation.
//!
//! ## Ordering
//!
//! The payload is written and readiness flipped inside the same critical
//! section, and the waiter reads both under the same guard. The mutex
//! release/acquire pairing makes the payload write happen-before any
//! observation of readiness: a waiter that sees "ready" can never see a
//! partially written payload. Readiness is signaled strictly after the
//! payload write commits.
//!
//! ## Failure propagation
//!
//! Domain errors inside the worker's computation are routed through
//! [`Producer::publish_err`] and surface from [`Waiter::wait`] as a typed
//! failure the caller can branch on. A producer dropped without publishing
//! (a worker that died early) marks the slot abandoned and wakes the
//! waiter instead of stranding it.
//!

use std::sync::{Arc, Condvar, Mutex};

use thiserror::Error;
use tracing::trace;

use crate::error::ComputeError;

/// The slot shared by producer and waiter.
///
/// `Ready` is terminal and reached at most once; `Abandoned` is terminal
/// and reached only by dropping an unused producer.
enum Slot<T> {
    Pending,
    Ready(Result<T, ComputeError>),
    Abandoned,
}

struct OneshotShared<T> {
    slot: Mutex<Slot<T>>,
    condvar: Condvar,
}

/// Creates a connected producer/waiter pair around an empty slot.
pub fn oneshot<T>() -> (Producer<T>, Waiter<T>) {
    let shared = Arc::new(OneshotShared {
        slot: Mutex::new(Slot::Pending),
        condvar: Condvar::new(),
    });
    (
        Producer {
            shared: Arc::clone(&shared),
            published: false,
        },
        Waiter { shared },
    )
}

/// Error returned by [`Waiter::wait`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecvError {
    /// The worker published a domain failure.
    #[error(transparent)]
    Compute(#[from] ComputeError),

    /// The producer was dropped without publishing anything.
    #[error("worker dropped its result slot without publishing")]
    Abandoned,
}

/// The writing half of a one-shot channel.
///
/// Exposes exactly one terminal operation: [`publish`](Producer::publish)
/// or [`publish_err`](Producer::publish_err), each consuming the producer.
pub struct Producer<T> {
    shared: Arc<OneshotShared<T>>,
    published: bool,
}

impl<T> Producer<T> {
    /// Publishes the success value and wakes every waiter.
    pub fn publish(self, value: T) {
        self.fill(Ok(value));
    }

    /// Publishes a domain failure and wakes every waiter.
    pub fn publish_err(self, error: ComputeError) {
        self.fill(Err(error));
    }

    fn fill(mut self, outcome: Result<T, ComputeError>) {
        let mut slot = self.shared.slot.lock().unwrap();
        // The payload write and the readiness transition commit together,
        // before the notification goes out.
        *slot = Slot::Ready(outcome);
        self.published = true;
        trace!("result published");
        self.shared.condvar.notify_all();
    }
}

impl<T> Drop for Producer<T> {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        *self.shared.slot.lock().unwrap() = Slot::Abandoned;
        trace!("result slot abandoned");
        self.shared.condvar.notify_all();
    }
}

/// The reading half of a one-shot channel.
pub struct Waiter<T> {
    shared: Arc<OneshotShared<T>>,
}

impl<T: Clone> Waiter<T> {
    /// Blocks the calling thread until the producer has published, then
    /// returns the published outcome.
    ///
    /// Only the calling thread blocks. Once the slot is ready it is
    /// read-only: every subsequent call returns the same outcome.
    pub fn wait(&self) -> Result<T, RecvError> {
        let mut slot = self.shared.slot.lock().unwrap();
        loop {
            match &*slot {
                Slot::Pending => slot = self.shared.condvar.wait(slot).unwrap(),
                Slot::Ready(Ok(value)) => return Ok(value.clone()),
                Slot::Ready(Err(error)) => return Err(RecvError::Compute(error.clone())),
                Slot::Abandoned => return Err(RecvError::Abandoned),
            }
        }
    }

    /// Whether a call to [`wait`](Waiter::wait) would return immediately.
    pub fn is_ready(&self) -> bool {
        !matches!(*self.shared.slot.lock().unwrap(), Slot::Pending)
    }
}

/// Sums `1..=n` by iteration, the demo computation carried by the channel.
///
/// Iterative on purpose: the point of the demo is a worker that takes long
/// enough for the waiter to visibly block.
pub fn sum_up_to(n: i64) -> Result<i64, ComputeError> {
    if n < 0 {
        return Err(ComputeError::NegativeInput(n));
    }
    let mut total = 0i64;
    for i in 1..=n {
        total += i;
    }
    Ok(total)
}
