//!
//! Worker Lifecycle
//!
//! Wraps `std::thread` spawning behind a handle that makes the lifecycle
//! explicit: spawn failure is synchronous and typed, joining consumes the
//! handle, and completion can be probed without blocking.
//!
//! Prefer this (and the standard spawning facility in general) over any
//! lower-level raw thread-creation primitive: raw creation can skip the
//! per-thread runtime setup that the standard facility performs.
//!

use std::thread::{self, JoinHandle, ThreadId};

use tracing::trace;

use crate::error::SpawnError;

/// Handle to a spawned worker thread.
///
/// Exclusively owned by the controller that spawned it until joined.
/// A failure inside the worker's own computation is not visible through
/// this handle; it travels through the one-shot channel to whoever waits
/// on the result.
pub struct Worker {
    name: String,
    handle: JoinHandle<()>,
}

impl Worker {
    /// Spawns `f` on a new named OS thread.
    ///
    /// The new thread shares the process address space, starts executing
    /// immediately, and may interleave arbitrarily with the caller.
    /// Returns [`SpawnError`] when the runtime cannot allocate a thread;
    /// in that case no thread exists.
    pub fn spawn<F>(name: &str, f: F) -> Result<Worker, SpawnError>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(f)
            .map_err(|source| SpawnError {
                name: name.to_string(),
                source,
            })?;

        trace!(worker = name, id = ?handle.thread().id(), "spawned");
        Ok(Worker {
            name: name.to_string(),
            handle,
        })
    }

    /// The name the worker was spawned under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The worker's thread identifier, for status lines.
    pub fn thread_id(&self) -> ThreadId {
        self.handle.thread().id()
    }

    /// Returns true once the worker's function has returned.
    ///
    /// Non-blocking. The handle must still be joined to reclaim the
    /// thread's resources.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks the calling thread until the worker's function has fully
    /// returned, then releases the OS resources tied to the handle.
    ///
    /// Consumes the handle, so joining the same worker twice is a compile
    /// error rather than undefined behavior. If the worker panicked, the
    /// panic is resumed on the joining thread.
    pub fn join(self) {
        match self.handle.join() {
            Ok(()) => trace!(worker = %self.name, "joined"),
            Err(payload) => {
                if !thread::panicking() {
                    std::panic::resume_unwind(payload);
                }
            }
        }
    }
}
