//!
//! threadlab - Thread Lifecycle and Synchronization Toolkit
//!
//! A small library of native-thread concurrency patterns, each usable on
//! its own and exercised together by the `threadlab` demo binary.
//!
//! ## Worker Lifecycle
//!
//! [`Worker`] wraps `std::thread` spawning behind a handle with an explicit
//! lifecycle: spawn failure is synchronous and typed, `join` consumes the
//! handle, and `is_finished` probes completion without blocking.
//!
//! ## Control Channels
//!
//! [`control_channel`] connects a controller to one worker loop. The
//! controller issues pause/resume/cancel; the worker blocks while paused
//! (no busy-spin) and observes cancellation at every loop boundary.
//! Cancellation always wins over pause.
//!
//! ## One-shot Results
//!
//! [`oneshot`] carries exactly one value or one typed error from a worker
//! to a waiter. The payload is fully written before readiness is
//! observable, so a waiter never sees a half-built result.
//!
//! ## Shared Accumulation
//!
//! [`SharedCounter`] is one total behind one lock, incremented by many
//! workers with one acquisition per increment. [`accumulate`] runs the
//! whole contention exercise and returns the final total.
//!
//! ## Console Collaborators
//!
//! The demos talk to the console only through the [`CommandSource`] and
//! [`StatusSink`] traits, so the core never depends on a concrete
//! input/output mechanism.
//!

pub mod accumulator;
pub mod console;
pub mod control;
pub mod error;
pub mod oneshot;
pub mod worker;

pub use accumulator::*;
pub use console::*;
pub use control::*;
pub use error::*;
pub use oneshot::*;
pub use worker::*;
