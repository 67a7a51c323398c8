//!
//! Pause/Resume/Cancel Control Channels
//!
//! Connects a controller to one worker loop through a shared state record
//! guarded by a mutex and condition variable. The controller mutates the
//! state and broadcasts; the worker re-evaluates the state at every loop
//! boundary and blocks (without spinning) while paused.
//!
//! ## Protocol
//!
//! - Commands are durable state transitions, not transient pulses: a
//!   command issued while the worker is busy still takes effect at the
//!   worker's next boundary check.
//! - Every mutation is followed by a broadcast, so a suspended worker
//!   always wakes to re-evaluate.
//! - Cancellation is checked first and unconditionally wins: a worker can
//!   never stay suspended once cancel has been requested, and cancel is
//!   irreversible.
//!

use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::console::{Command, CommandSource, StatusSink};
use crate::worker::Worker;

/// What the worker loop should do next, decided at a loop boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Perform one unit of work, then come back to the boundary.
    Run,
    /// Exit the loop cleanly; no further work may be emitted.
    Cancelled,
}

/// Shared record of the worker's commanded state.
///
/// All reads and writes happen under the mutex in [`ControlShared`].
/// `cancelled` is monotonic: once true it never reverts.
struct ControlState {
    paused: bool,
    cancelled: bool,
}

struct ControlShared {
    state: Mutex<ControlState>,
    condvar: Condvar,
}

/// Creates a connected controller/worker pair around fresh control state.
pub fn control_channel() -> (Controller, ControlHandle) {
    let shared = Arc::new(ControlShared {
        state: Mutex::new(ControlState {
            paused: false,
            cancelled: false,
        }),
        condvar: Condvar::new(),
    });
    (
        Controller {
            shared: Arc::clone(&shared),
        },
        ControlHandle { shared },
    )
}

/// The commanding side of a control channel.
///
/// Safe to use concurrently with the worker's own checks: every mutation
/// takes the guard, then wakes all suspended waiters.
pub struct Controller {
    shared: Arc<ControlShared>,
}

impl Controller {
    /// Suspends the worker at its next boundary. No-op after cancel.
    pub fn pause(&self) {
        self.set_paused(true);
    }

    /// Lets a paused worker continue. No-op after cancel.
    pub fn resume(&self) {
        self.set_paused(false);
    }

    /// Sets the paused flag directly. No-op after cancel.
    pub fn set_paused(&self, paused: bool) {
        let mut state = self.shared.state.lock().unwrap();
        if state.cancelled {
            return;
        }
        state.paused = paused;
        debug!(paused, "control state updated");
        self.shared.condvar.notify_all();
    }

    /// Flips between paused and running, returning the new paused state.
    /// Returns `false` without changes after cancel.
    pub fn toggle_pause(&self) -> bool {
        let mut state = self.shared.state.lock().unwrap();
        if state.cancelled {
            return false;
        }
        state.paused = !state.paused;
        debug!(paused = state.paused, "control state toggled");
        self.shared.condvar.notify_all();
        state.paused
    }

    /// Requests cancellation. Irreversible; wakes any suspended worker so
    /// it can exit even if it was paused.
    pub fn request_cancel(&self) {
        let mut state = self.shared.state.lock().unwrap();
        state.cancelled = true;
        state.paused = false;
        debug!("cancel requested");
        self.shared.condvar.notify_all();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.shared.state.lock().unwrap().cancelled
    }
}

/// The worker-loop side of a control channel.
pub struct ControlHandle {
    shared: Arc<ControlShared>,
}

impl ControlHandle {
    /// Blocks while paused, then reports what to do next.
    ///
    /// Call at every loop boundary. Suspension is a condition wait, not a
    /// spin: the thread sleeps until the controller broadcasts. Cancelled
    /// is examined before paused, so cancellation wins even when both are
    /// pending.
    pub fn wait_ready(&self) -> Directive {
        let mut state = self.shared.state.lock().unwrap();
        while state.paused && !state.cancelled {
            state = self.shared.condvar.wait(state).unwrap();
        }
        if state.cancelled {
            Directive::Cancelled
        } else {
            Directive::Run
        }
    }

    /// Non-blocking cancellation probe for checks inside a unit of work.
    pub fn should_stop(&self) -> bool {
        self.shared.state.lock().unwrap().cancelled
    }

    /// Idles for up to `dur` between units of work, waking early if
    /// cancellation arrives.
    ///
    /// Returns [`Directive::Cancelled`] as soon as cancel is observed, so
    /// the worker never sits out a full interval after being told to exit.
    pub fn park_for(&self, dur: Duration) -> Directive {
        let deadline = Instant::now() + dur;
        let mut state = self.shared.state.lock().unwrap();
        loop {
            if state.cancelled {
                return Directive::Cancelled;
            }
            let now = Instant::now();
            if now >= deadline {
                return Directive::Run;
            }
            let (next, _) = self
                .shared
                .condvar
                .wait_timeout(state, deadline - now)
                .unwrap();
            state = next;
        }
    }
}

/// Runs the tick/tock worker loop until cancelled.
///
/// At each boundary: exit if cancelled, block while paused, otherwise emit
/// one alternating `Tick`/`Tock` line and idle for `interval`.
pub fn run_tick_loop<S: StatusSink>(control: &ControlHandle, sink: &mut S, interval: Duration) {
    let mut tick = true;
    loop {
        if control.wait_ready() == Directive::Cancelled {
            break;
        }

        sink.line(if tick { "Tick" } else { "Tock" });
        tick = !tick;

        if control.park_for(interval) == Directive::Cancelled {
            break;
        }
    }
}

/// Drives a control channel from a command source until the demo ends.
///
/// Samples `source` every `poll`, applying pause-toggles and quit to the
/// controller, and returns once quit was issued or the worker finished on
/// its own. The polling interval bounds input latency only; it is not a
/// correctness property.
pub fn drive_commands<C, S>(
    worker: &Worker,
    controller: &Controller,
    source: &mut C,
    sink: &mut S,
    poll: Duration,
) where
    C: CommandSource,
    S: StatusSink,
{
    loop {
        while let Some(command) = source.poll() {
            match command {
                Command::PauseToggle => {
                    let paused = controller.toggle_pause();
                    sink.line(if paused { "[Main] Pause" } else { "[Main] Continue" });
                }
                Command::Quit => {
                    sink.line("[Main] Quit");
                    controller.request_cancel();
                    return;
                }
            }
        }

        if worker.is_finished() {
            return;
        }

        thread::sleep(poll);
    }
}
