//!
//! Console Collaborator Seams
//!
//! The toolkit never touches stdin or stdout directly. Command input and
//! status output go through these traits, so the demos can be driven by a
//! real console, a scripted test, or anything else that produces command
//! events and consumes lines.
//!

use std::collections::VecDeque;

/// A discrete command event from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Toggle the worker between paused and running.
    PauseToggle,
    /// Cancel the worker and end the demo.
    Quit,
}

/// Supplies command events to a controller.
///
/// Sampled at a bounded interval chosen by the caller; the protocol
/// tolerates arbitrary polling latency.
pub trait CommandSource {
    /// Returns the next pending command, or `None` if none is waiting.
    /// Must not block.
    fn poll(&mut self) -> Option<Command>;
}

/// Consumes human-readable status lines.
///
/// Ordering of lines across threads is best-effort, not a correctness
/// property.
pub trait StatusSink {
    /// Emits one status line.
    fn line(&mut self, text: &str);
}

/// A pre-scripted command sequence, mainly for tests.
#[derive(Debug, Default)]
pub struct ScriptedCommands {
    queue: VecDeque<Command>,
}

impl ScriptedCommands {
    /// Builds a source that yields `commands` in order, then `None`.
    pub fn new<I: IntoIterator<Item = Command>>(commands: I) -> ScriptedCommands {
        ScriptedCommands {
            queue: commands.into_iter().collect(),
        }
    }
}

impl CommandSource for ScriptedCommands {
    fn poll(&mut self) -> Option<Command> {
        self.queue.pop_front()
    }
}

/// Collects status lines in memory, mainly for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Every line emitted so far, in arrival order.
    pub lines: Vec<String>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> MemorySink {
        MemorySink::default()
    }
}

impl StatusSink for MemorySink {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
