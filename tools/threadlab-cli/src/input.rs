///
/// Console collaborators backed by the real terminal.
///
/// A dedicated reader thread turns stdin lines into command events
/// (`t` toggles pause, `q` quits, end-of-input quits); the controller
/// samples them without blocking. Status lines go to stdout.
///

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use threadlab::{Command, CommandSource, SpawnError, StatusSink};

/// Maps one input line to a command event.
pub fn parse_key(line: &str) -> Option<Command> {
    match line.trim() {
        "t" | "T" => Some(Command::PauseToggle),
        "q" | "Q" => Some(Command::Quit),
        _ => None,
    }
}

/// Command events read from stdin on a dedicated thread.
///
/// The reader thread blocks on stdin and is deliberately never joined; it
/// ends with the process. End-of-input is delivered as a quit so a closed
/// stdin can not leave the demo running unattended.
pub struct StdinCommands {
    receiver: Receiver<Command>,
}

impl StdinCommands {
    /// Spawns the reader thread and returns the polling half.
    pub fn spawn() -> Result<StdinCommands, SpawnError> {
        let (sender, receiver) = mpsc::channel();

        thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    if let Some(command) = parse_key(&line) {
                        if sender.send(command).is_err() {
                            return;
                        }
                    }
                }
                let _ = sender.send(Command::Quit);
            })
            .map_err(|source| SpawnError {
                name: "stdin-reader".to_string(),
                source,
            })?;

        Ok(StdinCommands { receiver })
    }
}

impl CommandSource for StdinCommands {
    fn poll(&mut self) -> Option<Command> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Status lines printed straight to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl StatusSink for StdoutSink {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_bindings() {
        assert_eq!(parse_key("t"), Some(Command::PauseToggle));
        assert_eq!(parse_key("T"), Some(Command::PauseToggle));
        assert_eq!(parse_key(" q "), Some(Command::Quit));
        assert_eq!(parse_key("Q"), Some(Command::Quit));
        assert_eq!(parse_key("x"), None);
        assert_eq!(parse_key(""), None);
    }
}
