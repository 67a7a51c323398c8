//!
//! Error types for the threadlab toolkit.
//!
//! Two kinds of failure are kept strictly apart:
//!
//! - Infrastructure failures ([`SpawnError`], [`LabError`]) abort the
//!   operation that requested them and are surfaced synchronously to the
//!   controller.
//! - Domain failures ([`ComputeError`]) happen inside a worker's own
//!   computation and travel through the one-shot channel to the waiter;
//!   they are never raised as a process-level fault.
//!

use thiserror::Error;

/// Thread creation failed; no worker thread exists.
///
/// Distinct from a failure *inside* a running worker, which is reported
/// through the one-shot channel instead.
#[derive(Debug, Error)]
#[error("failed to spawn worker '{name}': {source}")]
pub struct SpawnError {
    /// The name the worker would have been spawned under.
    pub name: String,
    /// The underlying allocation failure from the runtime.
    #[source]
    pub source: std::io::Error,
}

/// Infrastructure failures that unwind a whole demo run.
#[derive(Debug, Error)]
pub enum LabError {
    /// A worker thread could not be created. Workers spawned before the
    /// failure have already been joined by the time this is returned.
    #[error(transparent)]
    Spawn(#[from] SpawnError),

    /// A guard was poisoned by a panicking worker; the shared state it
    /// protected can no longer be trusted.
    #[error("shared state poisoned: {context}")]
    Poisoned {
        /// Which guarded state was found poisoned.
        context: &'static str,
    },
}

/// Domain-level failure produced inside a worker's computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    /// The input was outside the computation's domain.
    #[error("input must be >= 0, got {0}")]
    NegativeInput(i64),

    /// The deliberate failure used by the demos to exercise the error path.
    #[error("worker failed intentionally")]
    Injected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = SpawnError {
            name: "ticker".to_string(),
            source: std::io::Error::other("out of threads"),
        };
        assert!(err.to_string().contains("ticker"));
        assert!(err.to_string().contains("out of threads"));

        let err = LabError::Poisoned { context: "shared counter" };
        assert!(err.to_string().contains("poisoned"));
        assert!(err.to_string().contains("shared counter"));

        assert_eq!(
            ComputeError::NegativeInput(-3).to_string(),
            "input must be >= 0, got -3"
        );
        assert_eq!(
            ComputeError::Injected.to_string(),
            "worker failed intentionally"
        );
    }
}
