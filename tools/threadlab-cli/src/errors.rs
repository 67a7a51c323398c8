///
/// Demo runner error types.
///
/// Infrastructure failures from the toolkit pass through transparently;
/// config failures carry the offending path. Every variant ends the run
/// with a non-zero exit code.
///

use std::path::PathBuf;
use thiserror::Error;

use threadlab::{LabError, SpawnError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error(transparent)]
    Lab(#[from] LabError),

    #[error("Failed to read config at {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config at {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = CliError::ConfigParse {
            path: PathBuf::from("/tmp/threadlab.toml"),
            reason: "expected integer".to_string(),
        };
        assert!(err.to_string().contains("Invalid config"));
        assert!(err.to_string().contains("/tmp/threadlab.toml"));
        assert!(err.to_string().contains("expected integer"));
    }
}
