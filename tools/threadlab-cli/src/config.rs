///
/// # Config Parsing
///
/// This module provides types and functions for parsing `threadlab.toml`
/// config files carrying the demo defaults. Every field is optional and
/// falls back to the built-in default; command-line flags override both.
///
/// ## Example threadlab.toml
///
/// ```toml
/// tick_ms = 1000
/// poll_ms = 30
/// sleep_ms = 2000
/// workers = 10
/// limit = 10000
/// sum_n = 100000
/// ```
///

use serde::Deserialize;
use std::path::Path;

use crate::errors::CliError;

/// Where the config is looked up when no `--config` path is given.
pub const DEFAULT_CONFIG_PATH: &str = "threadlab.toml";

/// Demo defaults, overridable per subcommand flag.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabConfig {
    /// Interval between Tick/Tock lines, in milliseconds.
    pub tick_ms: u64,
    /// Command input sampling interval, in milliseconds. Bounds input
    /// latency only; never a correctness property.
    pub poll_ms: u64,
    /// How long each `spawn` demo worker sleeps, in milliseconds.
    pub sleep_ms: u64,
    /// Worker count for the `accumulate` demo.
    pub workers: usize,
    /// Per-worker increment bound for the `accumulate` demo.
    pub limit: i64,
    /// Upper bound of the `result` demo's summation.
    pub sum_n: i64,
}

impl Default for LabConfig {
    fn default() -> LabConfig {
        LabConfig {
            tick_ms: 1000,
            poll_ms: 30,
            sleep_ms: 2000,
            workers: 10,
            limit: 10_000,
            sum_n: 100_000,
        }
    }
}

impl LabConfig {
    /// Loads the config.
    ///
    /// An explicit path must exist and parse; the default path is used
    /// only when present, otherwise the built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<LabConfig, CliError> {
        match path {
            Some(path) => LabConfig::read(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    LabConfig::read(default)
                } else {
                    Ok(LabConfig::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<LabConfig, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|err| CliError::ConfigParse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_yields_defaults() {
        let config: LabConfig = toml::from_str("").unwrap();
        assert_eq!(config.tick_ms, 1000);
        assert_eq!(config.poll_ms, 30);
        assert_eq!(config.workers, 10);
        assert_eq!(config.sum_n, 100_000);
    }

    #[test]
    fn test_partial_config_overrides_only_named_fields() {
        let config: LabConfig = toml::from_str("sum_n = 10\ntick_ms = 50\n").unwrap();
        assert_eq!(config.sum_n, 10);
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.limit, 10_000);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<LabConfig, _> = toml::from_str("tick_seconds = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = LabConfig::load(Some(Path::new("/nonexistent/threadlab.toml")));
        assert!(matches!(result, Err(CliError::ConfigIo { .. })));
    }
}
