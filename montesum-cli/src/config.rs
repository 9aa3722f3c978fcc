//! TOML run-configuration file.
//!
//! A config file is an all-optional mirror of `RunConfig`; anything it omits
//! falls back to built-in defaults, and explicit CLI flags override both.
//! Validation (positive simulation count, weight rules) happens once, in the
//! core constructor, not here.

use std::path::Path;

use montesum_core::RunConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Optional-field mirror of `RunConfig` for TOML files.
///
/// ```toml
/// simulations = 10000
/// weights = [5.0, 5.0]
/// seed = 1234
/// parallel = false
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub simulations: Option<usize>,
    pub weights: Option<Vec<f64>>,
    pub seed: Option<u64>,
    pub parallel: Option<bool>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Layer this file's values over `base`, returning the merged config.
    pub fn apply(&self, base: RunConfig) -> RunConfig {
        RunConfig {
            simulations: self.simulations.unwrap_or(base.simulations),
            weights: self.weights.clone().unwrap_or(base.weights),
            seed: self.seed.unwrap_or(base.seed),
            parallel: self.parallel.unwrap_or(base.parallel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_keeps_defaults() {
        let file = FileConfig::from_toml("").unwrap();
        let config = file.apply(RunConfig::default());
        assert_eq!(config.simulations, 10_000);
        assert_eq!(config.seed, 1234);
        assert!(config.weights.is_empty());
        assert!(!config.parallel);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = FileConfig::from_toml(
            "simulations = 500\nweights = [1.0, 3.0]\nseed = 9\nparallel = true\n",
        )
        .unwrap();
        let config = file.apply(RunConfig::default());
        assert_eq!(config.simulations, 500);
        assert_eq!(config.weights, vec![1.0, 3.0]);
        assert_eq!(config.seed, 9);
        assert!(config.parallel);
    }

    #[test]
    fn partial_file_only_overrides_named_fields() {
        let file = FileConfig::from_toml("seed = 42\n").unwrap();
        let config = file.apply(RunConfig::default());
        assert_eq!(config.seed, 42);
        assert_eq!(config.simulations, 10_000);
    }

    #[test]
    fn unknown_fields_rejected() {
        assert!(FileConfig::from_toml("simulatoins = 10\n").is_err());
    }

    #[test]
    fn loads_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "simulations = 7\nweights = [2.0]").unwrap();
        let file = FileConfig::from_file(tmp.path()).unwrap();
        assert_eq!(file.simulations, Some(7));
        assert_eq!(file.weights, Some(vec![2.0]));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FileConfig::from_file(Path::new("/nonexistent/run.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
