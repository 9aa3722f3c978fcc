//! Reproducibility manifest.
//!
//! After a successful run the CLI can persist a JSON manifest capturing
//! everything needed to reproduce or audit it: the resolved configuration, a
//! BLAKE3 hash of that configuration, counts, and timing. Never written on a
//! failed run.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use montesum_core::{RunConfig, RunStats};
use serde::{Deserialize, Serialize};

/// Schema version for persisted manifests.
pub const SCHEMA_VERSION: u32 = 1;

/// Persisted record of one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    /// RFC 3339 UTC timestamp of manifest creation.
    pub created_at: String,
    /// The fully resolved configuration the run used.
    pub config: RunConfig,
    /// BLAKE3 hex digest of the config's canonical JSON.
    pub config_hash: String,
    pub groups: usize,
    pub records: u64,
    pub draws: u64,
    pub elapsed_ms: u64,
}

impl RunManifest {
    pub fn new(config: &RunConfig, stats: RunStats, elapsed: Duration) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            created_at: chrono::Utc::now().to_rfc3339(),
            config: config.clone(),
            config_hash: config_hash(config),
            groups: config.weights.len(),
            records: stats.records,
            draws: stats.draws,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Deterministic hash of a run configuration.
///
/// Two runs with identical resolved configs get the same hash, so manifests
/// from separate invocations can be compared for configuration drift.
pub fn config_hash(config: &RunConfig) -> String {
    let json = serde_json::to_string(config).expect("RunConfig serialization cannot fail");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

/// Write the manifest as pretty JSON.
pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest).context("failed to serialize manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> RunConfig {
        RunConfig {
            simulations: 100,
            weights: vec![5.0, 5.0],
            seed: 1234,
            parallel: false,
        }
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(config_hash(&sample_config()), config_hash(&sample_config()));
    }

    #[test]
    fn hash_changes_with_config() {
        let mut other = sample_config();
        other.seed = 9;
        assert_ne!(config_hash(&sample_config()), config_hash(&other));
    }

    #[test]
    fn manifest_captures_counts_and_groups() {
        let stats = RunStats {
            records: 3,
            draws: 300,
        };
        let manifest = RunManifest::new(&sample_config(), stats, Duration::from_millis(42));
        assert_eq!(manifest.schema_version, SCHEMA_VERSION);
        assert_eq!(manifest.groups, 2);
        assert_eq!(manifest.records, 3);
        assert_eq!(manifest.draws, 300);
        assert_eq!(manifest.elapsed_ms, 42);
    }

    #[test]
    fn manifest_round_trips_through_disk() {
        let stats = RunStats {
            records: 1,
            draws: 100,
        };
        let manifest = RunManifest::new(&sample_config(), stats, Duration::from_secs(1));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        write_manifest(&path, &manifest).unwrap();

        let loaded: RunManifest =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.config_hash, manifest.config_hash);
        assert_eq!(loaded.config, manifest.config);
        assert_eq!(loaded.records, 1);
    }
}
