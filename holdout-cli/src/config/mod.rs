//! Configuration module

use anyhow::{Context, Result};
use holdout_core::config::{DEFAULT_HALF_SIZE, DEFAULT_TEST_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure, loaded from a TOML file
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Reservoir strategy configuration
    #[serde(default)]
    pub reservoir: ReservoirConfig,

    /// Dedup strategy configuration
    #[serde(default)]
    pub dedup: DedupConfig,

    /// Random source configuration
    #[serde(default)]
    pub random: RandomConfig,

    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Reservoir-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReservoirConfig {
    /// Records in each of dev and test
    pub half_size: usize,
}

impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            half_size: DEFAULT_HALF_SIZE,
        }
    }
}

/// Dedup-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DedupConfig {
    /// Distinct records in test
    pub test_size: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
        }
    }
}

/// Random source configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RandomConfig {
    /// Fixed seed (omit for a fresh seed per run)
    pub seed: Option<u64>,
}

/// Input-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// First line is a CSV header copied to every output
    pub header: bool,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving the output files
    pub directory: PathBuf,

    /// File name of the train split
    pub train: String,

    /// File name of the dev split
    pub dev: String,

    /// File name of the test split
    pub test: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            train: "train.csv".to_string(),
            dev: "dev.csv".to_string(),
            test: "test.csv".to_string(),
        }
    }
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load the given file, or fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
