//! Partitioning configuration

use crate::error::{PartitionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of records per held-out split for the reservoir strategy
pub const DEFAULT_HALF_SIZE: usize = 1000;

/// Default test-set size for the dedup strategy
pub const DEFAULT_TEST_SIZE: usize = 5000;

/// How much memory a strategy needs relative to the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryProfile {
    /// Bounded by the sample size, independent of corpus length
    Bounded,
    /// Grows with the number of distinct records in the corpus
    Unbounded,
}

impl fmt::Display for MemoryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryProfile::Bounded => f.write_str("bounded"),
            MemoryProfile::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Partitioning strategy and its size parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Strategy {
    /// Single-pass reservoir sampling into train/dev/test
    Reservoir {
        /// Records per held-out split; the reservoir holds twice this many
        half_size: usize,
    },
    /// Exact-line dedup, then shuffle into test/train
    Dedup {
        /// Records in the test split
        test_size: usize,
    },
}

impl Strategy {
    /// Short name used on the command line and in reports
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Reservoir { .. } => "reservoir",
            Strategy::Dedup { .. } => "dedup",
        }
    }

    /// Memory behavior of the strategy
    pub fn memory_profile(&self) -> MemoryProfile {
        match self {
            Strategy::Reservoir { .. } => MemoryProfile::Bounded,
            Strategy::Dedup { .. } => MemoryProfile::Unbounded,
        }
    }

    /// Whether the strategy produces a dev split
    pub fn has_dev(&self) -> bool {
        matches!(self, Strategy::Reservoir { .. })
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Reservoir {
            half_size: DEFAULT_HALF_SIZE,
        }
    }
}

/// Complete configuration of one partitioning run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionConfig {
    /// Strategy and size
    pub strategy: Strategy,
    /// Seed for the random source; `None` draws one from the OS
    #[serde(default)]
    pub seed: Option<u64>,
    /// Treat the first input line as a header copied to every output
    #[serde(default)]
    pub header: bool,
}

impl PartitionConfig {
    /// Reservoir configuration with the given half size
    pub fn reservoir(half_size: usize) -> Self {
        Self {
            strategy: Strategy::Reservoir { half_size },
            ..Self::default()
        }
    }

    /// Dedup configuration with the given test size
    pub fn dedup(test_size: usize) -> Self {
        Self {
            strategy: Strategy::Dedup { test_size },
            ..Self::default()
        }
    }

    /// Create a builder
    pub fn builder() -> PartitionConfigBuilder {
        PartitionConfigBuilder::default()
    }

    /// Reject size parameters that cannot produce a meaningful split
    pub fn validate(&self) -> Result<()> {
        match self.strategy {
            Strategy::Reservoir { half_size: 0 } => Err(PartitionError::Config(
                "half_size must be greater than 0".to_string(),
            )),
            Strategy::Dedup { test_size: 0 } => Err(PartitionError::Config(
                "test_size must be greater than 0".to_string(),
            )),
            Strategy::Reservoir { half_size } if half_size.checked_mul(2).is_none() => {
                Err(PartitionError::Config(format!(
                    "half_size {half_size} is too large"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Builder for [`PartitionConfig`]
#[derive(Debug, Default)]
pub struct PartitionConfigBuilder {
    config: PartitionConfig,
}

impl PartitionConfigBuilder {
    /// Use an already chosen strategy
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Use the reservoir strategy
    pub fn reservoir(mut self, half_size: usize) -> Self {
        self.config.strategy = Strategy::Reservoir { half_size };
        self
    }

    /// Use the dedup strategy
    pub fn dedup(mut self, test_size: usize) -> Self {
        self.config.strategy = Strategy::Dedup { test_size };
        self
    }

    /// Fix the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set an optional seed
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    /// Treat the first line as a header
    pub fn header(mut self, header: bool) -> Self {
        self.config.header = header;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<PartitionConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
