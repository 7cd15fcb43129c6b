//! Summary of a partitioning run

use crate::config::{MemoryProfile, Strategy};
use crate::sink::SplitCounts;
use serde::Serialize;

/// What a run read, wrote and whether the requested sizes were honored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionReport {
    /// Strategy name (`reservoir` or `dedup`)
    pub strategy: &'static str,
    /// Memory behavior of the strategy
    pub memory_profile: MemoryProfile,
    /// Records consumed from the input, excluding the header
    pub records_read: u64,
    /// Whether a header line was copied to the outputs
    pub header_written: bool,
    /// Records written to train
    pub train: u64,
    /// Records written to dev
    pub dev: u64,
    /// Records written to test
    pub test: u64,
    /// Input records dropped as exact duplicates (dedup only)
    pub duplicates_dropped: u64,
    /// Requested dev size
    pub requested_dev: u64,
    /// Requested test size
    pub requested_test: u64,
    /// Reservoir slots allocated (zero for dedup)
    pub reservoir_capacity: u64,
    /// The corpus was too small to honor the requested sizes
    pub degraded: bool,
    /// Seed that drove the random source
    pub seed: Option<u64>,
    /// Wall-clock time of the run in milliseconds
    pub elapsed_ms: u64,
}

impl PartitionReport {
    pub(crate) fn new(strategy: &Strategy) -> Self {
        let (requested_dev, requested_test, reservoir_capacity) = match *strategy {
            Strategy::Reservoir { half_size } => {
                let half = half_size as u64;
                (half, half, half.saturating_mul(2))
            }
            Strategy::Dedup { test_size } => (0, test_size as u64, 0),
        };

        Self {
            strategy: strategy.name(),
            memory_profile: strategy.memory_profile(),
            records_read: 0,
            header_written: false,
            train: 0,
            dev: 0,
            test: 0,
            duplicates_dropped: 0,
            requested_dev,
            requested_test,
            reservoir_capacity,
            degraded: false,
            seed: None,
            elapsed_ms: 0,
        }
    }

    pub(crate) fn record_counts(&mut self, counts: SplitCounts) {
        self.train = counts.train;
        self.dev = counts.dev;
        self.test = counts.test;
    }

    /// Records written across all splits
    pub fn records_written(&self) -> u64 {
        self.train + self.dev + self.test
    }
}
