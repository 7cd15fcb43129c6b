//! Streaming train/dev/test partitioning of line-oriented corpora
//!
//! Two strategies share one contract: read records from a [`LineSource`],
//! assign each to exactly one [`Split`], and write it to a [`RecordSink`].
//!
//! - [`ReservoirPartitioner`] makes a single pass with memory bounded by the
//!   sample size. Dev and test together are a uniform sample of `2k` records
//!   without replacement; every other record goes to train.
//! - [`DedupPartitioner`] collapses exact duplicate lines and shuffles the
//!   distinct records into test and train. It holds the whole unique set in
//!   memory.
//!
//! # Example
//!
//! ```rust
//! use holdout_core::{partition, MemorySink, PartitionConfig};
//! use std::io::Cursor;
//!
//! let config = PartitionConfig::builder()
//!     .reservoir(2)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let corpus = (1..=10).map(|i| format!("line {i}\n")).collect::<String>();
//! let mut sink = MemorySink::new();
//! let report = partition(&config, Cursor::new(corpus), &mut sink).unwrap();
//!
//! assert_eq!(report.dev, 2);
//! assert_eq!(report.test, 2);
//! assert_eq!(report.train, 6);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dedup;
pub mod error;
pub mod random;
pub mod report;
pub mod reservoir;
pub mod runner;
pub mod sink;
pub mod source;
pub mod split;

// Re-export key types
pub use config::{MemoryProfile, PartitionConfig, PartitionConfigBuilder, Strategy};
pub use dedup::{DedupPartitioner, DedupSummary};
pub use error::{PartitionError, Result};
pub use random::{fresh_seed, seeded_rng, IndexSource};
pub use report::PartitionReport;
pub use reservoir::{ReservoirPartitioner, ReservoirSummary};
pub use runner::{partition, partition_with_rng};
pub use sink::{MemorySink, RecordSink, SplitCounts, SplitWriters};
pub use source::LineSource;
pub use split::{Record, Split};
