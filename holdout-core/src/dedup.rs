//! Deduplicating test/train partitioning
//!
//! Unlike the reservoir strategy this keeps every distinct record in memory
//! until the end of the stream, so memory grows with the corpus. Use it when
//! exact duplicates must not leak between train and test and the unique set
//! fits in memory.

use crate::error::Result;
use crate::sink::{RecordSink, SplitCounts};
use crate::split::{Record, Split};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Outcome of a dedup pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupSummary {
    /// Records consumed, duplicates included
    pub records_seen: u64,
    /// Distinct records written
    pub unique: u64,
    /// Records written per split
    pub counts: SplitCounts,
    /// Fewer distinct records than the requested test size
    pub degraded: bool,
}

impl DedupSummary {
    /// Input records that were collapsed into an earlier identical record
    pub fn duplicates_dropped(&self) -> u64 {
        self.records_seen - self.unique
    }
}

/// Collects distinct records, then emits a shuffled test/train split
#[derive(Debug)]
pub struct DedupPartitioner<R> {
    test_size: usize,
    unique: BTreeSet<Record>,
    seen: u64,
    rng: R,
}

impl<R: Rng> DedupPartitioner<R> {
    /// Create a partitioner that puts `test_size` distinct records in test
    pub fn new(test_size: usize, rng: R) -> Self {
        Self {
            test_size,
            unique: BTreeSet::new(),
            seen: 0,
            rng,
        }
    }

    /// Add a record; returns `false` if an identical record was already seen
    pub fn insert(&mut self, record: Record) -> bool {
        self.seen += 1;
        self.unique.insert(record)
    }

    /// Distinct records collected so far
    pub fn unique_len(&self) -> usize {
        self.unique.len()
    }

    /// Records consumed so far
    pub fn records_seen(&self) -> u64 {
        self.seen
    }

    /// Shuffle the unique set and write the first `test_size` records to test
    ///
    /// The unique set iterates in sorted order, so the shuffled order depends
    /// only on the set contents and the generator state.
    pub fn finish<S: RecordSink + ?Sized>(mut self, sink: &mut S) -> Result<DedupSummary> {
        let mut population: Vec<Record> = std::mem::take(&mut self.unique).into_iter().collect();
        population.shuffle(&mut self.rng);

        let unique = population.len();
        let degraded = unique < self.test_size;
        let test_len = self.test_size.min(unique);
        if degraded {
            warn!(
                "corpus has {} distinct records, fewer than the {} requested for test; \
                 all go to test and train is empty",
                unique, self.test_size
            );
        }

        let (test, train) = population.split_at(test_len);
        for record in test {
            sink.write_record(Split::Test, record)?;
        }
        for record in train {
            sink.write_record(Split::Train, record)?;
        }
        debug!(
            "dedup kept {} of {} records: {} test, {} train",
            unique,
            self.seen,
            test.len(),
            train.len()
        );

        Ok(DedupSummary {
            records_seen: self.seen,
            unique: unique as u64,
            counts: SplitCounts {
                train: train.len() as u64,
                dev: 0,
                test: test.len() as u64,
            },
            degraded,
        })
    }

    /// Collect every record of a stream, then emit the split
    pub fn partition<I, S>(mut self, records: I, sink: &mut S) -> Result<DedupSummary>
    where
        I: IntoIterator<Item = Result<Record>>,
        S: RecordSink + ?Sized,
    {
        for record in records {
            self.insert(record?);
        }
        self.finish(sink)
    }
}
