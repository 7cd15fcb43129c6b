//! Bounded-memory train/dev/test partitioning by reservoir sampling
//!
//! The partitioner runs Algorithm R over a reservoir of `2k` slots. Instead of
//! discarding the records that lose a draw, it streams them to the train
//! split as soon as they lose, so only the reservoir is ever held in memory.
//! At end of stream the first `k` slots become dev and the last `k` test.
//!
//! Train order is not input order: records that never entered the reservoir
//! are interleaved with records displaced from it, in displacement order.
//! Dev and test are written in reservoir slot order, which is a deterministic
//! function of the input order and the draw sequence.

use crate::error::Result;
use crate::random::IndexSource;
use crate::sink::{RecordSink, SplitCounts};
use crate::split::{Record, Split};
use log::{debug, warn};

/// Upper bound on slots reserved up front; larger reservoirs grow on demand
const MAX_PREALLOCATED_SLOTS: usize = 1 << 16;

/// Outcome of a reservoir pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservoirSummary {
    /// Records consumed
    pub records_seen: u64,
    /// Records written per split
    pub counts: SplitCounts,
    /// The stream ended before the reservoir filled
    pub degraded: bool,
}

/// Streaming reservoir partitioner
///
/// Memory is `O(half_size)` regardless of how many records are pushed.
#[derive(Debug)]
pub struct ReservoirPartitioner<D> {
    half_size: usize,
    capacity: usize,
    reservoir: Vec<Record>,
    seen: u64,
    train_written: u64,
    draws: D,
}

impl<D: IndexSource> ReservoirPartitioner<D> {
    /// Create a partitioner producing `half_size` dev and `half_size` test records
    ///
    /// `half_size == 0` is accepted and sends every record to train without
    /// consuming any draws.
    pub fn new(half_size: usize, draws: D) -> Self {
        let capacity = half_size.saturating_mul(2);
        Self {
            half_size,
            capacity,
            reservoir: Vec::with_capacity(capacity.min(MAX_PREALLOCATED_SLOTS)),
            seen: 0,
            train_written: 0,
            draws,
        }
    }

    /// Records per held-out split
    pub fn half_size(&self) -> usize {
        self.half_size
    }

    /// Reservoir slots (`2 * half_size`)
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records consumed so far
    pub fn records_seen(&self) -> u64 {
        self.seen
    }

    /// Current reservoir contents in slot order
    pub fn reservoir(&self) -> &[Record] {
        &self.reservoir
    }

    /// Consume one record, writing at most one record to train
    pub fn push<S: RecordSink + ?Sized>(&mut self, record: Record, sink: &mut S) -> Result<()> {
        let position = self.seen;
        self.seen += 1;

        if self.reservoir.len() < self.capacity {
            self.reservoir.push(record);
            if self.reservoir.len() == self.capacity {
                debug!("reservoir filled with {} records", self.capacity);
            }
            return Ok(());
        }

        if self.capacity == 0 {
            return self.write_train(&record, sink);
        }

        let slot = self.draws.index_inclusive(position);
        if slot < self.capacity as u64 {
            let slot = slot as usize;
            self.write_train_slot(slot, sink)?;
            self.reservoir[slot] = record;
            Ok(())
        } else {
            self.write_train(&record, sink)
        }
    }

    /// Flush the reservoir: first half to dev, second half to test
    ///
    /// If fewer than `2 * half_size` records were pushed, the partial
    /// reservoir is split at its midpoint (dev gets the extra record on odd
    /// fills) and the summary is marked degraded.
    pub fn finish<S: RecordSink + ?Sized>(self, sink: &mut S) -> Result<ReservoirSummary> {
        let fill = self.reservoir.len();
        let degraded = fill < self.capacity;
        let dev_len = if degraded {
            fill.div_ceil(2)
        } else {
            self.half_size
        };

        if degraded {
            warn!(
                "corpus has {} records, fewer than the {} requested for dev and test; \
                 splitting {} dev / {} test and leaving train empty",
                fill,
                self.capacity,
                dev_len,
                fill - dev_len
            );
        }

        let (dev, test) = self.reservoir.split_at(dev_len);
        for record in dev {
            sink.write_record(Split::Dev, record)?;
        }
        for record in test {
            sink.write_record(Split::Test, record)?;
        }
        debug!(
            "flushed reservoir: {} dev, {} test after {} records",
            dev.len(),
            test.len(),
            self.seen
        );

        Ok(ReservoirSummary {
            records_seen: self.seen,
            counts: SplitCounts {
                train: self.train_written,
                dev: dev.len() as u64,
                test: test.len() as u64,
            },
            degraded,
        })
    }

    /// Push every record of a stream, then flush the reservoir
    pub fn partition<I, S>(mut self, records: I, sink: &mut S) -> Result<ReservoirSummary>
    where
        I: IntoIterator<Item = Result<Record>>,
        S: RecordSink + ?Sized,
    {
        for record in records {
            self.push(record?, sink)?;
        }
        self.finish(sink)
    }

    fn write_train<S: RecordSink + ?Sized>(&mut self, record: &Record, sink: &mut S) -> Result<()> {
        sink.write_record(Split::Train, record)?;
        self.train_written += 1;
        Ok(())
    }

    fn write_train_slot<S: RecordSink + ?Sized>(&mut self, slot: usize, sink: &mut S) -> Result<()> {
        sink.write_record(Split::Train, &self.reservoir[slot])?;
        self.train_written += 1;
        Ok(())
    }
}
