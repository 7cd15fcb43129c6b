//! Output sinks receiving partitioned records

use crate::error::{PartitionError, Result};
use crate::split::{Record, Split};
use std::io::Write;

/// Destination for partitioned records
///
/// Partitioners call [`write_header`](RecordSink::write_header) at most once,
/// before any record, then route each record to exactly one split.
pub trait RecordSink {
    /// Write a header line to every output the sink has
    fn write_header(&mut self, header: &Record) -> Result<()>;

    /// Append a record to the given split
    fn write_record(&mut self, split: Split, record: &Record) -> Result<()>;

    /// Flush all outputs
    fn finish(&mut self) -> Result<()>;
}

/// Per-split record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitCounts {
    /// Records written to train
    pub train: u64,
    /// Records written to dev
    pub dev: u64,
    /// Records written to test
    pub test: u64,
}

impl SplitCounts {
    /// Count for a single split
    pub fn get(&self, split: Split) -> u64 {
        match split {
            Split::Train => self.train,
            Split::Dev => self.dev,
            Split::Test => self.test,
        }
    }

    /// Sum over all splits
    pub fn total(&self) -> u64 {
        self.train + self.dev + self.test
    }

    fn increment(&mut self, split: Split) {
        match split {
            Split::Train => self.train += 1,
            Split::Dev => self.dev += 1,
            Split::Test => self.test += 1,
        }
    }
}

/// Line-per-record writers for the train, dev and test outputs
///
/// The dev output is optional: the dedup strategy only produces train and
/// test, and routing a record to a missing output is an error.
pub struct SplitWriters<W: Write> {
    train: W,
    dev: Option<W>,
    test: W,
    counts: SplitCounts,
}

impl<W: Write> SplitWriters<W> {
    /// Writers for all three splits
    pub fn new(train: W, dev: W, test: W) -> Self {
        Self {
            train,
            dev: Some(dev),
            test,
            counts: SplitCounts::default(),
        }
    }

    /// Writers for train and test only
    pub fn train_test(train: W, test: W) -> Self {
        Self {
            train,
            dev: None,
            test,
            counts: SplitCounts::default(),
        }
    }

    /// Records written so far
    pub fn counts(&self) -> SplitCounts {
        self.counts
    }

    /// Whether a dev output is present
    pub fn has_dev(&self) -> bool {
        self.dev.is_some()
    }

    /// Give back the underlying writers as `(train, dev, test)`
    pub fn into_inner(self) -> (W, Option<W>, W) {
        (self.train, self.dev, self.test)
    }

    fn writer(&mut self, split: Split) -> Result<&mut W> {
        match split {
            Split::Train => Ok(&mut self.train),
            Split::Dev => self.dev.as_mut().ok_or(PartitionError::MissingOutput(Split::Dev)),
            Split::Test => Ok(&mut self.test),
        }
    }
}

impl<W: Write> RecordSink for SplitWriters<W> {
    fn write_header(&mut self, header: &Record) -> Result<()> {
        writeln!(self.train, "{header}")?;
        if let Some(dev) = self.dev.as_mut() {
            writeln!(dev, "{header}")?;
        }
        writeln!(self.test, "{header}")?;
        Ok(())
    }

    fn write_record(&mut self, split: Split, record: &Record) -> Result<()> {
        let writer = self.writer(split)?;
        writer.write_all(record.as_str().as_bytes())?;
        writer.write_all(b"\n")?;
        self.counts.increment(split);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.train.flush()?;
        if let Some(dev) = self.dev.as_mut() {
            dev.flush()?;
        }
        self.test.flush()?;
        Ok(())
    }
}

/// Sink collecting records in memory, in write order
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Header written to the outputs, if any
    pub header: Option<Record>,
    /// Train records in write order
    pub train: Vec<Record>,
    /// Dev records in write order
    pub dev: Vec<Record>,
    /// Test records in write order
    pub test: Vec<Record>,
    /// Whether `finish` has been called
    pub finished: bool,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Records of one split
    pub fn records(&self, split: Split) -> &[Record] {
        match split {
            Split::Train => &self.train,
            Split::Dev => &self.dev,
            Split::Test => &self.test,
        }
    }

    /// Per-split counts
    pub fn counts(&self) -> SplitCounts {
        SplitCounts {
            train: self.train.len() as u64,
            dev: self.dev.len() as u64,
            test: self.test.len() as u64,
        }
    }
}

impl RecordSink for MemorySink {
    fn write_header(&mut self, header: &Record) -> Result<()> {
        self.header = Some(header.clone());
        Ok(())
    }

    fn write_record(&mut self, split: Split, record: &Record) -> Result<()> {
        match split {
            Split::Train => self.train.push(record.clone()),
            Split::Dev => self.dev.push(record.clone()),
            Split::Test => self.test.push(record.clone()),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
