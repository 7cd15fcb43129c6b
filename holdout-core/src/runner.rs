//! One-call partitioning of a reader into a sink

use crate::config::{PartitionConfig, Strategy};
use crate::dedup::DedupPartitioner;
use crate::error::Result;
use crate::random::{fresh_seed, seeded_rng};
use crate::report::PartitionReport;
use crate::reservoir::ReservoirPartitioner;
use crate::sink::RecordSink;
use crate::source::LineSource;
use log::info;
use rand::Rng;
use std::io::BufRead;
use std::time::Instant;

/// Partition `input` into `sink` as described by `config`
///
/// The configuration is validated before any input is read. When no seed is
/// configured one is drawn from the OS and returned in the report.
pub fn partition<R, S>(config: &PartitionConfig, input: R, sink: &mut S) -> Result<PartitionReport>
where
    R: BufRead,
    S: RecordSink + ?Sized,
{
    config.validate()?;
    let seed = config.seed.unwrap_or_else(fresh_seed);
    let mut report = partition_with_rng(config, input, sink, seeded_rng(seed))?;
    report.seed = Some(seed);
    Ok(report)
}

/// Partition with a caller-supplied generator
///
/// The report's `seed` is left empty since the generator state is opaque.
pub fn partition_with_rng<R, S, G>(
    config: &PartitionConfig,
    input: R,
    sink: &mut S,
    rng: G,
) -> Result<PartitionReport>
where
    R: BufRead,
    S: RecordSink + ?Sized,
    G: Rng,
{
    config.validate()?;
    let start = Instant::now();
    let mut report = PartitionReport::new(&config.strategy);
    let mut source = LineSource::new(input);

    if config.header {
        if let Some(header) = source.next_record()? {
            sink.write_header(&header)?;
            report.header_written = true;
        }
    }

    match config.strategy {
        Strategy::Reservoir { half_size } => {
            let summary = ReservoirPartitioner::new(half_size, rng).partition(&mut source, sink)?;
            report.records_read = summary.records_seen;
            report.degraded = summary.degraded;
            report.record_counts(summary.counts);
        }
        Strategy::Dedup { test_size } => {
            let summary = DedupPartitioner::new(test_size, rng).partition(&mut source, sink)?;
            report.records_read = summary.records_seen;
            report.duplicates_dropped = summary.duplicates_dropped();
            report.degraded = summary.degraded;
            report.record_counts(summary.counts);
        }
    }

    sink.finish()?;
    report.elapsed_ms = start.elapsed().as_millis() as u64;

    info!(
        "{} partition of {} records: {} train, {} dev, {} test",
        report.strategy, report.records_read, report.train, report.dev, report.test
    );
    Ok(report)
}
