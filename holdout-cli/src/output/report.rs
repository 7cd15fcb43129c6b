//! Run report formatting

use super::OutputPlan;
use anyhow::Result;
use holdout_core::{PartitionReport, Split};
use serde::Serialize;
use std::io::Write;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON object
    Json,
}

impl ReportFormat {
    /// Formats with a one-line description, for `list formats`
    pub fn descriptions() -> [(&'static str, &'static str); 2] {
        [
            ("text", "Human-readable summary"),
            ("json", "Run report as a JSON object"),
        ]
    }
}

/// Paths written by the run
#[derive(Debug, Serialize)]
struct OutputPaths {
    train: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dev: Option<String>,
    test: String,
}

/// JSON document: the report plus where each split went
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a PartitionReport,
    outputs: OutputPaths,
}

/// Write the report of a finished run
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &PartitionReport,
    plan: &OutputPlan,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => write_text(writer, report, plan)?,
        ReportFormat::Json => {
            let display = |split| plan.path(split).map(|p| p.display().to_string());
            let document = JsonReport {
                report,
                outputs: OutputPaths {
                    train: display(Split::Train).unwrap_or_default(),
                    dev: display(Split::Dev),
                    test: display(Split::Test).unwrap_or_default(),
                },
            };
            serde_json::to_writer_pretty(&mut *writer, &document)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_text<W: Write>(writer: &mut W, report: &PartitionReport, plan: &OutputPlan) -> Result<()> {
    writeln!(
        writer,
        "Partitioned {} records with {} ({} memory)",
        report.records_read, report.strategy, report.memory_profile
    )?;

    for (split, path) in plan.outputs() {
        let count = match split {
            Split::Train => report.train,
            Split::Dev => report.dev,
            Split::Test => report.test,
        };
        writeln!(
            writer,
            "  {:<6}{:>10}  -> {}",
            format!("{split}:"),
            count,
            path.display()
        )?;
    }

    if report.duplicates_dropped > 0 {
        writeln!(writer, "  duplicates dropped: {}", report.duplicates_dropped)?;
    }
    if report.header_written {
        writeln!(writer, "  header copied to every output")?;
    }
    if let Some(seed) = report.seed {
        writeln!(writer, "  seed: {seed}")?;
    }
    writeln!(writer, "  elapsed: {} ms", report.elapsed_ms)?;

    if report.degraded {
        writeln!(
            writer,
            "  warning: corpus too small for the requested sizes (dev {}, test {})",
            report.requested_dev, report.requested_test
        )?;
    }
    Ok(())
}
