//! Dedup command implementation

use super::common::CommonArgs;
use anyhow::Result;
use clap::Args;
use holdout_core::Strategy;

/// Arguments for the dedup command
#[derive(Debug, Args)]
pub struct DedupArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Distinct records in test [default: 5000]
    #[arg(short = 'n', long, value_name = "N")]
    pub test_size: Option<usize>,
}

impl DedupArgs {
    /// Execute the dedup command
    pub fn execute(&self) -> Result<()> {
        let report = self.common.run(|config| Strategy::Dedup {
            test_size: self.test_size.unwrap_or(config.dedup.test_size),
        })?;
        log::info!("Dropped {} duplicate records", report.duplicates_dropped);
        Ok(())
    }
}
