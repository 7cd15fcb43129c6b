//! Arguments and run flow shared by the partitioning commands

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::InputSource;
use crate::output::{write_report, OutputPlan, ReportFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use holdout_core::{PartitionConfig, PartitionReport, Strategy};
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Arguments accepted by both `split` and `dedup`
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Input files or patterns (supports glob, `-` for stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Directory receiving the output files
    #[arg(short = 'd', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Seed for the random source (default: fresh per run)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Treat the first line as a CSV header copied to every output
    #[arg(long)]
    pub header: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub report: ReportFormat,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// Run a partitioning command end to end
    ///
    /// `select` picks the strategy from the loaded configuration file after
    /// command-specific flags have been applied.
    pub fn run<F>(&self, select: F) -> Result<PartitionReport>
    where
        F: FnOnce(&CliConfig) -> Strategy,
    {
        self.init_logging()?;

        log::info!("Starting partitioning");
        log::debug!("Arguments: {:?}", self);

        let file_config = CliConfig::load_or_default(self.config.as_deref())?;
        let config = self.partition_config(&file_config, select(&file_config))?;

        let input = InputSource::resolve(&self.input)?;
        let total_bytes = input.total_size()?;
        log::info!("Reading {}", input.describe());

        let plan = OutputPlan::new(
            &file_config.output,
            self.output_dir.as_deref(),
            config.strategy.has_dev(),
        )?;
        let mut writers = plan.stage()?;

        let mut progress = ProgressReporter::new(self.quiet);
        let reader = progress.wrap_input(input.open(), total_bytes)?;

        let report = match holdout_core::partition(&config, BufReader::new(reader), &mut writers) {
            Ok(report) => report,
            Err(e) => {
                progress.abandon();
                return Err(e).context("Partitioning failed");
            }
        };
        progress.finish();

        plan.commit(writers)?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_report(&mut out, &report, &plan, self.report)?;

        Ok(report)
    }

    /// Merge flags over the configuration file and validate the result
    pub fn partition_config(
        &self,
        file_config: &CliConfig,
        strategy: Strategy,
    ) -> Result<PartitionConfig> {
        PartitionConfig::builder()
            .strategy(strategy)
            .maybe_seed(self.seed.or(file_config.random.seed))
            .header(self.header || file_config.input.header)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when commands run in-process
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
