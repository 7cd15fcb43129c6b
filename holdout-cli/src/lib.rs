//! holdout CLI library
//!
//! This library provides the command-line interface for partitioning
//! line-oriented corpora into train, dev and test files.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

use clap::Parser;

pub use error::{CliError, CliResult};

/// Streaming train/dev/test corpus partitioner
#[derive(Debug, Parser)]
#[command(name = "holdout", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: commands::Commands,
}
