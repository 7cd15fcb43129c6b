//! holdout command-line entry point

use anyhow::Result;
use clap::Parser;
use holdout_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
