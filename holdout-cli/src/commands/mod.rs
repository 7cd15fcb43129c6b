//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use holdout_core::config::DEFAULT_TEST_SIZE;
use holdout_core::Strategy;

pub mod common;
pub mod dedup;
pub mod generate_config;
pub mod split;

use crate::output::ReportFormat;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reservoir-sample dev and test sets; everything else goes to train
    Split(split::SplitArgs),

    /// Drop exact duplicate lines, then shuffle into test and train
    Dedup(dedup::DedupArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Generate a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List partitioning strategies and their memory behavior
    Strategies,

    /// List available report formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Split(args) => args.execute(),
            Commands::Dedup(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Text printed by the list command
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self {
            ListCommands::Strategies => {
                out.push_str("Available strategies:\n");
                let strategies = [
                    Strategy::default(),
                    Strategy::Dedup {
                        test_size: DEFAULT_TEST_SIZE,
                    },
                ];
                for strategy in strategies {
                    let (command, outputs) = match strategy {
                        Strategy::Reservoir { .. } => ("split", "train, dev, test"),
                        Strategy::Dedup { .. } => ("dedup", "train, test"),
                    };
                    out.push_str(&format!(
                        "  {:<10} {} memory, outputs {} (holdout {})\n",
                        strategy.name(),
                        strategy.memory_profile(),
                        outputs,
                        command
                    ));
                }
            }
            ListCommands::Formats => {
                out.push_str("Available report formats:\n");
                for (name, description) in ReportFormat::descriptions() {
                    out.push_str(&format!("  {name:<6} {description}\n"));
                }
            }
        }
        out
    }
}
