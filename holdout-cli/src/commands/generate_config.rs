//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use holdout_core::config::{DEFAULT_HALF_SIZE, DEFAULT_TEST_SIZE};
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the sizes and file names");
        println!("2. Use it for partitioning:");
        println!(
            "   holdout split -i corpus.csv -c {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Template configuration content with every key at its default
pub fn generate_template() -> String {
    format!(
        r#"# holdout configuration
# Command-line flags take precedence over values in this file.

# Reservoir strategy (`holdout split`)
[reservoir]
# Records in each of dev and test; train receives everything else
half_size = {DEFAULT_HALF_SIZE}

# Dedup strategy (`holdout dedup`)
[dedup]
# Distinct records in test; the remaining distinct records go to train
test_size = {DEFAULT_TEST_SIZE}

[random]
# Fixed seed for reproducible splits (omit for a fresh seed per run)
# seed = 42

[input]
# Copy the first line to every output instead of partitioning it
header = false

[output]
directory = "."
train = "train.csv"
dev = "dev.csv"
test = "test.csv"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_writes_file() {
        let dir = TempDir::new().unwrap();
        let args = GenerateConfigArgs {
            output: dir.path().join("holdout.toml"),
        };
        args.execute().unwrap();

        let config = CliConfig::load(&args.output).unwrap();
        assert_eq!(config.reservoir.half_size, DEFAULT_HALF_SIZE);
    }

    #[test]
    fn test_execute_fails_for_missing_directory() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/holdout.toml"),
        };
        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write to"));
    }
}
