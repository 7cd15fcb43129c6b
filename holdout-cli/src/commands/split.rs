//! Split command implementation

use super::common::CommonArgs;
use anyhow::Result;
use clap::Args;
use holdout_core::Strategy;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Records in each of dev and test [default: 1000]
    #[arg(short = 'k', long, value_name = "N")]
    pub half_size: Option<usize>,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        self.common.run(|config| Strategy::Reservoir {
            half_size: self.half_size.unwrap_or(config.reservoir.half_size),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ReportFormat;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_execute_writes_three_outputs() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("corpus.txt");
        let lines: String = (1..=20).map(|i| format!("line {i}\n")).collect();
        fs::write(&input, lines).unwrap();
        let out = dir.path().join("out");

        let args = SplitArgs {
            common: CommonArgs {
                input: vec![input.to_string_lossy().into_owned()],
                output_dir: Some(out.clone()),
                seed: Some(5),
                header: false,
                config: None,
                report: ReportFormat::Json,
                quiet: true,
                verbose: 0,
            },
            half_size: Some(3),
        };
        args.execute().unwrap();

        let count = |name: &str| fs::read_to_string(out.join(name)).unwrap().lines().count();
        assert_eq!(count("dev.csv"), 3);
        assert_eq!(count("test.csv"), 3);
        assert_eq!(count("train.csv"), 14);
    }
}
