//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::ConcatReader;
pub use glob_resolver::resolve_patterns;

use anyhow::Result;
use std::io::{self, Read};
use std::path::PathBuf;

/// Pattern that selects standard input
pub const STDIN_PATTERN: &str = "-";

/// Where the corpus is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input
    Stdin,
    /// Files read back to back in this order
    Files(Vec<PathBuf>),
}

impl InputSource {
    /// Resolve command-line patterns; `-` alone selects stdin
    pub fn resolve(patterns: &[String]) -> Result<Self> {
        if patterns.iter().any(|p| p == STDIN_PATTERN) {
            if patterns.len() > 1 {
                anyhow::bail!("'-' (stdin) cannot be combined with other inputs");
            }
            return Ok(InputSource::Stdin);
        }
        Ok(InputSource::Files(resolve_patterns(patterns)?))
    }

    /// Total size in bytes, when it is known up front
    pub fn total_size(&self) -> Result<Option<u64>> {
        match self {
            InputSource::Stdin => Ok(None),
            InputSource::Files(paths) => {
                let mut total = 0;
                for path in paths {
                    total += file_reader::file_size(path)?;
                }
                Ok(Some(total))
            }
        }
    }

    /// Short description for log messages
    pub fn describe(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::Files(paths) if paths.len() == 1 => paths[0].display().to_string(),
            InputSource::Files(paths) => format!("{} files", paths.len()),
        }
    }

    /// Open the source as a single reader
    pub fn open(self) -> Box<dyn Read> {
        match self {
            InputSource::Stdin => Box::new(io::stdin().lock()),
            InputSource::Files(paths) => Box::new(ConcatReader::new(paths)),
        }
    }
}
