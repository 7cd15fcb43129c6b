//! Error types for corpus partitioning

use crate::split::Split;
use thiserror::Error;

/// Errors raised while reading, partitioning or writing a corpus
#[derive(Error, Debug)]
pub enum PartitionError {
    /// Reading the input or writing an output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the input is not valid UTF-8
    #[error("invalid UTF-8 on line {line}")]
    InvalidUtf8 {
        /// 1-based line number of the offending record
        line: u64,
    },

    /// Invalid configuration (rejected before any input is consumed)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A record was routed to a split the sink has no output for
    #[error("no output configured for the {0} split")]
    MissingOutput(Split),
}

/// Result type for partitioning operations
pub type Result<T> = std::result::Result<T, PartitionError>;
