//! Records and the splits they are assigned to

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Destination partition of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training data
    Train,
    /// Development (tuning) held-out set
    Dev,
    /// Final evaluation held-out set
    Test,
}

impl Split {
    /// All splits in output order
    pub const ALL: [Split; 3] = [Split::Train, Split::Dev, Split::Test];

    /// Lowercase name used in messages and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Dev => "dev",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the corpus, without its line terminator
///
/// Records are opaque to the partitioners: they are moved, compared for
/// equality (dedup) and written back out, never inspected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record(Box<str>);

impl Record {
    /// Create a record from a line that has already had its terminator removed
    pub fn new(line: impl Into<Box<str>>) -> Self {
        Self(line.into())
    }

    /// The record text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes, excluding the terminator
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record is an empty line
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Record {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

impl From<String> for Record {
    fn from(line: String) -> Self {
        Self::new(line)
    }
}

impl AsRef<str> for Record {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Record {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
