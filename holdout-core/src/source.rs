//! Lazy record source over a line-oriented reader

use crate::error::{PartitionError, Result};
use crate::split::Record;
use std::io::{BufRead, BufReader, Read};

/// Reads one record per line from a buffered reader
///
/// Only the current line is held in memory. The `\n` terminator is stripped
/// and everything before it, including a trailing `\r`, is kept, so a record
/// written back with `\n` reads in again unchanged. A final line without a
/// terminator is still a record.
pub struct LineSource<R> {
    reader: R,
    buffer: Vec<u8>,
    lines_read: u64,
}

impl<R: BufRead> LineSource<R> {
    /// Create a source over a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            lines_read: 0,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Read the next record, or `None` at end of stream
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.lines_read += 1;

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }

        let line = std::str::from_utf8(&self.buffer).map_err(|_| PartitionError::InvalidUtf8 {
            line: self.lines_read,
        })?;
        Ok(Some(Record::new(line)))
    }
}

impl<R: Read> LineSource<BufReader<R>> {
    /// Create a source over an unbuffered reader
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
