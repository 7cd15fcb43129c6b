//! File reading utilities

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Get file size in bytes
pub fn file_size(path: &Path) -> Result<u64> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

    Ok(metadata.len())
}

/// Reads several files back to back as one line-oriented stream
///
/// A newline is inserted between files when a file does not end with one,
/// so the last line of a file never merges with the first line of the next.
/// The stream may therefore end with a newline its last file lacked.
pub struct ConcatReader {
    pending: VecDeque<PathBuf>,
    current: Option<File>,
    last_byte: Option<u8>,
    needs_newline: bool,
}

impl ConcatReader {
    /// Create a reader over `paths`, opened lazily in order
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            pending: paths.into(),
            current: None,
            last_byte: None,
            needs_newline: false,
        }
    }

    fn open_next(&mut self) -> io::Result<bool> {
        match self.pending.pop_front() {
            Some(path) => {
                let file = File::open(&path).map_err(|e| {
                    io::Error::new(e.kind(), format!("Failed to open {}: {e}", path.display()))
                })?;
                log::debug!("Reading {}", path.display());
                self.current = Some(file);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Read for ConcatReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.needs_newline {
                self.needs_newline = false;
                self.last_byte = Some(b'\n');
                buf[0] = b'\n';
                return Ok(1);
            }

            let read = match self.current.as_mut() {
                Some(file) => file.read(buf)?,
                None => {
                    if self.open_next()? {
                        continue;
                    }
                    return Ok(0);
                }
            };

            if read == 0 {
                self.current = None;
                self.needs_newline = matches!(self.last_byte, Some(byte) if byte != b'\n');
                continue;
            }

            self.last_byte = Some(buf[read - 1]);
            return Ok(read);
        }
    }
}
