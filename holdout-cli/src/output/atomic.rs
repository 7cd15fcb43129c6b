//! Output files staged next to their destination and renamed on success

use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Prefix of temporary files created in the output directory
pub const STAGING_PREFIX: &str = ".holdout-";

/// A buffered writer over a temporary file that becomes `target` once
/// prepared and persisted
///
/// Dropping a staged output before it is persisted removes the temporary file,
/// so an aborted run leaves the destination untouched.
pub struct StagedOutput {
    writer: BufWriter<NamedTempFile>,
    target: PathBuf,
}

impl StagedOutput {
    /// Create a temporary file in the directory of `target`
    ///
    /// On Unix the file is created with mode `0o666` less the process umask,
    /// the mode a plain `File::create` of the target would get.
    pub fn create(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(STAGING_PREFIX).suffix(".tmp");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let file = builder
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create temporary file in: {}", dir.display()))?;

        Ok(Self {
            writer: BufWriter::new(file),
            target: target.to_path_buf(),
        })
    }

    /// Final path of this output
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Flush and sync the staged data without touching the target
    pub fn prepare(self) -> Result<PreparedOutput> {
        let target = self.target;
        let file = self
            .writer
            .into_inner()
            .map_err(|e| e.into_error())
            .with_context(|| format!("Failed to flush output: {}", target.display()))?;

        file.as_file()
            .sync_all()
            .with_context(|| format!("Failed to sync output: {}", target.display()))?;

        Ok(PreparedOutput { file, target })
    }
}

/// A staged output whose data is on disk, waiting to be renamed
pub struct PreparedOutput {
    file: NamedTempFile,
    target: PathBuf,
}

impl PreparedOutput {
    /// Move the temporary file onto the target path
    ///
    /// On failure the temporary file is removed.
    pub fn persist(self) -> Result<PathBuf> {
        let target = self.target;
        self.file
            .persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to write output file: {}", target.display()))?;

        log::debug!("Committed {}", target.display());
        Ok(target)
    }
}

impl Write for StagedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
