//! Progress reporting module

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::time::Duration;

/// Progress reporter for reading the input corpus
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Track bytes read through `reader`
    ///
    /// A bar is shown when `total_bytes` is known, a spinner otherwise.
    pub fn wrap_input(
        &mut self,
        reader: Box<dyn Read>,
        total_bytes: Option<u64>,
    ) -> Result<Box<dyn Read>> {
        if self.quiet {
            return Ok(reader);
        }

        let pb = match total_bytes {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes} {msg}",
                        )?
                        .progress_chars("##-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} [{elapsed_precise}] {bytes} read {msg}")?,
                );
                pb
            }
        };
        pb.enable_steady_tick(Duration::from_millis(100));

        let wrapped = pb.wrap_read(reader);
        self.progress_bar = Some(pb);
        Ok(Box::new(wrapped))
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }

    /// Remove the bar after a failed run
    pub fn abandon(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon();
        }
    }
}
