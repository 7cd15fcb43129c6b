//! Output module: where each split is written and how the run is reported

pub mod atomic;
pub mod report;

pub use atomic::StagedOutput;
pub use report::{write_report, ReportFormat};

use crate::config::OutputConfig;
use crate::error::CliError;
use anyhow::{Context, Result};
use holdout_core::{Split, SplitWriters};
use std::fs;
use std::path::{Path, PathBuf};

/// Destination paths of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    train: PathBuf,
    dev: Option<PathBuf>,
    test: PathBuf,
}

impl OutputPlan {
    /// Resolve file names against the output directory
    ///
    /// `directory` overrides the configured one. The dev path is only
    /// planned when the strategy produces a dev split.
    pub fn new(config: &OutputConfig, directory: Option<&Path>, with_dev: bool) -> Result<Self> {
        let directory = directory.unwrap_or(config.directory.as_path());
        let plan = Self {
            train: directory.join(&config.train),
            dev: with_dev.then(|| directory.join(&config.dev)),
            test: directory.join(&config.test),
        };
        plan.check_distinct()?;
        Ok(plan)
    }

    /// Path of a split's output, if the plan has one
    pub fn path(&self, split: Split) -> Option<&Path> {
        match split {
            Split::Train => Some(&self.train),
            Split::Dev => self.dev.as_deref(),
            Split::Test => Some(&self.test),
        }
    }

    /// Planned outputs in split order
    pub fn outputs(&self) -> Vec<(Split, &Path)> {
        Split::ALL
            .iter()
            .filter_map(|&split| self.path(split).map(|path| (split, path)))
            .collect()
    }

    /// Create the output directory and a staged file for every split
    ///
    /// Fails before anything is written if an output path is a directory.
    pub fn stage(&self) -> Result<SplitWriters<StagedOutput>> {
        for (_, path) in self.outputs() {
            if path.is_dir() {
                anyhow::bail!("Output path is a directory: {}", path.display());
            }
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }

        let train = stage_file(&self.train)?;
        let test = stage_file(&self.test)?;
        let writers = match &self.dev {
            Some(dev) => SplitWriters::new(train, stage_file(dev)?, test),
            None => SplitWriters::train_test(train, test),
        };
        Ok(writers)
    }

    /// Move every staged output onto its destination
    ///
    /// All outputs are flushed and synced before the first rename. If a
    /// rename fails, the outputs already renamed are removed again, so a
    /// failed commit leaves none of this run's outputs in place.
    pub fn commit(&self, writers: SplitWriters<StagedOutput>) -> Result<()> {
        let (train, dev, test) = writers.into_inner();
        let mut prepared = vec![train.prepare()?];
        if let Some(dev) = dev {
            prepared.push(dev.prepare()?);
        }
        prepared.push(test.prepare()?);

        let mut committed: Vec<PathBuf> = Vec::with_capacity(prepared.len());
        for output in prepared {
            match output.persist() {
                Ok(path) => committed.push(path),
                Err(e) => {
                    remove_committed(&committed);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    fn check_distinct(&self) -> Result<()> {
        let outputs = self.outputs();
        for (i, (_, path)) in outputs.iter().enumerate() {
            if outputs[..i].iter().any(|(_, other)| other == path) {
                return Err(CliError::OutputConflict(path.display().to_string()).into());
            }
        }
        Ok(())
    }
}

fn stage_file(path: &Path) -> Result<StagedOutput> {
    let output = StagedOutput::create(path)?;
    log::debug!("Staged output for {}", output.target().display());
    Ok(output)
}

fn remove_committed(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => log::warn!("Removed {} after a failed commit", path.display()),
            Err(e) => log::error!("Failed to remove partial output {}: {e}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_core::{Record, RecordSink};
    use tempfile::TempDir;

    #[test]
    fn test_plan_with_dev() {
        let config = OutputConfig::default();
        let plan = OutputPlan::new(&config, Some(Path::new("out")), true).unwrap();

        assert_eq!(plan.path(Split::Train), Some(Path::new("out/train.csv")));
        assert_eq!(plan.path(Split::Dev), Some(Path::new("out/dev.csv")));
        assert_eq!(plan.path(Split::Test), Some(Path::new("out/test.csv")));
        assert_eq!(plan.outputs().len(), 3);
    }

    #[test]
    fn test_plan_without_dev() {
        let config = OutputConfig::default();
        let plan = OutputPlan::new(&config, None, false).unwrap();

        assert_eq!(plan.path(Split::Dev), None);
        let splits: Vec<_> = plan.outputs().into_iter().map(|(s, _)| s).collect();
        assert_eq!(splits, vec![Split::Train, Split::Test]);
    }

    #[test]
    fn test_conflicting_names_rejected() {
        let config = OutputConfig {
            dev: "same.csv".to_string(),
            test: "same.csv".to_string(),
            ..OutputConfig::default()
        };
        let err = OutputPlan::new(&config, None, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::OutputConflict(_))
        ));

        // Without dev the names no longer collide
        assert!(OutputPlan::new(&config, None, false).is_ok());
    }

    #[test]
    fn test_stage_and_commit() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/out");
        let plan = OutputPlan::new(&OutputConfig::default(), Some(out.as_path()), true).unwrap();

        let mut writers = plan.stage().unwrap();
        writers.write_header(&Record::from("Text,Label")).unwrap();
        writers
            .write_record(Split::Dev, &Record::from("a,1"))
            .unwrap();
        writers.finish().unwrap();
        assert!(!out.join("dev.csv").exists());

        plan.commit(writers).unwrap();
        assert_eq!(
            fs::read_to_string(out.join("dev.csv")).unwrap(),
            "Text,Label\na,1\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("train.csv")).unwrap(),
            "Text,Label\n"
        );
    }

    #[test]
    fn test_failed_rename_removes_earlier_outputs() {
        let dir = TempDir::new().unwrap();
        let plan = OutputPlan::new(&OutputConfig::default(), Some(dir.path()), true).unwrap();

        let mut writers = plan.stage().unwrap();
        writers
            .write_record(Split::Train, &Record::from("t"))
            .unwrap();
        // dev.csv turns into a directory after staging, so its rename fails
        fs::create_dir(dir.path().join("dev.csv")).unwrap();

        let err = plan.commit(writers).unwrap_err();
        assert!(err.to_string().contains("dev.csv"));

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["dev.csv"]);
        assert!(dir.path().join("dev.csv").is_dir());
    }

    #[test]
    fn test_directory_target_rejected_at_stage() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("test.csv")).unwrap();
        let plan = OutputPlan::new(&OutputConfig::default(), Some(dir.path()), false).unwrap();

        let err = plan.stage().err().unwrap();
        assert!(err.to_string().contains("Output path is a directory"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_abandoned_stage_leaves_directory_empty() {
        let dir = TempDir::new().unwrap();
        let plan = OutputPlan::new(&OutputConfig::default(), Some(dir.path()), false).unwrap();

        drop(plan.stage().unwrap());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
