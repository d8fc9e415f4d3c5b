//! Cohort file layout.
//!
//! Every component takes a `CohortPaths` explicitly; nothing resolves paths
//! through process-wide state.

use std::fs;
use std::path::{Path, PathBuf};

use rollcall_model::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortPaths {
    root: PathBuf,
}

impl CohortPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Canonical roster file, overwritten on every save.
    pub fn canonical_roster(&self) -> PathBuf {
        self.root.join("roster.csv")
    }

    /// Per-week copy of the roster as of the latest save in that week.
    pub fn week_roster(&self, week: u32) -> PathBuf {
        self.root.join(format!("roster_week{week}.csv"))
    }

    pub fn command_log(&self) -> PathBuf {
        self.root.join("command_log.csv")
    }

    pub fn snapshot_dir(&self) -> PathBuf {
        self.root.join("snapshots")
    }

    pub fn class_dates(&self) -> PathBuf {
        self.root.join("class_dates.txt")
    }

    /// Create the cohort directory tree if it does not exist yet.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::create_dir_all(self.snapshot_dir())?;
        Ok(())
    }
}
