//! The command log and rollback over it.
//!
//! One row per completed state-mutating action, chronological, append-only.
//! `record` orders its steps so a crash cannot leave the log pointing at a
//! snapshot that does not exist: the snapshot is written first, then the log
//! is committed with an atomic rename. A crash in between leaves only an
//! orphaned snapshot file, which nothing references and nothing reads.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use rollcall_ingest::{read_log, write_log_atomic};
use rollcall_model::{LogEntry, Result, RollcallError};

use crate::paths::CohortPaths;
use crate::snapshot::SnapshotStore;

#[derive(Debug)]
pub struct CommandLog {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl CommandLog {
    /// Load the log from disk; a missing file is an empty log.
    pub fn open(paths: &CohortPaths) -> Result<Self> {
        let path = paths.command_log();
        let entries = read_log(&path)?;
        Ok(Self { path, entries })
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capture a snapshot of `live` and append a log entry for it. Called
    /// after the live store has been persisted, never before.
    pub fn record(
        &mut self,
        description: &str,
        snapshots: &SnapshotStore,
        live: &Path,
    ) -> Result<LogEntry> {
        let (snapshot, digest) = snapshots.snapshot(live)?;
        let entry = LogEntry {
            timestamp: Local::now().naive_local(),
            description: description.to_string(),
            snapshot,
            digest,
        };
        self.entries.push(entry.clone());
        write_log_atomic(&self.path, &self.entries)?;
        info!(description, index = self.entries.len(), "recorded command");
        Ok(entry)
    }

    /// Clear the log and delete all snapshots. Only the explicit new-cohort
    /// action goes through here; rollback never truncates history.
    pub fn reset(&mut self, snapshots: &SnapshotStore) -> Result<()> {
        self.entries.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(error) if error.kind() == ErrorKind::NotFound => {}
            Err(error) => return Err(RollcallError::Io(error)),
        }
        snapshots.clear()?;
        info!("command log reset");
        Ok(())
    }
}

/// Restores the live store to any recorded point in history.
#[derive(Debug)]
pub struct RollbackEngine<'a> {
    log: &'a CommandLog,
    snapshots: &'a SnapshotStore,
}

impl<'a> RollbackEngine<'a> {
    pub fn new(log: &'a CommandLog, snapshots: &'a SnapshotStore) -> Self {
        Self { log, snapshots }
    }

    /// The recoverable history, oldest first, with the 1-based index the
    /// user selects by.
    pub fn recovery_points(&self) -> impl Iterator<Item = (usize, &'a LogEntry)> {
        self.log
            .entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| (position + 1, entry))
    }

    /// Restore the state captured at `index` (1 = oldest) over
    /// `destination`. Later log entries stay in place, so any later state
    /// can still be re-selected afterwards.
    pub fn rollback(&self, index: usize, destination: &Path) -> Result<LogEntry> {
        let len = self.log.len();
        if index == 0 || index > len {
            return Err(RollcallError::InvalidIndex { given: index, len });
        }
        let entry = &self.log.entries()[index - 1];
        self.snapshots
            .restore_verified(&entry.snapshot, &entry.digest, destination)?;
        info!(index, description = %entry.description, "rolled back");
        Ok(entry.clone())
    }
}
