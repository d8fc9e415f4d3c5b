//! Content-addressed snapshot storage.
//!
//! Each capture copies the canonical roster file into the snapshot directory
//! under a freshly generated identifier. Snapshots are immutable once
//! written and never overwritten; space is reclaimed only by `clear`, which
//! the explicit new-cohort reset calls.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use rollcall_model::{ContentDigest, Result, RollcallError, SnapshotId};

use crate::paths::CohortPaths;

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(paths: &CohortPaths) -> Self {
        Self {
            dir: paths.snapshot_dir(),
        }
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn snapshot_path(&self, id: &SnapshotId) -> PathBuf {
        self.dir.join(format!("{id}.csv"))
    }

    pub fn contains(&self, id: &SnapshotId) -> bool {
        self.snapshot_path(id).exists()
    }

    /// Capture the file at `source` as a new immutable snapshot. Returns the
    /// fresh identifier and the SHA-256 digest of the captured content.
    pub fn snapshot(&self, source: &Path) -> Result<(SnapshotId, ContentDigest)> {
        let content = fs::read(source).map_err(|error| match error.kind() {
            ErrorKind::PermissionDenied => RollcallError::FilePermission {
                path: source.to_path_buf(),
                source: error,
            },
            _ => RollcallError::Io(error),
        })?;
        let digest = ContentDigest::from_bytes(Sha256::digest(&content).into());

        fs::create_dir_all(&self.dir).map_err(|error| RollcallError::StorageWrite {
            path: self.dir.clone(),
            source: error,
        })?;
        let id = SnapshotId::generate();
        let destination = self.snapshot_path(&id);
        fs::write(&destination, &content).map_err(|error| RollcallError::StorageWrite {
            path: destination.clone(),
            source: error,
        })?;
        debug!(id = %id, bytes = content.len(), "captured snapshot");
        Ok((id, digest))
    }

    /// Copy the snapshot's content over `destination`. Destructive and
    /// non-transactional: the single-operator model guarantees no concurrent
    /// reader or writer.
    pub fn restore(&self, id: &SnapshotId, destination: &Path) -> Result<()> {
        let content = self.read_snapshot(id)?;
        fs::write(destination, &content).map_err(|error| RollcallError::StorageWrite {
            path: destination.to_path_buf(),
            source: error,
        })?;
        info!(id = %id, destination = %destination.display(), "restored snapshot");
        Ok(())
    }

    /// Like `restore`, but checks the content digest recorded at capture
    /// time first. A mismatch aborts with the destination untouched.
    pub fn restore_verified(
        &self,
        id: &SnapshotId,
        expected: &ContentDigest,
        destination: &Path,
    ) -> Result<()> {
        let content = self.read_snapshot(id)?;
        let actual = ContentDigest::from_bytes(Sha256::digest(&content).into());
        if actual != *expected {
            return Err(RollcallError::CorruptSnapshot(id.clone()));
        }
        fs::write(destination, &content).map_err(|error| RollcallError::StorageWrite {
            path: destination.to_path_buf(),
            source: error,
        })?;
        info!(id = %id, destination = %destination.display(), "restored snapshot");
        Ok(())
    }

    fn read_snapshot(&self, id: &SnapshotId) -> Result<Vec<u8>> {
        let path = self.snapshot_path(id);
        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(RollcallError::SnapshotNotFound(id.clone()))
            }
            Err(error) => Err(RollcallError::Io(error)),
        }
    }

    /// Delete every stored snapshot. Only the new-cohort reset calls this.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(RollcallError::Io(error)),
        }
    }
}
