use std::path::PathBuf;

use thiserror::Error;

use crate::{ClassDate, SnapshotId};

#[derive(Debug, Error)]
pub enum RollcallError {
    /// An incoming signal table is structurally invalid. Raised before any
    /// row of the roster is touched.
    #[error("signal is missing required column(s): {}", .columns.join(", "))]
    Validation { columns: Vec<String> },

    #[error("cannot read {path}: file is locked or permission denied")]
    FilePermission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {path}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no snapshot stored for id {0}")]
    SnapshotNotFound(SnapshotId),

    #[error("snapshot {0} failed its content digest check")]
    CorruptSnapshot(SnapshotId),

    #[error("rollback index {given} out of range (valid: 1..={len})")]
    InvalidIndex { given: usize, len: usize },

    #[error("command log is corrupt: {0}")]
    CorruptLog(String),

    #[error("duplicate class date column {0}")]
    DuplicateDateColumn(ClassDate),

    #[error("unknown class date column {0}")]
    UnknownDateColumn(ClassDate),

    #[error("roster file is missing identity column {0:?}")]
    MissingIdentityColumn(String),

    #[error("invalid date {0:?} (expected dd/mm/yyyy)")]
    InvalidDate(String),

    #[error("unknown attendance status {0:?}")]
    UnknownStatus(String),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RollcallError {
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RollcallError>;
