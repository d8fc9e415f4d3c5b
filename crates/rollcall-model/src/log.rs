use chrono::NaiveDateTime;

use crate::{ContentDigest, SnapshotId};

/// Timestamp format used in the persisted command log.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the command log. Entries are append-only and chronological;
/// the row position defines the 1-based rollback index shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub description: String,
    pub snapshot: SnapshotId,
    pub digest: ContentDigest,
}
