//! Command-log table codec.
//!
//! The log is a CSV table in chronological order, oldest row first; the row
//! position is the 1-based rollback index. A wrong header is treated as
//! corruption, not as an empty log.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, WriterBuilder};

use rollcall_model::{
    ContentDigest, LOG_TIMESTAMP_FORMAT, LogEntry, Result, RollcallError, SnapshotId,
};

use crate::normalize::normalize_header;

pub const LOG_COLUMNS: [&str; 4] = ["Timestamp", "Command", "Snapshot ID", "Digest"];

/// Read the full log. A missing file is an empty log.
pub fn read_log(path: &Path) -> Result<Vec<LogEntry>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|error| RollcallError::Csv(error.to_string()))?;

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|error| RollcallError::Csv(error.to_string()))?;
        if index == 0 {
            let headers: Vec<String> = record.iter().map(normalize_header).collect();
            if headers.len() != LOG_COLUMNS.len()
                || !headers
                    .iter()
                    .zip(LOG_COLUMNS.iter())
                    .all(|(found, wanted)| found.eq_ignore_ascii_case(wanted))
            {
                return Err(RollcallError::CorruptLog(format!(
                    "unexpected header {headers:?}"
                )));
            }
            continue;
        }
        let field = |position: usize| record.get(position).unwrap_or("").trim().to_string();
        let timestamp = NaiveDateTime::parse_from_str(&field(0), LOG_TIMESTAMP_FORMAT)
            .map_err(|_| {
                RollcallError::CorruptLog(format!("bad timestamp {:?} at row {}", field(0), index))
            })?;
        entries.push(LogEntry {
            timestamp,
            description: field(1),
            snapshot: SnapshotId::parse(field(2))?,
            digest: ContentDigest::from_hex(&field(3))?,
        });
    }
    Ok(entries)
}

/// Persist the full log atomically: write a sibling temp file, then rename
/// it over the old one. Readers never observe a partially written table.
pub fn write_log_atomic(path: &Path, entries: &[LogEntry]) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    {
        let mut writer = WriterBuilder::new()
            .from_path(&tmp)
            .map_err(|error| RollcallError::Csv(error.to_string()))?;
        writer
            .write_record(LOG_COLUMNS)
            .map_err(|error| RollcallError::Csv(error.to_string()))?;
        for entry in entries {
            writer
                .write_record([
                    entry.timestamp.format(LOG_TIMESTAMP_FORMAT).to_string(),
                    entry.description.clone(),
                    entry.snapshot.as_str().to_string(),
                    entry.digest.to_hex(),
                ])
                .map_err(|error| RollcallError::Csv(error.to_string()))?;
        }
        writer
            .flush()
            .map_err(|error| RollcallError::StorageWrite {
                path: tmp.clone(),
                source: error,
            })?;
    }
    fs::rename(&tmp, path).map_err(|error| RollcallError::StorageWrite {
        path: path.to_path_buf(),
        source: error,
    })
}
