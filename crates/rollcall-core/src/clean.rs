//! Roster construction from raw registration exports.
//!
//! Registration exports carry a submission timestamp plus free-form identity
//! fields. Cleaning maps the columns onto the identity schema, drops
//! duplicate registrations (first submission wins), and leaves the roster
//! sorted and renumbered.

use tracing::info;

use rollcall_ingest::find_column;
use rollcall_model::{Result, RollcallError, Roster, StudentRow};

/// Columns a registration export must carry.
pub const REGISTRATION_COLUMNS: [&str; 4] = ["Name", "Gender", "Phone Number", "Email"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub kept: usize,
    pub removed_duplicates: usize,
}

/// Build a roster (no date columns yet) from a raw registration table.
pub fn clean_registration(
    headers: &[String],
    rows: &[Vec<String>],
    cohort: &str,
) -> Result<(Roster, CleanReport)> {
    let mut indices = Vec::with_capacity(REGISTRATION_COLUMNS.len());
    let mut missing = Vec::new();
    for name in REGISTRATION_COLUMNS {
        match find_column(headers, name) {
            Some(index) => indices.push(index),
            None => missing.push(name.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(RollcallError::Validation { columns: missing });
    }
    let timestamp_index = find_column(headers, "Timestamp");

    let mut roster = Roster::new(Vec::new())?;
    let cell = |row: &[String], index: usize| row.get(index).cloned().unwrap_or_default();
    for row in rows {
        let name = cell(row, indices[0]);
        if name.trim().is_empty() {
            continue;
        }
        roster.push_row(StudentRow {
            name,
            gender: cell(row, indices[1]),
            cohort: cohort.to_string(),
            phone: cell(row, indices[2]),
            email: cell(row, indices[3]),
            registered: timestamp_index.map(|index| cell(row, index)).unwrap_or_default(),
            ..StudentRow::default()
        });
    }
    let removed = roster.dedupe();
    let report = CleanReport {
        kept: roster.len(),
        removed_duplicates: removed,
    };
    info!(kept = report.kept, removed = report.removed_duplicates, "cleaned registration data");
    Ok((roster, report))
}
