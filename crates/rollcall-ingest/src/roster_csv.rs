//! Roster table reader/writer.
//!
//! Layout: the fixed identity columns in declared order, then one column per
//! class date. The date columns are whatever headers remain after the
//! identity block, parsed as `dd/mm/yyyy`.

use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use rollcall_model::{
    AttendanceStatus, ClassDate, IDENTITY_COLUMNS, Result, RollcallError, Roster, StudentRow,
};

use crate::normalize::{normalize_cell, normalize_header};

pub fn read_roster(path: &Path) -> Result<Roster> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| map_open_error(path, error))?;

    let mut records = reader.records();
    let header_record = match records.next() {
        Some(record) => record.map_err(|error| RollcallError::Csv(error.to_string()))?,
        None => return Roster::new(Vec::new()),
    };
    let headers: Vec<String> = header_record.iter().map(normalize_header).collect();

    for (position, wanted) in IDENTITY_COLUMNS.iter().enumerate() {
        match headers.get(position) {
            Some(found) if found.eq_ignore_ascii_case(wanted) => {}
            _ => return Err(RollcallError::MissingIdentityColumn((*wanted).to_string())),
        }
    }
    let class_dates: Vec<ClassDate> = headers[IDENTITY_COLUMNS.len()..]
        .iter()
        .map(|header| ClassDate::parse(header))
        .collect::<Result<_>>()?;

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|error| RollcallError::Csv(error.to_string()))?;
        let cells: Vec<String> = record.iter().map(normalize_cell).collect();
        if cells.iter().all(|value| value.is_empty()) {
            continue;
        }
        let cell = |index: usize| cells.get(index).cloned().unwrap_or_default();
        let mut row = StudentRow {
            serial: cell(0).parse().unwrap_or(0),
            name: cell(1),
            gender: cell(2),
            cohort: cell(3),
            phone: cell(4),
            email: cell(5),
            registered: cell(6),
            ..StudentRow::default()
        };
        for (offset, date) in class_dates.iter().enumerate() {
            let value = cell(IDENTITY_COLUMNS.len() + offset);
            let status = AttendanceStatus::from_str(&value)?;
            if !status.is_empty() {
                row.attendance.insert(*date, status);
            }
        }
        rows.push(row);
    }
    debug!(path = %path.display(), rows = rows.len(), "loaded roster");
    Roster::from_rows(class_dates, rows)
}

pub fn write_roster(path: &Path, roster: &Roster) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|error| RollcallError::Csv(error.to_string()))?;

    let mut header: Vec<String> = IDENTITY_COLUMNS.iter().map(|name| (*name).to_string()).collect();
    header.extend(roster.class_dates().iter().map(ToString::to_string));
    writer
        .write_record(&header)
        .map_err(|error| RollcallError::Csv(error.to_string()))?;

    for row in roster.rows() {
        let mut record = vec![
            row.serial.to_string(),
            row.name.clone(),
            row.gender.clone(),
            row.cohort.clone(),
            row.phone.clone(),
            row.email.clone(),
            row.registered.clone(),
        ];
        for date in roster.class_dates() {
            record.push(row.status(date).as_str().to_string());
        }
        writer
            .write_record(&record)
            .map_err(|error| RollcallError::Csv(error.to_string()))?;
    }
    writer
        .flush()
        .map_err(|error| RollcallError::StorageWrite {
            path: path.to_path_buf(),
            source: error,
        })?;
    debug!(path = %path.display(), rows = roster.len(), "saved roster");
    Ok(())
}

fn map_open_error(path: &Path, error: csv::Error) -> RollcallError {
    match error.kind() {
        csv::ErrorKind::Io(io_error) if io_error.kind() == std::io::ErrorKind::PermissionDenied => {
            RollcallError::FilePermission {
                path: path.to_path_buf(),
                source: std::io::Error::new(io_error.kind(), io_error.to_string()),
            }
        }
        _ => RollcallError::Csv(error.to_string()),
    }
}
