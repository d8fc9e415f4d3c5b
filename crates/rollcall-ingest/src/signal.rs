//! Attendance signal tables.
//!
//! A signal is the narrow shape handed over by the form-retrieval
//! collaborator: one row per submission with the student's name, the class
//! date the form was for, and the submission timestamp. How the rows were
//! obtained (forms provider, manual entry) is out of scope; only the shape is
//! validated here, and validation happens before any roster row is touched.

use std::path::Path;

use chrono::Weekday;

use rollcall_model::{Result, RollcallError};

use crate::normalize::find_column;
use crate::table::read_table;

pub const SIGNAL_COLUMNS: [&str; 3] = ["Name", "Date", "Timestamp"];
pub const CDS_COLUMNS: [&str; 2] = ["Name", "CDS"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalRow {
    pub name: String,
    pub date: String,
    /// Raw submission timestamp. Parsed later with day-first/month-first
    /// fallback, so it stays a string at this layer.
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceSignal {
    pub rows: Vec<SignalRow>,
}

impl AttendanceSignal {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate a raw table against the required signal columns and build
    /// the typed rows. All missing columns are reported together.
    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Result<Self> {
        let indices = require_columns(headers, &SIGNAL_COLUMNS)?;
        let rows = rows
            .iter()
            .map(|row| SignalRow {
                name: cell(row, indices[0]),
                date: cell(row, indices[1]),
                timestamp: cell(row, indices[2]),
            })
            .collect();
        Ok(Self { rows })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdsRow {
    pub name: String,
    pub weekday: Weekday,
}

/// Per-student community-development-service weekdays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdsSignal {
    pub rows: Vec<CdsRow>,
}

impl CdsSignal {
    pub fn from_table(headers: &[String], rows: &[Vec<String>]) -> Result<Self> {
        let indices = require_columns(headers, &CDS_COLUMNS)?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let raw_day = cell(row, indices[1]);
            let weekday = raw_day
                .parse::<Weekday>()
                .map_err(|_| RollcallError::InvalidDate(raw_day.clone()))?;
            out.push(CdsRow {
                name: cell(row, indices[0]),
                weekday,
            });
        }
        Ok(Self { rows: out })
    }
}

pub fn read_signal(path: &Path) -> Result<AttendanceSignal> {
    let (headers, rows) = read_table(path)?;
    AttendanceSignal::from_table(&headers, &rows)
}

pub fn read_cds_signal(path: &Path) -> Result<CdsSignal> {
    let (headers, rows) = read_table(path)?;
    CdsSignal::from_table(&headers, &rows)
}

fn require_columns(headers: &[String], wanted: &[&str]) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(wanted.len());
    let mut missing = Vec::new();
    for name in wanted {
        match find_column(headers, name) {
            Some(index) => indices.push(index),
            None => missing.push((*name).to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(RollcallError::Validation { columns: missing });
    }
    Ok(indices)
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}
