//! Raw table reader: header row plus normalised cells, blank rows skipped.

use std::path::Path;

use csv::ReaderBuilder;

use rollcall_model::{Result, RollcallError};

use crate::normalize::{normalize_cell, normalize_header};

pub fn read_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| RollcallError::Csv(error.to_string()))?;
    let mut headers = Vec::new();
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|error| RollcallError::Csv(error.to_string()))?;
        if index == 0 {
            headers = record.iter().map(normalize_header).collect();
            continue;
        }
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok((headers, rows))
}
