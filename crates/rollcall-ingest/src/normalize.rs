//! Header and cell normalisation shared by every CSV reader in this crate.
//!
//! Spreadsheet exports arrive with BOM markers, stray padding, and repeated
//! interior whitespace in headers; everything is cleaned up front so the rest
//! of the pipeline can compare strings directly.

pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Case-insensitive header lookup; returns the column index.
pub fn find_column(headers: &[String], wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(wanted))
}
