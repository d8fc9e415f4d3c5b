//! The class-dates file: one `dd/mm/yyyy` per line, in teaching order.
//! This file is the authoritative source of which date columns exist.

use std::fs;
use std::path::Path;

use rollcall_model::{ClassDate, Result};

pub fn read_class_dates(path: &Path) -> Result<Vec<ClassDate>> {
    let content = fs::read_to_string(path)?;
    let mut dates = Vec::new();
    for line in content.lines() {
        let line = line.trim().trim_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }
        dates.push(ClassDate::parse(line)?);
    }
    Ok(dates)
}

pub fn write_class_dates(path: &Path, dates: &[ClassDate]) -> Result<()> {
    let mut content = String::new();
    for date in dates {
        content.push_str(&date.to_string());
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
