//! The in-memory roster table: one row per student, fixed identity columns
//! plus one dynamic column per class date.

use std::collections::BTreeMap;

use crate::{AttendanceStatus, ClassDate, RollcallError};

/// Fixed identity columns, in persisted order. Everything after these in a
/// roster file must be a `dd/mm/yyyy` date column.
pub const IDENTITY_COLUMNS: [&str; 7] = [
    "S/N",
    "Name",
    "Gender",
    "Cohort",
    "Phone Number",
    "Email",
    "Registration Date",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StudentRow {
    pub serial: u32,
    pub name: String,
    pub gender: String,
    pub cohort: String,
    pub phone: String,
    pub email: String,
    pub registered: String,
    /// Attendance cells; a date absent from the map reads as `Empty`.
    pub attendance: BTreeMap<ClassDate, AttendanceStatus>,
}

impl StudentRow {
    pub fn status(&self, date: &ClassDate) -> AttendanceStatus {
        self.attendance.get(date).copied().unwrap_or_default()
    }

    /// Key used to detect duplicate registrations.
    pub fn dedupe_key(&self) -> (String, String, String) {
        (
            self.name.trim().to_lowercase(),
            self.phone.trim().to_string(),
            self.email.trim().to_lowercase(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Roster {
    class_dates: Vec<ClassDate>,
    rows: Vec<StudentRow>,
}

impl Roster {
    /// Build an empty roster over the given class-date columns.
    pub fn new(class_dates: Vec<ClassDate>) -> Result<Self, RollcallError> {
        let mut seen = std::collections::BTreeSet::new();
        for date in &class_dates {
            if !seen.insert(*date) {
                return Err(RollcallError::DuplicateDateColumn(*date));
            }
        }
        Ok(Self {
            class_dates,
            rows: Vec::new(),
        })
    }

    pub fn from_rows(
        class_dates: Vec<ClassDate>,
        rows: Vec<StudentRow>,
    ) -> Result<Self, RollcallError> {
        let mut roster = Self::new(class_dates)?;
        roster.rows = rows;
        roster.normalize();
        Ok(roster)
    }

    pub fn class_dates(&self) -> &[ClassDate] {
        &self.class_dates
    }

    pub fn rows(&self) -> &[StudentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_class_date(&self, date: &ClassDate) -> bool {
        self.class_dates.contains(date)
    }

    /// Append a new date column at the end of the dynamic columns.
    pub fn add_class_date(&mut self, date: ClassDate) -> Result<(), RollcallError> {
        if self.has_class_date(&date) {
            return Err(RollcallError::DuplicateDateColumn(date));
        }
        self.class_dates.push(date);
        Ok(())
    }

    pub fn push_row(&mut self, row: StudentRow) {
        self.rows.push(row);
        self.normalize();
    }

    /// Remove duplicate registrations, keeping the first occurrence.
    pub fn dedupe(&mut self) -> usize {
        let mut seen = std::collections::BTreeSet::new();
        let before = self.rows.len();
        self.rows.retain(|row| seen.insert(row.dedupe_key()));
        let removed = before - self.rows.len();
        if removed > 0 {
            self.normalize();
        }
        removed
    }

    pub fn status(&self, row_index: usize, date: &ClassDate) -> AttendanceStatus {
        self.rows[row_index].status(date)
    }

    pub fn set_status(
        &mut self,
        row_index: usize,
        date: &ClassDate,
        status: AttendanceStatus,
    ) -> Result<(), RollcallError> {
        if !self.has_class_date(date) {
            return Err(RollcallError::UnknownDateColumn(*date));
        }
        if status.is_empty() {
            self.rows[row_index].attendance.remove(date);
        } else {
            self.rows[row_index].attendance.insert(*date, status);
        }
        Ok(())
    }

    /// Row index of the student with this name, matched case-insensitively
    /// on the trimmed value.
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        let needle = name.trim().to_lowercase();
        self.rows
            .iter()
            .position(|row| row.name.trim().to_lowercase() == needle)
    }

    /// Restore the structural invariant: rows sorted by name, serial numbers
    /// contiguous from 1.
    fn normalize(&mut self) {
        self.rows
            .sort_by_key(|row| row.name.trim().to_lowercase());
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.serial = (index + 1) as u32;
        }
    }
}
