//! Attendance status values.
//!
//! Cell values in the roster's date columns. The set is closed so the
//! reconciliation precedence rules can be matched exhaustively; precedence
//! itself is pairwise (see `rollcall-core`), not a numeric ordering.

use std::fmt;
use std::str::FromStr;

use crate::RollcallError;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
    Excused,
    /// Class did not hold on this date. Never overridden by any other signal.
    NoClass,
    /// Community development service day. Wins over every bulk fill except
    /// a whole-class `NoClass`.
    Cds,
    /// No attendance recorded yet. Rendered as an empty cell.
    #[default]
    Empty,
}

impl AttendanceStatus {
    /// Canonical wire string as persisted in the roster CSV.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Excused => "Excused",
            AttendanceStatus::NoClass => "No Class",
            AttendanceStatus::Cds => "CDS",
            AttendanceStatus::Empty => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AttendanceStatus::Empty)
    }
}

impl FromStr for AttendanceStatus {
    type Err = RollcallError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(AttendanceStatus::Empty);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "excused" => Ok(AttendanceStatus::Excused),
            "no class" | "no-class" => Ok(AttendanceStatus::NoClass),
            "cds" => Ok(AttendanceStatus::Cds),
            other => Err(RollcallError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
