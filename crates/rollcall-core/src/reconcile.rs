//! Attendance reconciliation.
//!
//! All operations validate their inputs before touching any roster row and
//! apply a fixed precedence policy when an incoming fill would overwrite
//! existing data:
//!
//! - a cancelled class (`NoClass`) overrides everything;
//! - an existing `Cds` cell survives any bulk fill;
//! - an existing `Excused` cell is never downgraded by a bulk `Absent`;
//! - `NoClass` cells are never touched by CDS marking.

use tracing::{debug, warn};

use rollcall_ingest::{AttendanceSignal, CdsSignal};
use rollcall_model::{AttendanceStatus, ClassDate, Result, RollcallError, Roster};

use crate::dates::rows_matching_date;

/// Outcome of a signal-driven update: how many signal rows matched the class
/// date, how many roster cells changed, and which names matched no student.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub matched: usize,
    pub updated: usize,
    pub unmatched: Vec<String>,
}

/// Mark students named in `signal` present on `date`.
pub fn record_present(
    roster: &mut Roster,
    signal: &AttendanceSignal,
    date: &ClassDate,
) -> Result<ReconcileReport> {
    apply_signal(roster, signal, date, AttendanceStatus::Present)
}

/// Mark students named in `signal` excused on `date`.
pub fn record_excused(
    roster: &mut Roster,
    signal: &AttendanceSignal,
    date: &ClassDate,
) -> Result<ReconcileReport> {
    apply_signal(roster, signal, date, AttendanceStatus::Excused)
}

/// Mark students named in `signal` absent on `date`.
///
/// An empty signal marks the entire class column absent: when no attendance
/// form was submitted at all, "nobody responded" is read as "nobody
/// attended". Deliberate behavior, pinned by tests.
pub fn record_absent(
    roster: &mut Roster,
    signal: &AttendanceSignal,
    date: &ClassDate,
) -> Result<ReconcileReport> {
    if signal.rows.is_empty() {
        require_date(roster, date)?;
        let count = roster.len();
        for index in 0..count {
            roster.set_status(index, date, AttendanceStatus::Absent)?;
        }
        warn!(date = %date, rows = count, "empty signal: whole class marked absent");
        return Ok(ReconcileReport {
            matched: 0,
            updated: count,
            unmatched: Vec::new(),
        });
    }
    apply_signal(roster, signal, date, AttendanceStatus::Absent)
}

fn apply_signal(
    roster: &mut Roster,
    signal: &AttendanceSignal,
    date: &ClassDate,
    status: AttendanceStatus,
) -> Result<ReconcileReport> {
    require_date(roster, date)?;
    let rows = rows_matching_date(signal, date);
    let mut report = ReconcileReport {
        matched: rows.len(),
        ..ReconcileReport::default()
    };
    for row in rows {
        match roster.find_by_name(&row.name) {
            Some(index) => {
                roster.set_status(index, date, status)?;
                report.updated += 1;
            }
            None => {
                warn!(name = %row.name, date = %date, "signal names no registered student");
                report.unmatched.push(row.name.clone());
            }
        }
    }
    debug!(date = %date, status = %status, matched = report.matched, updated = report.updated, "applied signal");
    Ok(report)
}

/// Mark each named student `Cds` on every class date falling on their CDS
/// weekday, leaving `NoClass` cells untouched.
pub fn record_cds(roster: &mut Roster, signal: &CdsSignal) -> Result<ReconcileReport> {
    let mut report = ReconcileReport::default();
    let class_dates: Vec<ClassDate> = roster.class_dates().to_vec();
    for row in &signal.rows {
        let Some(index) = roster.find_by_name(&row.name) else {
            warn!(name = %row.name, "CDS signal names no registered student");
            report.unmatched.push(row.name.clone());
            continue;
        };
        report.matched += 1;
        for date in class_dates
            .iter()
            .filter(|date| date.weekday() == row.weekday)
        {
            if roster.status(index, date) == AttendanceStatus::NoClass {
                continue;
            }
            roster.set_status(index, date, AttendanceStatus::Cds)?;
            report.updated += 1;
        }
    }
    Ok(report)
}

/// Fill the whole column for `date` with `chosen`, resolving each row
/// against the precedence table.
pub fn bulk_fill_all(
    roster: &mut Roster,
    date: &ClassDate,
    chosen: AttendanceStatus,
) -> Result<()> {
    require_date(roster, date)?;
    for index in 0..roster.len() {
        let resolved = resolve_bulk(roster.status(index, date), chosen);
        roster.set_status(index, date, resolved)?;
    }
    debug!(date = %date, status = %chosen, rows = roster.len(), "bulk fill applied");
    Ok(())
}

/// Precedence table for a bulk fill. Exhaustive on purpose: adding a status
/// variant must force a decision here.
pub fn resolve_bulk(existing: AttendanceStatus, chosen: AttendanceStatus) -> AttendanceStatus {
    use AttendanceStatus as S;
    match (existing, chosen) {
        (_, S::NoClass) => S::NoClass,
        (S::Cds, _) => S::Cds,
        (S::Excused, S::Absent) => S::Excused,
        (_, S::Present | S::Absent | S::Excused | S::Cds | S::Empty) => chosen,
    }
}

/// Add any of `dates` the roster does not yet have as columns, in order.
pub fn ensure_date_columns(roster: &mut Roster, dates: &[ClassDate]) -> Result<usize> {
    let mut added = 0;
    for date in dates {
        if !roster.has_class_date(date) {
            roster.add_class_date(*date)?;
            added += 1;
        }
    }
    Ok(added)
}

fn require_date(roster: &Roster, date: &ClassDate) -> Result<()> {
    if roster.has_class_date(date) {
        Ok(())
    } else {
        Err(RollcallError::UnknownDateColumn(*date))
    }
}
