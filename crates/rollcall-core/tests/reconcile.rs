//! Tests for the attendance reconciliation operations.

use rollcall_core::{
    bulk_fill_all, ensure_date_columns, record_absent, record_cds, record_excused,
    record_present,
};
use rollcall_ingest::{AttendanceSignal, CdsRow, CdsSignal, SignalRow};
use rollcall_model::{AttendanceStatus, ClassDate, RollcallError, Roster, StudentRow};

fn date(value: &str) -> ClassDate {
    ClassDate::parse(value).expect("class date")
}

fn roster_with_dates(names: &[&str], dates: &[ClassDate]) -> Roster {
    let mut roster = Roster::new(dates.to_vec()).expect("roster");
    for name in names {
        roster.push_row(StudentRow {
            name: (*name).to_string(),
            ..StudentRow::default()
        });
    }
    roster
}

fn signal_for(names: &[&str], timestamp: &str) -> AttendanceSignal {
    AttendanceSignal {
        rows: names
            .iter()
            .map(|name| SignalRow {
                name: (*name).to_string(),
                date: String::new(),
                timestamp: timestamp.to_string(),
            })
            .collect(),
    }
}

#[test]
fn present_signal_updates_only_named_students() {
    let d = date("03/02/2025");
    let mut roster = roster_with_dates(&["Amara", "Bola", "Chidi"], &[d]);
    let signal = signal_for(&["Bola"], "03/02/2025 09:12:00");

    let report = record_present(&mut roster, &signal, &d).expect("record present");

    assert_eq!(report.matched, 1);
    assert_eq!(report.updated, 1);
    let bola = roster.find_by_name("Bola").expect("row");
    assert_eq!(roster.status(bola, &d), AttendanceStatus::Present);
    let amara = roster.find_by_name("Amara").expect("row");
    assert_eq!(roster.status(amara, &d), AttendanceStatus::Empty);
}

#[test]
fn empty_signal_marks_entire_class_absent() {
    let d = date("03/02/2025");
    let mut roster = roster_with_dates(&["Amara", "Bola", "Chidi"], &[d]);

    let report = record_absent(&mut roster, &AttendanceSignal::empty(), &d).expect("record absent");

    assert_eq!(report.updated, 3);
    for index in 0..roster.len() {
        assert_eq!(roster.status(index, &d), AttendanceStatus::Absent);
    }
}

#[test]
fn excused_signal_leaves_other_dates_untouched() {
    let d1 = date("03/02/2025");
    let d2 = date("05/02/2025");
    let mut roster = roster_with_dates(&["Amara"], &[d1, d2]);
    roster
        .set_status(0, &d1, AttendanceStatus::Present)
        .expect("seed");

    let signal = signal_for(&["Amara"], "05/02/2025 10:00:00");
    record_excused(&mut roster, &signal, &d2).expect("record excused");

    assert_eq!(roster.status(0, &d1), AttendanceStatus::Present);
    assert_eq!(roster.status(0, &d2), AttendanceStatus::Excused);
}

#[test]
fn month_first_fallback_applies_when_day_first_matches_nothing() {
    // 13/02 cannot be a month-first reading, so an export stamped 02/13/2025
    // only matches through the fallback.
    let d = date("13/02/2025");
    let mut roster = roster_with_dates(&["Amara"], &[d]);
    let signal = signal_for(&["Amara"], "02/13/2025 09:00:00");

    let report = record_present(&mut roster, &signal, &d).expect("record present");

    assert_eq!(report.matched, 1);
    assert_eq!(roster.status(0, &d), AttendanceStatus::Present);
}

#[test]
fn fallback_is_evaluated_per_target_date() {
    // 03/02 parses both ways. Against 3 February the day-first pass matches,
    // so no fallback runs; against 2 March day-first matches nothing and the
    // month-first fallback kicks in.
    let feb = date("03/02/2025");
    let mar = date("02/03/2025");
    let mut roster = roster_with_dates(&["Amara"], &[feb, mar]);
    let signal = signal_for(&["Amara"], "03/02/2025 09:00:00");

    let feb_report = record_present(&mut roster, &signal, &feb).expect("record present");
    assert_eq!(feb_report.matched, 1);
    assert_eq!(roster.status(0, &feb), AttendanceStatus::Present);

    let mar_report = record_present(&mut roster, &signal, &mar).expect("record present");
    assert_eq!(mar_report.matched, 1);
    assert_eq!(roster.status(0, &mar), AttendanceStatus::Present);
}

#[test]
fn unknown_names_are_reported_not_dropped_silently() {
    let d = date("03/02/2025");
    let mut roster = roster_with_dates(&["Amara"], &[d]);
    let signal = signal_for(&["Amara", "Nonesuch"], "03/02/2025 09:00:00");

    let report = record_present(&mut roster, &signal, &d).expect("record present");

    assert_eq!(report.matched, 2);
    assert_eq!(report.updated, 1);
    assert_eq!(report.unmatched, vec!["Nonesuch".to_string()]);
}

#[test]
fn record_for_undeclared_date_fails_before_any_mutation() {
    let declared = date("03/02/2025");
    let undeclared = date("04/02/2025");
    let mut roster = roster_with_dates(&["Amara"], &[declared]);
    let signal = signal_for(&["Amara"], "04/02/2025 09:00:00");

    let err = record_present(&mut roster, &signal, &undeclared).expect_err("unknown column");
    assert!(matches!(err, RollcallError::UnknownDateColumn(_)));
    assert_eq!(roster.status(0, &declared), AttendanceStatus::Empty);
}

#[test]
fn cds_marks_every_matching_weekday_for_that_student_only() {
    // 03/02/2025 and 10/02/2025 are Mondays; 05/02/2025 is a Wednesday.
    let mon1 = date("03/02/2025");
    let wed = date("05/02/2025");
    let mon2 = date("10/02/2025");
    let mut roster = roster_with_dates(&["Amara", "Bola"], &[mon1, wed, mon2]);

    let signal = CdsSignal {
        rows: vec![CdsRow {
            name: "Amara".to_string(),
            weekday: chrono::Weekday::Mon,
        }],
    };
    let report = record_cds(&mut roster, &signal).expect("record cds");

    assert_eq!(report.updated, 2);
    let amara = roster.find_by_name("Amara").expect("row");
    let bola = roster.find_by_name("Bola").expect("row");
    assert_eq!(roster.status(amara, &mon1), AttendanceStatus::Cds);
    assert_eq!(roster.status(amara, &mon2), AttendanceStatus::Cds);
    assert_eq!(roster.status(amara, &wed), AttendanceStatus::Empty);
    assert_eq!(roster.status(bola, &mon1), AttendanceStatus::Empty);
}

#[test]
fn cds_never_touches_a_no_class_cell() {
    let mon1 = date("03/02/2025");
    let mon2 = date("10/02/2025");
    let mut roster = roster_with_dates(&["Amara"], &[mon1, mon2]);
    roster
        .set_status(0, &mon1, AttendanceStatus::NoClass)
        .expect("seed");

    let signal = CdsSignal {
        rows: vec![CdsRow {
            name: "Amara".to_string(),
            weekday: chrono::Weekday::Mon,
        }],
    };
    record_cds(&mut roster, &signal).expect("record cds");

    assert_eq!(roster.status(0, &mon1), AttendanceStatus::NoClass);
    assert_eq!(roster.status(0, &mon2), AttendanceStatus::Cds);
}

#[test]
fn bulk_absent_never_downgrades_an_excused_row() {
    let d = date("03/02/2025");
    let mut roster = roster_with_dates(&["Amara", "Bola"], &[d]);
    let amara = roster.find_by_name("Amara").expect("row");
    roster
        .set_status(amara, &d, AttendanceStatus::Excused)
        .expect("seed");

    bulk_fill_all(&mut roster, &d, AttendanceStatus::Absent).expect("bulk fill");

    assert_eq!(roster.status(amara, &d), AttendanceStatus::Excused);
    let bola = roster.find_by_name("Bola").expect("row");
    assert_eq!(roster.status(bola, &d), AttendanceStatus::Absent);
}

#[test]
fn bulk_fill_keeps_cds_except_under_no_class() {
    let d = date("03/02/2025");
    let mut roster = roster_with_dates(&["Amara"], &[d]);
    roster.set_status(0, &d, AttendanceStatus::Cds).expect("seed");

    bulk_fill_all(&mut roster, &d, AttendanceStatus::Present).expect("bulk fill");
    assert_eq!(roster.status(0, &d), AttendanceStatus::Cds);

    bulk_fill_all(&mut roster, &d, AttendanceStatus::NoClass).expect("bulk fill");
    assert_eq!(roster.status(0, &d), AttendanceStatus::NoClass);
}

#[test]
fn no_class_fill_is_idempotent() {
    let d = date("03/02/2025");
    let mut roster = roster_with_dates(&["Amara", "Bola", "Chidi"], &[d]);
    roster
        .set_status(0, &d, AttendanceStatus::Excused)
        .expect("seed");

    bulk_fill_all(&mut roster, &d, AttendanceStatus::NoClass).expect("first fill");
    let once = roster.clone();
    bulk_fill_all(&mut roster, &d, AttendanceStatus::NoClass).expect("second fill");

    assert_eq!(roster, once);
}

#[test]
fn ensure_date_columns_adds_only_missing_dates() {
    let d1 = date("03/02/2025");
    let d2 = date("05/02/2025");
    let mut roster = roster_with_dates(&["Amara"], &[d1]);

    let added = ensure_date_columns(&mut roster, &[d1, d2]).expect("ensure columns");

    assert_eq!(added, 1);
    assert_eq!(roster.class_dates(), &[d1, d2]);
}
