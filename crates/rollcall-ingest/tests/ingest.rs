//! Tests for CSV persistence of the roster, signals, and the command log.

use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use rollcall_ingest::{
    AttendanceSignal, CdsSignal, read_class_dates, read_log, read_roster, read_signal,
    write_class_dates, write_log_atomic, write_roster,
};
use rollcall_model::{
    AttendanceStatus, ClassDate, ContentDigest, LogEntry, RollcallError, Roster, SnapshotId,
    StudentRow,
};

fn sample_roster() -> Roster {
    let dates = vec![
        ClassDate::parse("03/02/2025").expect("date"),
        ClassDate::parse("05/02/2025").expect("date"),
    ];
    let mut roster = Roster::new(dates.clone()).expect("roster");
    for name in ["Amara", "Bola", "Chidi"] {
        roster.push_row(StudentRow {
            name: name.to_string(),
            gender: "F".to_string(),
            cohort: "C7".to_string(),
            phone: "08012345678".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            registered: "20/01/2025".to_string(),
            ..StudentRow::default()
        });
    }
    roster
        .set_status(0, &dates[0], AttendanceStatus::Present)
        .expect("set status");
    roster
        .set_status(1, &dates[1], AttendanceStatus::Excused)
        .expect("set status");
    roster
}

#[test]
fn roster_round_trips_through_csv() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("roster.csv");
    let roster = sample_roster();

    write_roster(&path, &roster).expect("write roster");
    let loaded = read_roster(&path).expect("read roster");

    assert_eq!(loaded, roster);
}

#[test]
fn roster_read_rejects_missing_identity_column() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("roster.csv");
    fs::write(&path, "S/N,Name,Gender\n1,Amara,F\n").expect("write file");

    let err = read_roster(&path).expect_err("schema error");
    assert!(matches!(err, RollcallError::MissingIdentityColumn(_)));
}

#[test]
fn roster_read_rejects_non_date_trailing_column() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("roster.csv");
    fs::write(
        &path,
        "S/N,Name,Gender,Cohort,Phone Number,Email,Registration Date,NotADate\n",
    )
    .expect("write file");

    let err = read_roster(&path).expect_err("date column error");
    assert!(matches!(err, RollcallError::InvalidDate(_)));
}

#[test]
fn signal_validation_reports_every_missing_column() {
    let headers = vec!["Name".to_string(), "Score".to_string()];
    let err = AttendanceSignal::from_table(&headers, &[]).expect_err("validation error");
    match err {
        RollcallError::Validation { columns } => {
            assert_eq!(columns, vec!["Date".to_string(), "Timestamp".to_string()]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn signal_reads_rows_and_skips_blank_lines() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("signal.csv");
    fs::write(
        &path,
        "\u{feff}Name , Date ,Timestamp\nAmara,03/02/2025,03/02/2025 09:12:00\n,,\nBola,03/02/2025,03/02/2025 09:30:00\n",
    )
    .expect("write file");

    let signal = read_signal(&path).expect("read signal");
    assert_eq!(signal.rows.len(), 2);
    assert_eq!(signal.rows[0].name, "Amara");
    assert_eq!(signal.rows[1].timestamp, "03/02/2025 09:30:00");
}

#[test]
fn cds_signal_parses_weekdays() {
    let headers = vec!["Name".to_string(), "CDS".to_string()];
    let rows = vec![
        vec!["Amara".to_string(), "Monday".to_string()],
        vec!["Bola".to_string(), "thursday".to_string()],
    ];
    let signal = CdsSignal::from_table(&headers, &rows).expect("cds signal");
    assert_eq!(signal.rows[0].weekday, chrono::Weekday::Mon);
    assert_eq!(signal.rows[1].weekday, chrono::Weekday::Thu);

    let bad = vec![vec!["Chidi".to_string(), "Someday".to_string()]];
    assert!(CdsSignal::from_table(&headers, &bad).is_err());
}

#[test]
fn class_dates_file_round_trips_in_order() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("class_dates.txt");
    let dates = vec![
        ClassDate::parse("03/02/2025").expect("date"),
        ClassDate::parse("05/02/2025").expect("date"),
        ClassDate::parse("10/02/2025").expect("date"),
    ];

    write_class_dates(&path, &dates).expect("write dates");
    let loaded = read_class_dates(&path).expect("read dates");
    assert_eq!(loaded, dates);
}

#[test]
fn log_round_trips_and_missing_file_reads_empty() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("log.csv");

    assert!(read_log(&path).expect("empty log").is_empty());

    let entries = vec![
        LogEntry {
            timestamp: NaiveDate::from_ymd_opt(2025, 2, 3)
                .expect("date")
                .and_hms_opt(9, 0, 0)
                .expect("time"),
            description: "marked attendance for 03/02/2025".to_string(),
            snapshot: SnapshotId::generate(),
            digest: ContentDigest::from_bytes([1u8; 32]),
        },
        LogEntry {
            timestamp: NaiveDate::from_ymd_opt(2025, 2, 5)
                .expect("date")
                .and_hms_opt(9, 5, 0)
                .expect("time"),
            description: "bulk fill 05/02/2025".to_string(),
            snapshot: SnapshotId::generate(),
            digest: ContentDigest::from_bytes([2u8; 32]),
        },
    ];
    write_log_atomic(&path, &entries).expect("write log");
    let loaded = read_log(&path).expect("read log");
    assert_eq!(loaded, entries);
    assert!(!path.with_extension("csv.tmp").exists());
}

#[test]
fn log_with_wrong_header_is_corrupt() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("log.csv");
    fs::write(&path, "When,What\n2025-02-03 09:00:00,something\n").expect("write file");

    let err = read_log(&path).expect_err("corrupt log");
    assert!(matches!(err, RollcallError::CorruptLog(_)));
}
