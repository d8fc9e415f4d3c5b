//! Tests for the roster data model.

use std::str::FromStr;

use rollcall_model::{
    AttendanceStatus, ClassDate, ContentDigest, Roster, RollcallError, SnapshotId, StudentRow,
};

fn student(name: &str) -> StudentRow {
    StudentRow {
        name: name.to_string(),
        gender: "F".to_string(),
        cohort: "C7".to_string(),
        phone: format!("080{}", name.len()),
        email: format!("{}@example.com", name.to_lowercase()),
        registered: "01/02/2025".to_string(),
        ..StudentRow::default()
    }
}

#[test]
fn status_round_trips_through_wire_strings() {
    for status in [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Excused,
        AttendanceStatus::NoClass,
        AttendanceStatus::Cds,
        AttendanceStatus::Empty,
    ] {
        let parsed = AttendanceStatus::from_str(status.as_str()).expect("parse wire string");
        assert_eq!(parsed, status);
    }
}

#[test]
fn status_parse_is_case_insensitive_and_rejects_unknown() {
    assert_eq!(
        AttendanceStatus::from_str("no class").expect("parse"),
        AttendanceStatus::NoClass
    );
    assert_eq!(
        AttendanceStatus::from_str("  cds ").expect("parse"),
        AttendanceStatus::Cds
    );
    assert!(matches!(
        AttendanceStatus::from_str("late"),
        Err(RollcallError::UnknownStatus(_))
    ));
}

#[test]
fn rows_stay_sorted_by_name_with_contiguous_serials() {
    let mut roster = Roster::new(Vec::new()).expect("empty roster");
    roster.push_row(student("Chidi"));
    roster.push_row(student("Amara"));
    roster.push_row(student("Bola"));

    let names: Vec<&str> = roster.rows().iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["Amara", "Bola", "Chidi"]);
    let serials: Vec<u32> = roster.rows().iter().map(|row| row.serial).collect();
    assert_eq!(serials, [1, 2, 3]);
}

#[test]
fn dedupe_keeps_first_registration() {
    let mut roster = Roster::new(Vec::new()).expect("empty roster");
    roster.push_row(student("Amara"));
    roster.push_row(student("Bola"));
    roster.push_row(student("Amara"));

    let removed = roster.dedupe();
    assert_eq!(removed, 1);
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.rows()[0].serial, 1);
    assert_eq!(roster.rows()[1].serial, 2);
}

#[test]
fn duplicate_date_column_is_rejected() {
    let date = ClassDate::parse("03/02/2025").expect("parse date");
    let err = Roster::new(vec![date, date]).expect_err("duplicate column");
    assert!(matches!(err, RollcallError::DuplicateDateColumn(_)));

    let mut roster = Roster::new(vec![date]).expect("roster");
    assert!(matches!(
        roster.add_class_date(date),
        Err(RollcallError::DuplicateDateColumn(_))
    ));
}

#[test]
fn set_status_requires_a_declared_date_column() {
    let declared = ClassDate::parse("03/02/2025").expect("parse date");
    let undeclared = ClassDate::parse("04/02/2025").expect("parse date");
    let mut roster = Roster::new(vec![declared]).expect("roster");
    roster.push_row(student("Amara"));

    roster
        .set_status(0, &declared, AttendanceStatus::Present)
        .expect("declared column");
    assert_eq!(roster.status(0, &declared), AttendanceStatus::Present);
    assert!(matches!(
        roster.set_status(0, &undeclared, AttendanceStatus::Present),
        Err(RollcallError::UnknownDateColumn(_))
    ));
}

#[test]
fn class_date_renders_day_first() {
    let date = ClassDate::parse("09/01/2025").expect("parse date");
    assert_eq!(date.to_string(), "09/01/2025");
    assert!(ClassDate::parse("2025-01-09").is_err());
}

#[test]
fn snapshot_ids_are_unique_and_path_safe() {
    let a = SnapshotId::generate();
    let b = SnapshotId::generate();
    assert_ne!(a, b);
    assert!(!a.as_str().contains('/'));
    assert!(SnapshotId::parse("  ").is_err());
    assert!(SnapshotId::parse("../escape").is_err());
}

#[test]
fn digest_round_trips_through_hex() {
    let digest = ContentDigest::from_bytes([7u8; 32]);
    let round = ContentDigest::from_hex(&digest.to_hex()).expect("parse hex");
    assert_eq!(round, digest);
    assert!(ContentDigest::from_hex("abcd").is_err());
}

#[test]
fn roster_serializes() {
    let date = ClassDate::parse("03/02/2025").expect("parse date");
    let mut roster = Roster::new(vec![date]).expect("roster");
    roster.push_row(student("Amara"));
    roster
        .set_status(0, &date, AttendanceStatus::Excused)
        .expect("set status");

    let json = serde_json::to_string(&roster).expect("serialize roster");
    let round: Roster = serde_json::from_str(&json).expect("deserialize roster");
    assert_eq!(round, roster);
}
