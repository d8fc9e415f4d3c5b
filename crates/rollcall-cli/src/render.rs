//! Terminal table rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use rollcall_core::ReconcileReport;
use rollcall_model::{AttendanceStatus, LogEntry, Roster};

pub fn print_roster(roster: &Roster) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("S/N"),
        header_cell("Name"),
        header_cell("Cohort"),
        header_cell("Present"),
        header_cell("Absent"),
        header_cell("Excused"),
        header_cell("No Class"),
        header_cell("CDS"),
    ]);
    apply_table_style(&mut table);
    for column in 3..8 {
        if let Some(column) = table.column_mut(column) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    for row in roster.rows() {
        let count = |status: AttendanceStatus| {
            roster
                .class_dates()
                .iter()
                .filter(|date| row.status(date) == status)
                .count()
        };
        table.add_row(vec![
            Cell::new(row.serial),
            Cell::new(&row.name),
            Cell::new(&row.cohort),
            Cell::new(count(AttendanceStatus::Present)),
            Cell::new(count(AttendanceStatus::Absent)),
            Cell::new(count(AttendanceStatus::Excused)),
            Cell::new(count(AttendanceStatus::NoClass)),
            Cell::new(count(AttendanceStatus::Cds)),
        ]);
    }
    println!(
        "{} student(s), {} class date(s)",
        roster.len(),
        roster.class_dates().len()
    );
    println!("{table}");
}

pub fn print_recovery_points<'a>(points: impl Iterator<Item = (usize, &'a LogEntry)>) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("When"),
        header_cell("Command"),
        header_cell("Snapshot"),
    ]);
    apply_table_style(&mut table);
    for (index, entry) in points {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(entry.timestamp),
            Cell::new(&entry.description),
            Cell::new(entry.snapshot.as_str()),
        ]);
    }
    println!("{table}");
    println!("Run `rollcall rollback <#>` to restore the roster to that point.");
}

pub fn print_report(report: &ReconcileReport) {
    println!(
        "Matched {} signal row(s); updated {} cell(s).",
        report.matched, report.updated
    );
    if !report.unmatched.is_empty() {
        println!(
            "No registered student for: {}",
            report.unmatched.join(", ")
        );
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
