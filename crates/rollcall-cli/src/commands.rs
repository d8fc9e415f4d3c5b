//! Command implementations. Each state-changing command follows the same
//! shape: load, apply, save the roster, then record the action in the
//! command log so it becomes a recovery point.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use rollcall_core::{
    DateRegistry, bulk_fill_all, clean_registration, ensure_date_columns, record_absent,
    record_cds, record_excused, record_present,
};
use rollcall_ingest::{read_cds_signal, read_class_dates, read_roster, read_signal, read_table};
use rollcall_model::{AttendanceStatus, ClassDate, Roster};
use rollcall_store::{CohortPaths, CommandLog, RollbackEngine, SnapshotStore, save_roster};

use crate::cli::{CdsArgs, CleanArgs, FillArgs, MarkArgs, MarkStatusArg, RollbackArgs};
use crate::render::{print_recovery_points, print_report, print_roster};

pub fn run_clean(paths: &CohortPaths, args: &CleanArgs) -> Result<()> {
    let span = info_span!("clean", cohort = %args.cohort);
    let _guard = span.enter();
    paths.ensure_layout().context("prepare cohort directory")?;

    let (headers, rows) = read_table(&args.registration)
        .with_context(|| format!("read registration export {}", args.registration.display()))?;
    let (roster, report) = clean_registration(&headers, &rows, &args.cohort)?;
    println!(
        "Cleaned {} registrations: kept {}, removed {} duplicate(s).",
        rows.len(),
        report.kept,
        report.removed_duplicates
    );

    commit(
        paths,
        &roster,
        None,
        &format!("cleaned registration data from {}", args.registration.display()),
    )
}

pub fn run_status(paths: &CohortPaths) -> Result<()> {
    let (roster, _) = load_state(paths)?;
    print_roster(&roster);
    Ok(())
}

pub fn run_mark(paths: &CohortPaths, args: &MarkArgs) -> Result<()> {
    let date = ClassDate::parse(&args.date).context("parse --date")?;
    let status = AttendanceStatus::from(args.status);
    let span = info_span!("mark", date = %date, status = %status);
    let _guard = span.enter();

    let signal = read_signal(&args.signal)
        .with_context(|| format!("read signal {}", args.signal.display()))?;
    let (mut roster, registry) = load_state(paths)?;
    let report = match args.status {
        MarkStatusArg::Present => record_present(&mut roster, &signal, &date)?,
        MarkStatusArg::Absent => record_absent(&mut roster, &signal, &date)?,
        MarkStatusArg::Excused => record_excused(&mut roster, &signal, &date)?,
    };
    print_report(&report);

    commit(
        paths,
        &roster,
        Some(registry.week_number(&date)),
        &format!("marked {status} for {date} from {}", args.signal.display()),
    )
}

pub fn run_fill(paths: &CohortPaths, args: &FillArgs) -> Result<()> {
    let date = ClassDate::parse(&args.date).context("parse --date")?;
    let status = AttendanceStatus::from(args.status);
    let span = info_span!("fill", date = %date, status = %status);
    let _guard = span.enter();

    let (mut roster, registry) = load_state(paths)?;
    bulk_fill_all(&mut roster, &date, status)?;
    println!("Filled {} row(s) for {date} with {status}.", roster.len());

    commit(
        paths,
        &roster,
        Some(registry.week_number(&date)),
        &format!("bulk fill {date} with {status}"),
    )
}

pub fn run_cds(paths: &CohortPaths, args: &CdsArgs) -> Result<()> {
    let signal = read_cds_signal(&args.signal)
        .with_context(|| format!("read CDS assignments {}", args.signal.display()))?;
    let (mut roster, _) = load_state(paths)?;
    let report = record_cds(&mut roster, &signal)?;
    print_report(&report);

    commit(
        paths,
        &roster,
        None,
        &format!("applied CDS weekdays from {}", args.signal.display()),
    )
}

pub fn run_log(paths: &CohortPaths) -> Result<()> {
    let log = CommandLog::open(paths)?;
    if log.is_empty() {
        println!("Command log is empty; nothing to roll back to.");
        return Ok(());
    }
    let snapshots = SnapshotStore::new(paths);
    let engine = RollbackEngine::new(&log, &snapshots);
    print_recovery_points(engine.recovery_points());
    Ok(())
}

pub fn run_rollback(paths: &CohortPaths, args: &RollbackArgs) -> Result<()> {
    let log = CommandLog::open(paths)?;
    let snapshots = SnapshotStore::new(paths);
    let engine = RollbackEngine::new(&log, &snapshots);
    let entry = engine.rollback(args.index, &paths.canonical_roster())?;
    println!(
        "Restored roster to point {} ({}): {}",
        args.index, entry.timestamp, entry.description
    );
    Ok(())
}

pub fn run_new_cohort(paths: &CohortPaths) -> Result<()> {
    let snapshots = SnapshotStore::new(paths);
    let mut log = CommandLog::open(paths)?;
    log.reset(&snapshots)?;
    println!("Started a new cohort: command log and snapshots cleared.");
    Ok(())
}

/// Load the canonical roster and the class-date registry, making sure every
/// registered date has a roster column.
fn load_state(paths: &CohortPaths) -> Result<(Roster, DateRegistry)> {
    let canonical = paths.canonical_roster();
    let mut roster = read_roster(&canonical)
        .with_context(|| format!("load roster {}", canonical.display()))?;
    let dates_file = paths.class_dates();
    let registry = if dates_file.exists() {
        DateRegistry::new(read_class_dates(&dates_file)?)
    } else {
        DateRegistry::new(roster.class_dates().to_vec())
    };
    let added = ensure_date_columns(&mut roster, registry.dates())?;
    if added > 0 {
        info!(added, "added class-date columns from the registry");
    }
    Ok((roster, registry))
}

/// Save the roster, then record the action as a recovery point. The log
/// entry is only written after the save succeeds, so the log never points at
/// a state that was not persisted.
fn commit(paths: &CohortPaths, roster: &Roster, week: Option<u32>, description: &str) -> Result<()> {
    save_roster(paths, roster, week).context("save roster")?;
    let snapshots = SnapshotStore::new(paths);
    let mut log = CommandLog::open(paths)?;
    log.record(description, &snapshots, &paths.canonical_roster())?;
    Ok(())
}
