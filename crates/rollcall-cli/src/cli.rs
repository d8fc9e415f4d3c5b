//! CLI argument definitions for the rollcall manager.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use rollcall_model::AttendanceStatus;

#[derive(Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Cohort rollcall manager - roster, attendance, and recovery",
    long_about = "Track a training cohort's roster and attendance in CSV files.\n\n\
                  Every state-changing command snapshots the roster and appends to the\n\
                  command log, so any earlier state can be restored with `rollback`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Cohort directory holding the roster, log, and snapshots.
    #[arg(long = "cohort-dir", value_name = "DIR", default_value = ".", global = true)]
    pub cohort_dir: PathBuf,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a fresh roster from a raw registration export.
    Clean(CleanArgs),

    /// Show the roster with per-student attendance counts.
    Status,

    /// Apply an attendance signal (form export) for one class date.
    Mark(MarkArgs),

    /// Fill a whole class-date column, resolving conflicts by precedence.
    Fill(FillArgs),

    /// Apply per-student CDS weekdays across all matching class dates.
    Cds(CdsArgs),

    /// Show the command log as a numbered list of recovery points.
    Log,

    /// Restore the roster to a recorded point in history.
    Rollback(RollbackArgs),

    /// Start a new cohort: clear the command log and all snapshots.
    NewCohort,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Registration export CSV (Timestamp, Name, Gender, Phone Number, Email).
    #[arg(value_name = "REGISTRATION_CSV")]
    pub registration: PathBuf,

    /// Cohort identifier stamped onto every student row.
    #[arg(long = "cohort")]
    pub cohort: String,
}

#[derive(Parser)]
pub struct MarkArgs {
    /// Signal CSV (Name, Date, Timestamp).
    #[arg(value_name = "SIGNAL_CSV")]
    pub signal: PathBuf,

    /// Class date the signal is for, dd/mm/yyyy.
    #[arg(long = "date", value_name = "DATE")]
    pub date: String,

    /// Status to set for the students named in the signal.
    #[arg(long = "status", value_enum)]
    pub status: MarkStatusArg,
}

#[derive(Parser)]
pub struct FillArgs {
    /// Class date to fill, dd/mm/yyyy.
    #[arg(long = "date", value_name = "DATE")]
    pub date: String,

    /// Status to fill the column with.
    #[arg(long = "status", value_enum)]
    pub status: FillStatusArg,
}

#[derive(Parser)]
pub struct CdsArgs {
    /// CDS assignment CSV (Name, CDS).
    #[arg(value_name = "CDS_CSV")]
    pub signal: PathBuf,
}

#[derive(Parser)]
pub struct RollbackArgs {
    /// 1-based index into the command log (1 = oldest; see `rollcall log`).
    #[arg(value_name = "INDEX")]
    pub index: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MarkStatusArg {
    Present,
    Absent,
    Excused,
}

impl From<MarkStatusArg> for AttendanceStatus {
    fn from(value: MarkStatusArg) -> Self {
        match value {
            MarkStatusArg::Present => AttendanceStatus::Present,
            MarkStatusArg::Absent => AttendanceStatus::Absent,
            MarkStatusArg::Excused => AttendanceStatus::Excused,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FillStatusArg {
    Present,
    Absent,
    Excused,
    NoClass,
    Cds,
}

impl From<FillStatusArg> for AttendanceStatus {
    fn from(value: FillStatusArg) -> Self {
        match value {
            FillStatusArg::Present => AttendanceStatus::Present,
            FillStatusArg::Absent => AttendanceStatus::Absent,
            FillStatusArg::Excused => AttendanceStatus::Excused,
            FillStatusArg::NoClass => AttendanceStatus::NoClass,
            FillStatusArg::Cds => AttendanceStatus::Cds,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
