//! Class-date registry and signal timestamp matching.
//!
//! Form exports do not agree on a date order: most arrive day-first, some
//! month-first depending on the export locale. Matching therefore tries
//! day-first across the whole signal and only re-reads the signal month-first
//! when the day-first pass matched nothing. The fallback is per signal, not
//! per row, so the result cannot mix the two readings.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use rollcall_ingest::{AttendanceSignal, SignalRow};
use rollcall_model::ClassDate;

const DAY_FIRST_FORMATS: [&str; 3] = ["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M", "%d/%m/%Y"];
const MONTH_FIRST_FORMATS: [&str; 3] = ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M", "%m/%d/%Y"];

fn parse_with(formats: &[&str], raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for format in formats {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(stamp.date());
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

pub fn parse_timestamp_day_first(raw: &str) -> Option<NaiveDate> {
    parse_with(&DAY_FIRST_FORMATS, raw)
}

pub fn parse_timestamp_month_first(raw: &str) -> Option<NaiveDate> {
    parse_with(&MONTH_FIRST_FORMATS, raw)
}

/// Rows of `signal` whose timestamp falls on `date`, day-first, falling back
/// to month-first when day-first matches zero rows.
pub fn rows_matching_date<'a>(signal: &'a AttendanceSignal, date: &ClassDate) -> Vec<&'a SignalRow> {
    let target = date.date();
    let day_first: Vec<&SignalRow> = signal
        .rows
        .iter()
        .filter(|row| parse_timestamp_day_first(&row.timestamp) == Some(target))
        .collect();
    if !day_first.is_empty() {
        return day_first;
    }
    signal
        .rows
        .iter()
        .filter(|row| parse_timestamp_month_first(&row.timestamp) == Some(target))
        .collect()
}

/// Ordered class dates with week bucketing for per-week save files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRegistry {
    dates: Vec<ClassDate>,
}

impl DateRegistry {
    pub fn new(dates: Vec<ClassDate>) -> Self {
        Self { dates }
    }

    pub fn dates(&self) -> &[ClassDate] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates_on_weekday(&self, weekday: Weekday) -> Vec<ClassDate> {
        self.dates
            .iter()
            .filter(|date| date.weekday() == weekday)
            .copied()
            .collect()
    }

    /// 1-based week number of `date`, counted in calendar weeks (Monday
    /// anchored) from the cohort's first class date.
    pub fn week_number(&self, date: &ClassDate) -> u32 {
        let Some(first) = self.dates.first() else {
            return 1;
        };
        let anchor = week_anchor(first.date());
        let days = (week_anchor(date.date()) - anchor).num_days();
        if days < 0 { 1 } else { (days / 7 + 1) as u32 }
    }

    /// Distinct week numbers spanned by the cohort, in order.
    pub fn week_numbers(&self) -> Vec<u32> {
        let mut weeks: Vec<u32> = self.dates.iter().map(|date| self.week_number(date)).collect();
        weeks.dedup();
        weeks
    }
}

fn week_anchor(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}
