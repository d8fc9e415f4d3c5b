//! Saving the live roster: canonical file plus the per-week copy.

use tracing::debug;

use rollcall_ingest::write_roster;
use rollcall_model::{Result, Roster};

use crate::paths::CohortPaths;

/// Persist `roster` to the canonical file, and to the per-week file when a
/// week number applies (cohorts with no class dates have none).
pub fn save_roster(paths: &CohortPaths, roster: &Roster, week: Option<u32>) -> Result<()> {
    let canonical = paths.canonical_roster();
    write_roster(&canonical, roster)?;
    if let Some(week) = week {
        let weekly = paths.week_roster(week);
        write_roster(&weekly, roster)?;
        debug!(week, path = %weekly.display(), "wrote weekly copy");
    }
    Ok(())
}
