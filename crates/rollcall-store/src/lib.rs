pub mod command_log;
pub mod paths;
pub mod save;
pub mod snapshot;

pub use command_log::{CommandLog, RollbackEngine};
pub use paths::CohortPaths;
pub use save::save_roster;
pub use snapshot::SnapshotStore;
