pub mod dates;
pub mod error;
pub mod ids;
pub mod log;
pub mod roster;
pub mod status;

pub use dates::{CLASS_DATE_FORMAT, ClassDate};
pub use error::{Result, RollcallError};
pub use ids::{ContentDigest, SnapshotId};
pub use log::{LOG_TIMESTAMP_FORMAT, LogEntry};
pub use roster::{IDENTITY_COLUMNS, Roster, StudentRow};
pub use status::AttendanceStatus;
