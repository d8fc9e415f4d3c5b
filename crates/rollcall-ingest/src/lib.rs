pub mod class_dates;
pub mod log_csv;
pub mod normalize;
pub mod roster_csv;
pub mod signal;
pub mod table;

pub use class_dates::{read_class_dates, write_class_dates};
pub use log_csv::{LOG_COLUMNS, read_log, write_log_atomic};
pub use normalize::{find_column, normalize_cell, normalize_header};
pub use roster_csv::{read_roster, write_roster};
pub use table::read_table;
pub use signal::{
    AttendanceSignal, CDS_COLUMNS, CdsRow, CdsSignal, SIGNAL_COLUMNS, SignalRow, read_cds_signal,
    read_signal,
};
