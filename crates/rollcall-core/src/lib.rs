pub mod clean;
pub mod dates;
pub mod reconcile;

pub use clean::{CleanReport, REGISTRATION_COLUMNS, clean_registration};
pub use dates::{
    DateRegistry, parse_timestamp_day_first, parse_timestamp_month_first, rows_matching_date,
};
pub use reconcile::{
    ReconcileReport, bulk_fill_all, ensure_date_columns, record_absent, record_cds,
    record_excused, record_present, resolve_bulk,
};
