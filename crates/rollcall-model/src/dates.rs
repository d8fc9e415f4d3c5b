use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::RollcallError;

/// One class date, always rendered `dd/mm/yyyy` — the format used for the
/// roster's dynamic column headers and the class-dates file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassDate(NaiveDate);

pub const CLASS_DATE_FORMAT: &str = "%d/%m/%Y";

impl ClassDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse the canonical day-first form.
    pub fn parse(value: &str) -> Result<Self, RollcallError> {
        NaiveDate::parse_from_str(value.trim(), CLASS_DATE_FORMAT)
            .map(Self)
            .map_err(|_| RollcallError::InvalidDate(value.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl fmt::Display for ClassDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CLASS_DATE_FORMAT))
    }
}

impl serde::Serialize for ClassDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for ClassDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
