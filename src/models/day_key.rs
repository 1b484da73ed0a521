use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MillcalError;

/// Calendar-day bucket key, always rendered as ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn parse(s: &str) -> Result<Self, MillcalError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| MillcalError::validation(format!("Invalid date '{s}', expected YYYY-MM-DD")))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Fails when the result falls outside the supported calendar range.
    pub fn plus_days(&self, days: i64) -> Result<Self, MillcalError> {
        self.0
            .checked_add_signed(Duration::days(days))
            .map(Self)
            .ok_or_else(|| {
                MillcalError::validation(format!("Date out of range: {self} plus {days} days"))
            })
    }

    /// `M/D/YYYY`, the short form used in user-facing confirmations.
    pub fn short_display(&self) -> String {
        format!("{}/{}/{}", self.0.month(), self.0.day(), self.0.year())
    }

    pub fn weekday_name(&self) -> String {
        self.0.format("%a").to_string()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DayKey::parse(&s).map_err(serde::de::Error::custom)
    }
}
