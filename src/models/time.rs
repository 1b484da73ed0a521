use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_TIME: &str = "09:00 AM";

/// Time of day as shown on the board (`"hh:mm AM/PM"`) together with its
/// minute-of-day, which is what items are ordered by.
///
/// Text that is not a recognizable time is kept verbatim and orders after
/// every parsed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTime {
    display: String,
    minute_of_day: Option<u16>,
}

impl ScheduledTime {
    /// Accepts `hh:mm AM|PM` (12-hour) and `HH:MM` (24-hour).
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match parse_minutes(trimmed) {
            Some(minutes) => Self::from_minutes(minutes),
            None => Self {
                display: trimmed.to_string(),
                minute_of_day: None,
            },
        }
    }

    pub fn from_minutes(minutes: u16) -> Self {
        let minutes = minutes % (24 * 60);
        let hour = minutes / 60;
        let minute = minutes % 60;
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        Self {
            display: format!("{hour12:02}:{minute:02} {suffix}"),
            minute_of_day: Some(minutes),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn minute_of_day(&self) -> Option<u16> {
        self.minute_of_day
    }

    /// Parsed times first in chronological order, unparsed text last.
    pub fn sort_key(&self) -> (bool, u16) {
        (self.minute_of_day.is_none(), self.minute_of_day.unwrap_or(0))
    }
}

impl Default for ScheduledTime {
    fn default() -> Self {
        Self::parse(DEFAULT_TIME)
    }
}

fn parse_minutes(text: &str) -> Option<u16> {
    let upper = text.to_ascii_uppercase();
    let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let (h, m) = clock.split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    let hour: u16 = h.parse().ok()?;
    let minute: u16 = m.parse().ok()?;
    if minute > 59 {
        return None;
    }

    match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            let base = hour % 12;
            Some((base + if pm { 12 } else { 0 }) * 60 + minute)
        }
        None => {
            if hour > 23 {
                return None;
            }
            Some(hour * 60 + minute)
        }
    }
}

impl fmt::Display for ScheduledTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl Serialize for ScheduledTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for ScheduledTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ScheduledTime::parse(&s))
    }
}
