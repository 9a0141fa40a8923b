//! Wall-clock time of day at minute resolution.
//!
//! Schedules and bookings both express times as a time of day without a
//! date or zone. [`WallTime`] is the single canonical representation; it
//! accepts both 24-hour (`"14:30"`) and 12-hour (`"02:30 PM"`) input so that
//! booking times written in either form compare equal.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EngineError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Input formats accepted by [`WallTime::from_str`], tried in order.
const ACCEPTED_FORMATS: [&str; 4] = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"];

/// A time of day with minute resolution.
///
/// # Example
///
/// ```
/// use practice_engine::models::WallTime;
///
/// let twelve_hour: WallTime = "10:00 AM".parse().unwrap();
/// let twenty_four_hour: WallTime = "10:00".parse().unwrap();
/// assert_eq!(twelve_hour, twenty_four_hour);
/// assert_eq!(twelve_hour.to_12h(), "10:00 AM");
/// assert_eq!("14:30".parse::<WallTime>().unwrap().to_12h(), "02:30 PM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(NaiveTime);

impl WallTime {
    /// Creates a time from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Creates a time from minutes since midnight. Returns `None` for values
    /// at or past the end of the day.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        Self::from_hm(minutes / 60, minutes % 60)
    }

    /// Returns the number of minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Returns the underlying chrono time.
    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }

    /// Canonical 24-hour form, e.g. `"09:00"`.
    pub fn to_24h(&self) -> String {
        self.0.format("%H:%M").to_string()
    }

    /// Display 12-hour form, e.g. `"09:00 AM"`.
    pub fn to_12h(&self) -> String {
        self.0.format("%I:%M %p").to_string()
    }
}

impl From<NaiveTime> for WallTime {
    fn from(time: NaiveTime) -> Self {
        // Seconds are dropped; slots never start mid-minute.
        Self::from_hm(time.hour(), time.minute()).unwrap_or(Self(time))
    }
}

impl FromStr for WallTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ACCEPTED_FORMATS
            .iter()
            .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
            .map(WallTime::from)
            .ok_or_else(|| EngineError::InvalidTime {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for WallTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_24h())
    }
}

impl<'de> Deserialize<'de> for WallTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> WallTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_24_hour() {
        assert_eq!(t("09:00").minutes_since_midnight(), 540);
        assert_eq!(t("23:59").minutes_since_midnight(), 1439);
        assert_eq!(t("00:00").minutes_since_midnight(), 0);
    }

    #[test]
    fn test_parse_with_seconds_truncates_to_minute() {
        assert_eq!(t("09:15:42"), t("09:15"));
    }

    #[test]
    fn test_parse_12_hour_forms() {
        assert_eq!(t("10:00 AM"), t("10:00"));
        assert_eq!(t("12:00 PM"), t("12:00"));
        assert_eq!(t("12:30 AM"), t("00:30"));
        assert_eq!(t("04:45 PM"), t("16:45"));
        assert_eq!(t("04:45PM"), t("16:45"));
        assert_eq!(t("  09:00  "), t("09:00"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "noon", "25:00", "09:60", "13:00 PM"] {
            let result = bad.parse::<WallTime>();
            assert!(result.is_err(), "expected '{}' to be rejected", bad);
            match result {
                Err(EngineError::InvalidTime { value }) => assert_eq!(value, bad),
                _ => panic!("Expected InvalidTime error"),
            }
        }
    }

    #[test]
    fn test_display_formats() {
        let time = t("14:05");
        assert_eq!(time.to_24h(), "14:05");
        assert_eq!(time.to_12h(), "02:05 PM");
        assert_eq!(time.to_string(), "14:05");
        assert_eq!(t("00:00").to_12h(), "12:00 AM");
    }

    #[test]
    fn test_from_minutes_bounds() {
        assert_eq!(WallTime::from_minutes(0), Some(t("00:00")));
        assert_eq!(WallTime::from_minutes(1439), Some(t("23:59")));
        assert_eq!(WallTime::from_minutes(1440), None);
    }

    #[test]
    fn test_serializes_as_24_hour_string() {
        let json = serde_json::to_string(&t("07:30 PM")).unwrap();
        assert_eq!(json, "\"19:30\"");

        let parsed: WallTime = serde_json::from_str("\"07:30 PM\"").unwrap();
        assert_eq!(parsed, t("19:30"));
    }

    #[test]
    fn test_deserialize_invalid_reports_value() {
        let err = serde_json::from_str::<WallTime>("\"later\"").unwrap_err();
        assert!(err.to_string().contains("later"));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(t("08:59") < t("09:00"));
        assert!(t("11:00 AM") < t("01:00 PM"));
    }
}
