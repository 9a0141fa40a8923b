//! Provider working-hours model.
//!
//! A [`WeeklySchedule`] holds one [`DaySchedule`] per weekday plus the slot
//! length used to cut each working day into bookable slots.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::wall_time::WallTime;

/// Slot length used when a schedule does not specify one.
pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 60;

fn default_slot_duration() -> u32 {
    DEFAULT_SLOT_DURATION_MINUTES
}

/// Working hours for a single weekday.
///
/// `break_start` and `break_end` must either both be set or both be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Whether the provider works on this day.
    pub enabled: bool,
    /// Start of the working day.
    pub start_time: WallTime,
    /// End of the working day; no slot runs past it.
    pub end_time: WallTime,
    /// Start of the break window (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<WallTime>,
    /// End of the break window (exclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<WallTime>,
}

impl DaySchedule {
    /// An enabled day without a break.
    pub fn open(start_time: WallTime, end_time: WallTime) -> Self {
        Self {
            enabled: true,
            start_time,
            end_time,
            break_start: None,
            break_end: None,
        }
    }

    /// A disabled day. The hours are kept so the provider can re-enable the
    /// day without re-entering them.
    pub fn closed(start_time: WallTime, end_time: WallTime) -> Self {
        Self {
            enabled: false,
            ..Self::open(start_time, end_time)
        }
    }

    /// Returns a copy of this day with a break window.
    pub fn with_break(mut self, break_start: WallTime, break_end: WallTime) -> Self {
        self.break_start = Some(break_start);
        self.break_end = Some(break_end);
        self
    }

    /// Returns the break window when both ends are set.
    pub fn break_window(&self) -> Option<(WallTime, WallTime)> {
        match (self.break_start, self.break_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    fn validate(&self, day: &str) -> EngineResult<()> {
        let invalid = |field: &str, message: &str| EngineError::InvalidSchedule {
            field: format!("{}.{}", day, field),
            message: message.to_string(),
        };

        match (self.break_start, self.break_end) {
            (Some(_), None) => {
                return Err(invalid("breakEnd", "breakEnd is required when breakStart is set"));
            }
            (None, Some(_)) => {
                return Err(invalid("breakStart", "breakStart is required when breakEnd is set"));
            }
            _ => {}
        }

        if !self.enabled {
            return Ok(());
        }

        if self.start_time >= self.end_time {
            return Err(invalid("endTime", "endTime must be after startTime"));
        }

        if let Some((break_start, break_end)) = self.break_window() {
            if break_start < self.start_time {
                return Err(invalid("breakStart", "break cannot start before the working day"));
            }
            if break_start >= break_end {
                return Err(invalid("breakEnd", "breakEnd must be after breakStart"));
            }
            if break_end > self.end_time {
                return Err(invalid("breakEnd", "break cannot end after the working day"));
            }
        }

        Ok(())
    }
}

/// A provider's recurring weekly working hours.
///
/// # Example
///
/// ```
/// use practice_engine::models::WeeklySchedule;
/// use chrono::Weekday;
///
/// let schedule = WeeklySchedule::default();
/// assert!(schedule.day(Weekday::Mon).enabled);
/// assert!(!schedule.day(Weekday::Sun).enabled);
/// assert_eq!(schedule.slot_duration_minutes, 60);
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySchedule {
    /// Length of each bookable slot in minutes.
    #[serde(default = "default_slot_duration")]
    pub slot_duration_minutes: u32,
    /// Monday hours.
    pub monday: DaySchedule,
    /// Tuesday hours.
    pub tuesday: DaySchedule,
    /// Wednesday hours.
    pub wednesday: DaySchedule,
    /// Thursday hours.
    pub thursday: DaySchedule,
    /// Friday hours.
    pub friday: DaySchedule,
    /// Saturday hours.
    pub saturday: DaySchedule,
    /// Sunday hours.
    pub sunday: DaySchedule,
}

impl Default for WeeklySchedule {
    /// Monday to Friday 09:00-17:00, weekend off, 60 minute slots.
    fn default() -> Self {
        let nine = WallTime::from_hm(9, 0).expect("Valid opening time");
        let five = WallTime::from_hm(17, 0).expect("Valid closing time");
        let weekday = DaySchedule::open(nine, five);
        let weekend = DaySchedule::closed(nine, five);
        Self {
            slot_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            monday: weekday.clone(),
            tuesday: weekday.clone(),
            wednesday: weekday.clone(),
            thursday: weekday.clone(),
            friday: weekday,
            saturday: weekend.clone(),
            sunday: weekend,
        }
    }
}

impl WeeklySchedule {
    /// Returns the hours for the given weekday.
    pub fn day(&self, weekday: Weekday) -> &DaySchedule {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// Returns mutable hours for the given weekday.
    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DaySchedule {
        match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        }
    }

    /// Checks the schedule invariants and reports the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSchedule`] when:
    /// - the slot duration is zero or longer than a day
    /// - an enabled day does not start before it ends
    /// - only one end of a break window is set
    /// - a break window is empty or falls outside its working day
    pub fn validate(&self) -> EngineResult<()> {
        if self.slot_duration_minutes == 0 || self.slot_duration_minutes > 24 * 60 {
            return Err(EngineError::InvalidSchedule {
                field: "slotDurationMinutes".to_string(),
                message: "must be between 1 and 1440 minutes".to_string(),
            });
        }

        const DAYS: [(Weekday, &str); 7] = [
            (Weekday::Mon, "monday"),
            (Weekday::Tue, "tuesday"),
            (Weekday::Wed, "wednesday"),
            (Weekday::Thu, "thursday"),
            (Weekday::Fri, "friday"),
            (Weekday::Sat, "saturday"),
            (Weekday::Sun, "sunday"),
        ];
        for (weekday, name) in DAYS {
            self.day(weekday).validate(name)?;
        }

        Ok(())
    }
}
