//! Availability engine output types.

use serde::Serialize;

use super::wall_time::WallTime;

/// A bookable slot.
///
/// Only free slots are ever produced, so `available` is always `true`; the
/// field is kept for clients that render it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableSlot {
    /// Display form, e.g. `"09:00 AM"`.
    #[serde(rename = "time12h")]
    pub time_12h: String,
    /// Canonical form, e.g. `"09:00"`.
    #[serde(rename = "time24h")]
    pub time_24h: String,
    /// Always `true`.
    pub available: bool,
    #[serde(skip)]
    start: WallTime,
}

impl AvailableSlot {
    /// Creates a free slot starting at `start`.
    pub fn new(start: WallTime) -> Self {
        Self {
            time_12h: start.to_12h(),
            time_24h: start.to_24h(),
            available: true,
            start,
        }
    }

    /// The slot start time.
    pub fn start(&self) -> WallTime {
        self.start
    }
}

/// Why a date has no slots at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The date is before today.
    PastDate,
    /// The provider does not work on this weekday.
    DayOff,
    /// Every slot is booked, on break, or already over.
    FullyBooked,
}

impl UnavailableReason {
    /// Human-readable explanation for clients.
    pub fn message(&self) -> &'static str {
        match self {
            UnavailableReason::PastDate => "Cannot book appointments in the past",
            UnavailableReason::DayOff => "Provider is not available on this day",
            UnavailableReason::FullyBooked => "No available slots for this date",
        }
    }
}

/// The availability engine result for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    /// Free slots in chronological order.
    pub slots: Vec<AvailableSlot>,
    /// The slot length used to generate `slots`.
    pub slot_duration_minutes: u32,
    /// Set when `slots` is empty.
    pub reason: Option<UnavailableReason>,
}

impl Availability {
    /// Whether any slot can be booked.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a slot starting at `time` is offered.
    pub fn offers(&self, time: WallTime) -> bool {
        self.slots.iter().any(|slot| slot.start() == time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_formats_both_forms() {
        let slot = AvailableSlot::new("13:30".parse().unwrap());
        assert_eq!(slot.time_12h, "01:30 PM");
        assert_eq!(slot.time_24h, "13:30");
        assert!(slot.available);
    }

    #[test]
    fn test_slot_serialization_hides_start() {
        let slot = AvailableSlot::new("09:00".parse().unwrap());
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["time12h"], "09:00 AM");
        assert_eq!(json["time24h"], "09:00");
        assert_eq!(json["available"], true);
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_offers_matches_start_time() {
        let availability = Availability {
            slots: vec![AvailableSlot::new("09:00".parse().unwrap())],
            slot_duration_minutes: 60,
            reason: None,
        };
        assert!(availability.offers("09:00 AM".parse().unwrap()));
        assert!(!availability.offers("10:00".parse().unwrap()));
    }
}
