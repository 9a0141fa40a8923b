//! Bookable slot calculation.
//!
//! This module turns a provider's weekly schedule and existing bookings into
//! the list of slots a client can still book on a given date.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::models::{
    Availability, AvailableSlot, BookingRecord, DaySchedule, UnavailableReason, WallTime,
    WeeklySchedule,
};

/// Computes the free slots of one date.
///
/// # Arguments
///
/// * `schedule` - The provider's weekly working hours
/// * `target_date` - The date a client wants to book
/// * `existing_bookings` - Bookings of the provider; other dates and
///   cancelled bookings are ignored
/// * `now` - Current wall-clock time in the provider's zone
///
/// # Returns
///
/// An [`Availability`] with the free slots in chronological order. A slot
/// is offered when it fits entirely before the end of the working day, does
/// not start inside the break window, is not already booked and, on the
/// current date, starts strictly after `now`.
///
/// The schedule is assumed to be validated. An invalid one never panics: a
/// zero slot duration or an inverted day simply produces no slots.
///
/// # Example
///
/// ```
/// use practice_engine::models::WeeklySchedule;
/// use practice_engine::scheduling::compute_available_slots;
/// use chrono::NaiveDate;
///
/// let schedule = WeeklySchedule::default();
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let now = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
///
/// let availability = compute_available_slots(&schedule, monday, &[], now);
/// assert_eq!(availability.slots.len(), 8);
/// assert_eq!(availability.slots[0].time_12h, "09:00 AM");
/// assert_eq!(availability.slots[7].time_24h, "16:00");
/// ```
pub fn compute_available_slots(
    schedule: &WeeklySchedule,
    target_date: NaiveDate,
    existing_bookings: &[BookingRecord],
    now: NaiveDateTime,
) -> Availability {
    let slot_duration_minutes = schedule.slot_duration_minutes;
    let unavailable = |reason| Availability {
        slots: Vec::new(),
        slot_duration_minutes,
        reason: Some(reason),
    };

    let today = now.date();
    if target_date < today {
        return unavailable(UnavailableReason::PastDate);
    }

    let day = schedule.day(target_date.weekday());
    if !day.enabled {
        return unavailable(UnavailableReason::DayOff);
    }

    let occupied = occupied_times(target_date, existing_bookings);
    let break_window = day.break_window();

    let slots: Vec<AvailableSlot> = slot_starts(day, slot_duration_minutes)
        .into_iter()
        .filter(|start| {
            !break_window.is_some_and(|(break_start, break_end)| {
                break_start <= *start && *start < break_end
            })
        })
        .filter(|start| !occupied.contains(start))
        .filter(|start| target_date != today || target_date.and_time(start.as_naive()) > now)
        .map(AvailableSlot::new)
        .collect();

    let reason = slots.is_empty().then_some(UnavailableReason::FullyBooked);
    Availability {
        slots,
        slot_duration_minutes,
        reason,
    }
}

/// Returns the start times held by non-cancelled bookings on `date`.
///
/// Times are compared on the canonical wall-clock value, so a booking
/// written as `"10:00 AM"` occupies the same slot as one written `"10:00"`.
pub fn occupied_times(date: NaiveDate, bookings: &[BookingRecord]) -> HashSet<WallTime> {
    bookings
        .iter()
        .filter(|booking| booking.date == date && booking.status.occupies_slot())
        .map(|booking| booking.time)
        .collect()
}

/// Generates every slot start of a working day, ignoring breaks and bookings.
///
/// Slots step from the start of the day by `slot_duration_minutes`; the last
/// slot must end at or before the end of the day.
pub fn slot_starts(day: &DaySchedule, slot_duration_minutes: u32) -> Vec<WallTime> {
    if slot_duration_minutes == 0 {
        return Vec::new();
    }

    let end = day.end_time.minutes_since_midnight();
    let mut current = day.start_time.minutes_since_midnight();
    let mut starts = Vec::new();

    while current.saturating_add(slot_duration_minutes) <= end {
        if let Some(start) = WallTime::from_minutes(current) {
            starts.push(start);
        }
        current += slot_duration_minutes;
    }

    starts
}
