//! Scheduling for the Practice Engine.
//!
//! This module contains the availability engine and the booking side
//! effects that depend on it: meeting links and appointment reminders.
//!
//! # Example
//!
//! ```
//! use practice_engine::models::{BookingRecord, BookingStatus, WeeklySchedule};
//! use practice_engine::scheduling::compute_available_slots;
//! use chrono::NaiveDate;
//!
//! let schedule = WeeklySchedule::default();
//! let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
//! let booking = BookingRecord {
//!     date: monday,
//!     time: "10:00 AM".parse().unwrap(),
//!     status: BookingStatus::Confirmed,
//! };
//! let now = monday.pred_opt().unwrap().and_hms_opt(12, 0, 0).unwrap();
//!
//! let availability = compute_available_slots(&schedule, monday, &[booking], now);
//! assert_eq!(availability.slots.len(), 7);
//! ```

mod available_slots;
mod reminders;
mod video_link;

pub use available_slots::{compute_available_slots, occupied_times, slot_starts};
pub use reminders::{
    LogNotifier, ReminderKey, ReminderLedger, ReminderNotifier, due_reminders, send_due_reminders,
};
pub use video_link::generate_video_link;
