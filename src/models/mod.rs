//! Core data models for the Practice Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod availability;
mod booking;
mod invoice;
mod schedule;
mod wall_time;

pub use availability::{Availability, AvailableSlot, UnavailableReason};
pub use booking::{Booking, BookingRecord, BookingStatus, NewBooking};
pub use invoice::{
    CountryRequirements, CountrySummary, FieldRequirement, InvoiceField, ValidationResult,
};
pub use schedule::{DEFAULT_SLOT_DURATION_MINUTES, DaySchedule, WeeklySchedule};
pub use wall_time::{MINUTES_PER_DAY, WallTime};
