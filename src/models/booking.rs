//! Booking models.
//!
//! [`Booking`] is the stored appointment; [`BookingRecord`] is the slim view
//! of it that the availability engine consumes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wall_time::WallTime;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested by the client, not yet confirmed.
    Pending,
    /// Confirmed by the provider.
    Confirmed,
    /// The appointment took place.
    Completed,
    /// Cancelled by either party; frees the slot.
    Cancelled,
}

impl BookingStatus {
    /// Whether a booking in this status occupies its slot.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }

    /// Whether the client should still be reminded about the appointment.
    pub fn is_upcoming(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Whether a booking may move from this status to `next`.
    ///
    /// Completed and cancelled are final. Setting the current status again
    /// is always allowed.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Pending, Confirmed | Completed | Cancelled) | (Confirmed, Completed | Cancelled)
            )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The date, time and status of a booking as seen by the availability engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// The appointment date.
    pub date: NaiveDate,
    /// The appointment start time.
    pub time: WallTime,
    /// The booking status.
    pub status: BookingStatus,
}

/// A stored appointment between a provider and a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking id.
    pub id: Uuid,
    /// The provider being booked.
    pub provider_id: String,
    /// The client who booked.
    pub client_id: String,
    /// The appointment date.
    pub date: NaiveDate,
    /// The appointment start time.
    pub time: WallTime,
    /// Length of the appointment in minutes.
    pub duration_minutes: u32,
    /// Free-form appointment type, e.g. "Initial consultation".
    #[serde(rename = "type")]
    pub appointment_type: String,
    /// Optional notes from the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Current status.
    pub status: BookingStatus,
    /// Video-call link generated when the booking was created.
    pub video_link: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the engine view of this booking.
    pub fn record(&self) -> BookingRecord {
        BookingRecord {
            date: self.date,
            time: self.time,
            status: self.status,
        }
    }
}

/// The client-supplied part of a new booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// The client who books.
    pub client_id: String,
    /// The requested date.
    pub date: NaiveDate,
    /// The requested slot start.
    pub time: WallTime,
    /// Free-form appointment type.
    pub appointment_type: String,
    /// Optional notes from the client.
    pub notes: Option<String>,
}
