//! In-memory storage of schedules, bookings and invoice counters.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::invoicing::format_invoice_number;
use crate::models::{
    Availability, Booking, BookingRecord, BookingStatus, NewBooking, WeeklySchedule,
};
use crate::scheduling::{compute_available_slots, generate_video_link};

/// An issued invoice number and the sequence the next one will use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedInvoiceNumber {
    /// The formatted number, e.g. `INV-2026-00001`.
    pub invoice_number: String,
    /// Sequence of the next invoice.
    pub next_number: u64,
}

/// Practice data held in memory, keyed by provider id.
///
/// Providers without a stored schedule use the practice default schedule.
#[derive(Debug, Clone)]
pub struct PracticeStore {
    default_schedule: WeeklySchedule,
    schedules: HashMap<String, WeeklySchedule>,
    bookings: HashMap<String, Vec<Booking>>,
    invoice_counters: HashMap<String, u64>,
}

impl PracticeStore {
    /// Creates an empty store.
    pub fn new(default_schedule: WeeklySchedule) -> Self {
        Self {
            default_schedule,
            schedules: HashMap::new(),
            bookings: HashMap::new(),
            invoice_counters: HashMap::new(),
        }
    }

    /// Returns the provider's schedule, or the default when none is stored.
    pub fn schedule_for(&self, provider_id: &str) -> &WeeklySchedule {
        self.schedules
            .get(provider_id)
            .unwrap_or(&self.default_schedule)
    }

    /// Validates and stores a provider's schedule, replacing any previous one.
    pub fn upsert_schedule(
        &mut self,
        provider_id: &str,
        schedule: WeeklySchedule,
    ) -> EngineResult<()> {
        schedule.validate()?;
        self.schedules.insert(provider_id.to_string(), schedule);
        Ok(())
    }

    /// Returns the slot-occupying bookings of a provider on one date.
    pub fn bookings_on(&self, provider_id: &str, date: NaiveDate) -> Vec<BookingRecord> {
        self.bookings
            .get(provider_id)
            .into_iter()
            .flatten()
            .filter(|booking| booking.date == date && booking.status.occupies_slot())
            .map(Booking::record)
            .collect()
    }

    /// Computes a provider's free slots on a date.
    pub fn availability(
        &self,
        provider_id: &str,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> Availability {
        compute_available_slots(
            self.schedule_for(provider_id),
            date,
            &self.bookings_on(provider_id, date),
            now,
        )
    }

    /// Books a slot for a client.
    ///
    /// The new booking is pending, lasts one slot and gets a fresh meeting
    /// link under `video_base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBooking`] when the client id is blank or
    /// the requested time is not a free slot at `now`.
    pub fn create_booking(
        &mut self,
        provider_id: &str,
        request: NewBooking,
        now: NaiveDateTime,
        video_base_url: &str,
    ) -> EngineResult<Booking> {
        if request.client_id.trim().is_empty() {
            return Err(EngineError::InvalidBooking {
                field: "clientId".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let availability = self.availability(provider_id, request.date, now);
        if !availability.offers(request.time) {
            return Err(EngineError::InvalidBooking {
                field: "time".to_string(),
                message: format!(
                    "{} on {} is not an available slot",
                    request.time, request.date
                ),
            });
        }

        let created_at = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            provider_id: provider_id.to_string(),
            client_id: request.client_id,
            date: request.date,
            time: request.time,
            duration_minutes: availability.slot_duration_minutes,
            appointment_type: request.appointment_type,
            notes: request.notes,
            status: BookingStatus::Pending,
            video_link: generate_video_link(video_base_url),
            created_at,
            updated_at: created_at,
        };

        self.bookings
            .entry(provider_id.to_string())
            .or_default()
            .push(booking.clone());
        Ok(booking)
    }

    /// Changes the status of a provider's booking.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BookingNotFound`] when the provider has no such
    /// booking and [`EngineError::InvalidBooking`] when the booking is already
    /// completed or cancelled.
    pub fn update_booking_status(
        &mut self,
        provider_id: &str,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> EngineResult<Booking> {
        let booking = self
            .bookings
            .get_mut(provider_id)
            .and_then(|bookings| bookings.iter_mut().find(|b| b.id == booking_id))
            .ok_or(EngineError::BookingNotFound { id: booking_id })?;

        if !booking.status.can_transition_to(status) {
            return Err(EngineError::InvalidBooking {
                field: "status".to_string(),
                message: format!("cannot change a {} booking to {}", booking.status, status),
            });
        }

        if booking.status != status {
            booking.status = status;
            booking.updated_at = Utc::now();
        }
        Ok(booking.clone())
    }

    /// Returns a booking of a provider.
    pub fn booking(&self, provider_id: &str, booking_id: Uuid) -> EngineResult<&Booking> {
        self.bookings
            .get(provider_id)
            .and_then(|bookings| bookings.iter().find(|b| b.id == booking_id))
            .ok_or(EngineError::BookingNotFound { id: booking_id })
    }

    /// Returns every stored booking across providers.
    pub fn all_bookings(&self) -> Vec<Booking> {
        self.bookings.values().flatten().cloned().collect()
    }

    /// Issues the provider's next invoice number.
    ///
    /// Counters start at 1 and increase by one per issued number.
    pub fn next_invoice_number(
        &mut self,
        provider_id: &str,
        prefix: &str,
        year: i32,
    ) -> IssuedInvoiceNumber {
        let counter = self
            .invoice_counters
            .entry(provider_id.to_string())
            .or_insert(1);
        let sequence = *counter;
        *counter += 1;

        IssuedInvoiceNumber {
            invoice_number: format_invoice_number(prefix, year, sequence),
            next_number: *counter,
        }
    }
}
