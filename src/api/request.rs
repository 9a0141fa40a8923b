//! Request types for the Practice Engine API.
//!
//! This module defines the JSON and query structures accepted by the
//! availability, booking and invoice endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{BookingRecord, BookingStatus, NewBooking, WallTime, WeeklySchedule};

/// Request body for the stateless `POST /availability` endpoint.
///
/// When `schedule` is omitted the practice default schedule is used. When
/// `now` is omitted the server's local time is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    /// The provider's weekly schedule.
    #[serde(default)]
    pub schedule: Option<WeeklySchedule>,
    /// The date to compute slots for.
    pub date: NaiveDate,
    /// Existing bookings; other dates and cancelled bookings are ignored.
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
    /// Current wall-clock time in the provider's zone.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Query string of `GET /providers/{id}/availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    /// The date to compute slots for.
    pub date: NaiveDate,
    /// Overrides the server's local time.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Request body for `POST /providers/{id}/bookings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// The client who books.
    pub client_id: String,
    /// The appointment date.
    pub date: NaiveDate,
    /// The slot start, in 24-hour or 12-hour form.
    pub time: WallTime,
    /// Free-form appointment type.
    #[serde(rename = "type", default = "default_appointment_type")]
    pub appointment_type: String,
    /// Optional notes from the client.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_appointment_type() -> String {
    "Consultation".to_string()
}

impl From<CreateBookingRequest> for NewBooking {
    fn from(req: CreateBookingRequest) -> Self {
        NewBooking {
            client_id: req.client_id,
            date: req.date,
            time: req.time,
            appointment_type: req.appointment_type,
            notes: req.notes,
        }
    }
}

/// Request body for `PATCH /providers/{id}/bookings/{booking_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    /// The new status.
    pub status: BookingStatus,
}

/// Request body for `POST /providers/{id}/invoice-number`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceNumberRequest {
    /// Overrides the configured prefix.
    #[serde(default)]
    pub prefix: Option<String>,
    /// Overrides the current year.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Request body for `POST /invoice/validate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceValidationRequest {
    /// Country code; unsupported or missing codes use the default country.
    #[serde(default)]
    pub country: String,
    /// National tax number.
    #[serde(default)]
    pub tax_number: Option<String>,
    /// EU VAT identification number.
    #[serde(default)]
    pub vat_number: Option<String>,
    /// Bank account IBAN.
    #[serde(default)]
    pub iban: Option<String>,
    /// Bank BIC / SWIFT code.
    #[serde(default)]
    pub bic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_request_defaults() {
        let json = r#"{"date": "2026-01-12"}"#;
        let request: AvailabilityRequest = serde_json::from_str(json).unwrap();

        assert!(request.schedule.is_none());
        assert!(request.bookings.is_empty());
        assert!(request.now.is_none());
    }

    #[test]
    fn test_availability_request_with_bookings() {
        let json = r#"{
            "date": "2026-01-12",
            "now": "2026-01-12T08:00:00",
            "bookings": [{"date": "2026-01-12", "time": "10:00 AM", "status": "pending"}]
        }"#;
        let request: AvailabilityRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.bookings.len(), 1);
        assert_eq!(request.bookings[0].time, WallTime::from_hm(10, 0).unwrap());
        assert!(request.now.is_some());
    }

    #[test]
    fn test_create_booking_request_conversion() {
        let json = r#"{"clientId": "client_001", "date": "2026-01-12", "time": "02:00 PM"}"#;
        let request: CreateBookingRequest = serde_json::from_str(json).unwrap();
        let booking: NewBooking = request.into();

        assert_eq!(booking.time, WallTime::from_hm(14, 0).unwrap());
        assert_eq!(booking.appointment_type, "Consultation");
        assert_eq!(booking.notes, None);
    }

    #[test]
    fn test_create_booking_request_rejects_bad_time() {
        let json = r#"{"clientId": "client_001", "date": "2026-01-12", "time": "25:00"}"#;
        assert!(serde_json::from_str::<CreateBookingRequest>(json).is_err());
    }

    #[test]
    fn test_validation_request_camel_case() {
        let json = r#"{"country": "SI", "taxNumber": "12345678", "iban": null}"#;
        let request: InvoiceValidationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.country, "SI");
        assert_eq!(request.tax_number.as_deref(), Some("12345678"));
        assert!(request.iban.is_none());
    }
}
