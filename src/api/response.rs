//! Response types for the Practice Engine API.
//!
//! This module defines the success bodies that are not plain domain models,
//! the error response structures, and the mapping from [`EngineError`] to
//! HTTP status codes.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Availability, AvailableSlot};

/// Body of the availability endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Free slots in chronological order.
    pub slots: Vec<AvailableSlot>,
    /// Slot length in minutes.
    pub slot_duration: u32,
    /// Why no slots are offered; absent when there are slots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        Self {
            message: availability
                .reason
                .map(|reason| reason.message().to_string()),
            slots: availability.slots,
            slot_duration: availability.slot_duration_minutes,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
}

/// Body of `GET /invoice/country-for-language/{lang}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryForLanguageResponse {
    /// The requested language.
    pub language: String,
    /// The invoicing country for that language.
    pub country_code: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. }
            | EngineError::InvalidCountryRule { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidSchedule { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_SCHEDULE",
                    message,
                    format!("Correct '{}' and submit the schedule again", field),
                ),
            },
            EngineError::InvalidTime { .. } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(message))
            }
            EngineError::BookingNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("BOOKING_NOT_FOUND", message),
            },
            EngineError::InvalidBooking { field, .. } if field == "time" => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "SLOT_UNAVAILABLE",
                    message,
                    "Fetch availability again and pick one of the offered slots",
                ),
            },
            EngineError::InvalidBooking { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_BOOKING", message),
            },
            EngineError::LedgerIo { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("LEDGER_ERROR", "Reminder ledger error", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UnavailableReason, WallTime};
    use uuid::Uuid;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_schedule_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidSchedule {
            field: "monday.breakStart".to_string(),
            message: "must not be before startTime".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_SCHEDULE");
        assert!(api_error.error.message.contains("monday.breakStart"));
    }

    #[test]
    fn test_booking_errors_map_to_status_codes() {
        let not_found: ApiErrorResponse = EngineError::BookingNotFound { id: Uuid::nil() }.into();
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let taken: ApiErrorResponse = EngineError::InvalidBooking {
            field: "time".to_string(),
            message: "taken".to_string(),
        }
        .into();
        assert_eq!(taken.status, StatusCode::CONFLICT);
        assert_eq!(taken.error.code, "SLOT_UNAVAILABLE");

        let blank: ApiErrorResponse = EngineError::InvalidBooking {
            field: "clientId".to_string(),
            message: "must not be empty".to_string(),
        }
        .into();
        assert_eq!(blank.status, StatusCode::BAD_REQUEST);
        assert_eq!(blank.error.code, "INVALID_BOOKING");
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "config/countries.yaml".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_availability_response_shape() {
        let empty = Availability {
            slots: Vec::new(),
            slot_duration_minutes: 60,
            reason: Some(UnavailableReason::DayOff),
        };
        let json = serde_json::to_value(AvailabilityResponse::from(empty)).unwrap();
        assert_eq!(json["slotDuration"], 60);
        assert_eq!(json["message"], "Provider is not available on this day");

        let open = Availability {
            slots: vec![AvailableSlot::new(WallTime::from_hm(9, 0).unwrap())],
            slot_duration_minutes: 30,
            reason: None,
        };
        let json = serde_json::to_value(AvailabilityResponse::from(open)).unwrap();
        assert!(json.get("message").is_none());
        assert_eq!(json["slots"][0]["time12h"], "09:00 AM");
        assert_eq!(json["slots"][0]["time24h"], "09:00");
        assert_eq!(json["slots"][0]["available"], true);
    }
}
