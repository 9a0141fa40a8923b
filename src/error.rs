//! Error types for the Practice Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur outside the pure validators.
//! Invoice field validation never produces an error value; failing fields are
//! reported inside a [`ValidationResult`](crate::models::ValidationResult).

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Practice Engine.
///
/// # Example
///
/// ```
/// use practice_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/countries.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/countries.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value is outside its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending setting, e.g. `reminders.lead_hours`.
        field: String,
        /// A description of the allowed range.
        message: String,
    },

    /// A country invoice rule could not be built from configuration.
    #[error("Invalid country rule '{code}': {message}")]
    InvalidCountryRule {
        /// The country code of the offending rule.
        code: String,
        /// A description of the problem.
        message: String,
    },

    /// A weekly schedule violates one of its invariants.
    #[error("Invalid schedule field '{field}': {message}")]
    InvalidSchedule {
        /// The offending field, e.g. `monday.breakStart`.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A wall-clock time string could not be parsed.
    #[error("Invalid time '{value}': expected HH:MM or hh:mm AM/PM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// No booking exists with the given id for the provider.
    #[error("Booking not found: {id}")]
    BookingNotFound {
        /// The booking id that was looked up.
        id: Uuid,
    },

    /// A booking request was rejected.
    #[error("Invalid booking field '{field}': {message}")]
    InvalidBooking {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The reminder ledger could not be read or written.
    #[error("Reminder ledger error at '{path}': {message}")]
    LedgerIo {
        /// The ledger file path.
        path: String,
        /// A description of the I/O or encoding failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/countries.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/countries.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_country_rule_displays_code() {
        let error = EngineError::InvalidCountryRule {
            code: "XX".to_string(),
            message: "bad tax pattern".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid country rule 'XX': bad tax pattern");
    }

    #[test]
    fn test_invalid_schedule_displays_field_and_message() {
        let error = EngineError::InvalidSchedule {
            field: "monday.endTime".to_string(),
            message: "must be after startTime".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid schedule field 'monday.endTime': must be after startTime"
        );
    }

    #[test]
    fn test_invalid_time_displays_value() {
        let error = EngineError::InvalidTime {
            value: "25:00".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid time '25:00': expected HH:MM or hh:mm AM/PM"
        );
    }

    #[test]
    fn test_booking_not_found_displays_id() {
        let id = Uuid::nil();
        let error = EngineError::BookingNotFound { id };
        assert_eq!(
            error.to_string(),
            "Booking not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_time() -> EngineResult<()> {
            Err(EngineError::InvalidTime {
                value: "noon".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_time()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
