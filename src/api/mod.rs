//! HTTP API module for the Practice Engine.
//!
//! This module provides the REST API endpoints for provider schedules,
//! availability, bookings and invoice settings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AvailabilityQuery, AvailabilityRequest, CreateBookingRequest, InvoiceNumberRequest,
    InvoiceValidationRequest, UpdateBookingRequest,
};
pub use response::{ApiError, ApiErrorResponse, AvailabilityResponse};
pub use state::AppState;
