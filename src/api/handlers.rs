//! HTTP request handlers for the Practice Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::{Datelike, Local, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::invoicing::{
    all_countries, country_for_language, country_requirements, validate_invoice_fields,
};
use crate::models::{BookingStatus, WeeklySchedule};
use crate::scheduling::compute_available_slots;

use super::request::{
    AvailabilityQuery, AvailabilityRequest, CreateBookingRequest, InvoiceNumberRequest,
    InvoiceValidationRequest, UpdateBookingRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AvailabilityResponse, CountryForLanguageResponse, HealthResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/availability", post(availability_handler))
        .route(
            "/providers/:provider_id/schedule",
            get(get_schedule_handler).put(put_schedule_handler),
        )
        .route(
            "/providers/:provider_id/availability",
            get(provider_availability_handler),
        )
        .route(
            "/providers/:provider_id/bookings",
            post(create_booking_handler),
        )
        .route(
            "/providers/:provider_id/bookings/:booking_id",
            get(get_booking_handler).patch(update_booking_handler),
        )
        .route(
            "/providers/:provider_id/invoice-number",
            post(invoice_number_handler),
        )
        .route("/invoice/validate", post(validate_invoice_handler))
        .route("/invoice/requirements/:code", get(requirements_handler))
        .route("/invoice/countries", get(countries_handler))
        .route(
            "/invoice/country-for-language/:language",
            get(country_for_language_handler),
        )
        .with_state(state)
}

/// Current wall-clock time in the practice's zone.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a JSON body rejection into an error response.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
        .into_response()
}

fn path_rejection(correlation_id: Uuid, rejection: PathRejection) -> Response {
    warn!(correlation_id = %correlation_id, error = %rejection, "Invalid path parameter");
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
        .into_response()
}

fn engine_error(correlation_id: Uuid, err: crate::error::EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

/// Handler for POST /availability.
///
/// Computes slots from the schedule and bookings in the request body,
/// without touching the store.
async fn availability_handler(
    State(state): State<AppState>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing availability request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let schedule = request
        .schedule
        .unwrap_or_else(|| state.config().default_schedule().clone());
    let now = request.now.unwrap_or_else(local_now);

    let start_time = Instant::now();
    let availability = compute_available_slots(&schedule, request.date, &request.bookings, now);
    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        slots = availability.slots.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Availability computed"
    );

    json_response(StatusCode::OK, AvailabilityResponse::from(availability))
}

/// Handler for GET /providers/{id}/schedule.
async fn get_schedule_handler(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let store = state.store();
    let store = store.read().await;
    debug!(
        correlation_id = %correlation_id,
        provider_id = %provider_id,
        "Fetching schedule"
    );
    json_response(StatusCode::OK, store.schedule_for(&provider_id))
}

/// Handler for PUT /providers/{id}/schedule.
///
/// Validates the schedule and replaces the provider's stored schedule.
async fn put_schedule_handler(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    payload: Result<Json<WeeklySchedule>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        provider_id = %provider_id,
        "Updating schedule"
    );

    let schedule = match payload {
        Ok(Json(schedule)) => schedule,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let store = state.store();
    let mut store = store.write().await;
    match store.upsert_schedule(&provider_id, schedule) {
        Ok(()) => json_response(StatusCode::OK, store.schedule_for(&provider_id)),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /providers/{id}/availability?date=YYYY-MM-DD.
async fn provider_availability_handler(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };
    let now = query.now.unwrap_or_else(local_now);

    let start_time = Instant::now();
    let availability = state
        .store()
        .read()
        .await
        .availability(&provider_id, query.date, now);
    info!(
        correlation_id = %correlation_id,
        provider_id = %provider_id,
        date = %query.date,
        slots = availability.slots.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Availability computed"
    );

    json_response(StatusCode::OK, AvailabilityResponse::from(availability))
}

/// Handler for POST /providers/{id}/bookings.
///
/// Books one of the currently offered slots. The booking starts pending.
async fn create_booking_handler(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        provider_id = %provider_id,
        "Processing booking request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let video_base_url = &state.config().practice().video.base_url;
    let result = state.store().write().await.create_booking(
        &provider_id,
        request.into(),
        local_now(),
        video_base_url,
    );

    match result {
        Ok(booking) => {
            info!(
                correlation_id = %correlation_id,
                provider_id = %provider_id,
                booking_id = %booking.id,
                date = %booking.date,
                time = %booking.time,
                "Booking created"
            );
            json_response(StatusCode::CREATED, booking)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /providers/{id}/bookings/{booking_id}.
///
/// Returns the stored booking including its video link.
async fn get_booking_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (provider_id, booking_id) = match path {
        Ok(Path(ids)) => ids,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    debug!(
        correlation_id = %correlation_id,
        provider_id = %provider_id,
        booking_id = %booking_id,
        "Fetching booking"
    );

    let store = state.store();
    let store = store.read().await;
    match store.booking(&provider_id, booking_id) {
        Ok(booking) => json_response(StatusCode::OK, booking),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for PATCH /providers/{id}/bookings/{booking_id}.
async fn update_booking_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, Uuid)>, PathRejection>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (provider_id, booking_id) = match path {
        Ok(Path(ids)) => ids,
        Err(rejection) => return path_rejection(correlation_id, rejection),
    };
    let status: BookingStatus = match payload {
        Ok(Json(req)) => req.status,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = state
        .store()
        .write()
        .await
        .update_booking_status(&provider_id, booking_id, status);

    match result {
        Ok(booking) => {
            info!(
                correlation_id = %correlation_id,
                provider_id = %provider_id,
                booking_id = %booking_id,
                status = %booking.status,
                "Booking updated"
            );
            json_response(StatusCode::OK, booking)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /providers/{id}/invoice-number.
///
/// The body is optional; without one the configured prefix and the current
/// year are used. A body that is present must be a valid request.
async fn invoice_number_handler(
    State(state): State<AppState>,
    Path(provider_id): Path<String>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        InvoiceNumberRequest::default()
    } else {
        match Json::<InvoiceNumberRequest>::from_bytes(&body) {
            Ok(Json(req)) => req,
            Err(rejection) => return json_rejection(correlation_id, rejection),
        }
    };
    let prefix = request
        .prefix
        .unwrap_or_else(|| state.config().practice().invoicing.number_prefix.clone());
    let year = request.year.unwrap_or_else(|| Local::now().year());

    let issued = state
        .store()
        .write()
        .await
        .next_invoice_number(&provider_id, &prefix, year);
    info!(
        correlation_id = %correlation_id,
        provider_id = %provider_id,
        invoice_number = %issued.invoice_number,
        "Invoice number issued"
    );

    json_response(StatusCode::OK, issued)
}

/// Handler for POST /invoice/validate.
async fn validate_invoice_handler(
    State(state): State<AppState>,
    payload: Result<Json<InvoiceValidationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let result = validate_invoice_fields(
        state.config().countries(),
        &request.country,
        request.tax_number.as_deref(),
        request.vat_number.as_deref(),
        request.iban.as_deref(),
        request.bic.as_deref(),
    );
    info!(
        correlation_id = %correlation_id,
        country = %result.country_code,
        valid = result.valid,
        errors = result.errors.len(),
        "Invoice settings validated"
    );

    json_response(StatusCode::OK, result)
}

/// Handler for GET /invoice/requirements/{code}.
async fn requirements_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let requirements = country_requirements(state.config().countries(), &code);
    debug!(
        correlation_id = %correlation_id,
        requested = %code,
        country = %requirements.country_code,
        "Country requirements served"
    );
    json_response(StatusCode::OK, requirements)
}

/// Handler for GET /invoice/countries.
async fn countries_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let countries = all_countries(state.config().countries());
    debug!(
        correlation_id = %correlation_id,
        countries = countries.len(),
        "Country list served"
    );
    json_response(StatusCode::OK, countries)
}

/// Handler for GET /invoice/country-for-language/{language}.
async fn country_for_language_handler(
    State(state): State<AppState>,
    Path(language): Path<String>,
) -> Response {
    let country_code = country_for_language(state.config().countries(), &language);
    json_response(
        StatusCode::OK,
        CountryForLanguageResponse {
            language,
            country_code,
        },
    )
}
