//! Practice Engine for healthcare practice management
//!
//! This crate computes bookable appointment slots from a provider's weekly
//! schedule and existing bookings, and validates the EU invoice fields
//! (tax number, VAT number, IBAN, BIC) a provider puts on invoices.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod invoicing;
pub mod models;
pub mod scheduling;
pub mod store;
