//! Invoice settings for the Practice Engine.
//!
//! This module validates the business-registration fields a provider puts
//! on invoices (tax number, VAT number, IBAN, BIC) against per-country
//! rules, exposes the country help text, and formats invoice numbers.

mod bic;
mod iban;
mod invoice_number;
mod settings;
mod tax_fields;

pub use bic::validate_bic;
pub use iban::{IBAN_MAX_LENGTH, IBAN_MIN_LENGTH, iban_remainder, normalize_iban, validate_iban};
pub use invoice_number::format_invoice_number;
pub use settings::{
    all_countries, country_for_language, country_requirements, validate_invoice_fields,
};
pub use tax_fields::{normalize_identifier, validate_tax_number, validate_vat_number};
