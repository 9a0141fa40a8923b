//! Invoice settings validation output and country help-text types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// A business-registration field checked by the invoice validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceField {
    /// National tax number.
    TaxNumber,
    /// EU VAT identification number.
    VatNumber,
    /// International Bank Account Number.
    Iban,
    /// Bank Identifier Code (SWIFT).
    Bic,
}

/// Outcome of validating a provider's invoice settings.
///
/// Failing fields are listed in `errors`; `country` and `vat_rate` always
/// describe the rule that was applied, which is the default country's rule
/// when the requested code is not supported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when every supplied field passed.
    pub valid: bool,
    /// One message per failing field.
    pub errors: BTreeMap<InvoiceField, String>,
    /// Display name of the resolved country.
    pub country: String,
    /// Code of the resolved country.
    pub country_code: String,
    /// Default VAT rate of the resolved country, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub vat_rate: Decimal,
}

impl ValidationResult {
    /// Returns the message for a failing field.
    pub fn error(&self, field: InvoiceField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Label and example for one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRequirement {
    /// Localized field label, absent for IBAN.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// A well-formed example value.
    pub example: String,
    /// Invoice fields are never mandatory.
    pub required: bool,
}

/// Form hints for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRequirements {
    /// Display name of the country.
    pub country: String,
    /// Resolved country code.
    pub country_code: String,
    /// Tax number hints.
    pub tax_number: FieldRequirement,
    /// VAT number hints.
    pub vat_number: FieldRequirement,
    /// IBAN hints.
    pub iban: FieldRequirement,
    /// Default VAT rate in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub vat_rate: Decimal,
}

/// One entry of the supported-countries listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummary {
    /// Display name.
    pub name: String,
    /// Tax number label.
    pub tax_label: String,
    /// Tax number example.
    pub tax_example: String,
    /// VAT number label.
    pub vat_label: String,
    /// VAT number example.
    pub vat_example: String,
    /// IBAN example.
    pub iban_example: String,
    /// Default VAT rate in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub vat_rate: Decimal,
    /// Whether unsupported codes fall back to this country.
    pub is_default: bool,
}
