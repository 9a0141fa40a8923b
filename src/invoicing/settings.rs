//! Invoice settings validation and country help text.

use std::collections::BTreeMap;

use crate::config::{CountryInvoiceRule, CountryRuleTable};
use crate::models::{
    CountryRequirements, CountrySummary, FieldRequirement, InvoiceField, ValidationResult,
};

use super::bic::validate_bic;
use super::iban::validate_iban;
use super::tax_fields::{validate_tax_number, validate_vat_number};

/// Validates a provider's business-registration fields for a country.
///
/// # Arguments
///
/// * `table` - The supported country rules
/// * `country_code` - Requested country; unsupported codes resolve to the
///   default country
/// * `tax_number`, `vat_number`, `iban`, `bic` - The fields to check; absent
///   or empty fields are valid
///
/// # Returns
///
/// A [`ValidationResult`] with one message per failing field and the
/// resolved country's name, code and VAT rate. This function never fails.
///
/// # Example
///
/// ```
/// use practice_engine::config::ConfigLoader;
/// use practice_engine::invoicing::validate_invoice_fields;
/// use practice_engine::models::InvoiceField;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let result = validate_invoice_fields(
///     loader.countries(),
///     "SI",
///     Some("123"),
///     None,
///     Some("SI56263300012039086"),
///     None,
/// );
///
/// assert!(!result.valid);
/// assert!(result.error(InvoiceField::TaxNumber).is_some());
/// assert!(result.error(InvoiceField::Iban).is_none());
/// ```
pub fn validate_invoice_fields(
    table: &CountryRuleTable,
    country_code: &str,
    tax_number: Option<&str>,
    vat_number: Option<&str>,
    iban: Option<&str>,
    bic: Option<&str>,
) -> ValidationResult {
    let rule = table.resolve(country_code);

    let checks = [
        (
            InvoiceField::TaxNumber,
            validate_tax_number(rule, tax_number.unwrap_or_default()),
        ),
        (
            InvoiceField::VatNumber,
            validate_vat_number(rule, vat_number.unwrap_or_default()),
        ),
        (
            InvoiceField::Iban,
            validate_iban(table, Some(rule), iban.unwrap_or_default()),
        ),
        (InvoiceField::Bic, validate_bic(table, bic.unwrap_or_default())),
    ];

    let errors: BTreeMap<InvoiceField, String> = checks
        .into_iter()
        .filter_map(|(field, check)| check.err().map(|message| (field, message)))
        .collect();

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        country: rule.name.clone(),
        country_code: rule.code.clone(),
        vat_rate: rule.vat_rate,
    }
}

/// Returns the field labels and examples for a country.
///
/// Unsupported codes resolve to the default country.
pub fn country_requirements(table: &CountryRuleTable, country_code: &str) -> CountryRequirements {
    let rule = table.resolve(country_code);
    CountryRequirements {
        country: rule.name.clone(),
        country_code: rule.code.clone(),
        tax_number: FieldRequirement {
            label: Some(rule.tax_label.clone()),
            example: rule.tax_example.clone(),
            required: false,
        },
        vat_number: FieldRequirement {
            label: Some(rule.vat_label.clone()),
            example: rule.vat_example.clone(),
            required: false,
        },
        iban: FieldRequirement {
            label: None,
            example: rule.iban_example.clone(),
            required: false,
        },
        vat_rate: rule.vat_rate,
    }
}

/// Lists every supported country, keyed by country code.
pub fn all_countries(table: &CountryRuleTable) -> BTreeMap<String, CountrySummary> {
    let default_code = &table.default_rule().code;
    table
        .rules()
        .iter()
        .map(|rule| (rule.code.clone(), summarize(rule, &rule.code == default_code)))
        .collect()
}

fn summarize(rule: &CountryInvoiceRule, is_default: bool) -> CountrySummary {
    CountrySummary {
        name: rule.name.clone(),
        tax_label: rule.tax_label.clone(),
        tax_example: rule.tax_example.clone(),
        vat_label: rule.vat_label.clone(),
        vat_example: rule.vat_example.clone(),
        iban_example: rule.iban_example.clone(),
        vat_rate: rule.vat_rate,
        is_default,
    }
}

/// Returns the invoicing country code for an interface language.
///
/// Unknown languages map to the default country.
pub fn country_for_language(table: &CountryRuleTable, language: &str) -> String {
    table.country_for_language(language).code.clone()
}
