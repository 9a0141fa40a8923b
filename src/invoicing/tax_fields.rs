//! Tax and VAT number validation.
//!
//! Both identifiers are normalized the same way before the country pattern
//! is applied: whitespace and dashes are removed and letters upper-cased.

use crate::config::CountryInvoiceRule;

/// Normalizes a tax or VAT identifier.
///
/// # Example
///
/// ```
/// use practice_engine::invoicing::normalize_identifier;
///
/// assert_eq!(normalize_identifier(" si 1234-5678 "), "SI12345678");
/// ```
pub fn normalize_identifier(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

/// Validates a national tax number against a country rule.
///
/// An empty value is valid; the field is optional.
///
/// # Returns
///
/// `Err` with the message `Invalid {label}. Expected format: {example}` when
/// the normalized value does not fully match the country's tax pattern.
pub fn validate_tax_number(rule: &CountryInvoiceRule, tax_number: &str) -> Result<(), String> {
    if tax_number.is_empty() || rule.tax_number_matches(&normalize_identifier(tax_number)) {
        return Ok(());
    }
    Err(format!(
        "Invalid {}. Expected format: {}",
        rule.tax_label, rule.tax_example
    ))
}

/// Validates an EU VAT identification number against a country rule.
///
/// An empty value is valid; the field is optional.
pub fn validate_vat_number(rule: &CountryInvoiceRule, vat_number: &str) -> Result<(), String> {
    if vat_number.is_empty() || rule.vat_number_matches(&normalize_identifier(vat_number)) {
        return Ok(());
    }
    Err(format!(
        "Invalid {}. Expected format: {}",
        rule.vat_label, rule.vat_example
    ))
}
