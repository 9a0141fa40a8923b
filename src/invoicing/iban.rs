//! IBAN validation (ISO 13616) with the ISO 7064 mod-97 checksum.

use crate::config::{CountryInvoiceRule, CountryRuleTable};

/// Shortest IBAN length accepted.
pub const IBAN_MIN_LENGTH: usize = 15;

/// Longest IBAN length accepted.
pub const IBAN_MAX_LENGTH: usize = 34;

/// Removes whitespace and upper-cases an IBAN.
pub fn normalize_iban(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Computes the ISO 7064 mod-97 remainder of a normalized IBAN.
///
/// The first four characters are moved to the end and every letter is
/// replaced by its value (A = 10 .. Z = 35). The remainder is built one digit
/// at a time so arbitrarily long inputs never overflow.
///
/// # Returns
///
/// `None` when the input has fewer than four characters or contains anything
/// other than ASCII digits and upper-case letters.
///
/// # Example
///
/// ```
/// use practice_engine::invoicing::iban_remainder;
///
/// assert_eq!(iban_remainder("GB29NWBK60161331926819"), Some(1));
/// assert_eq!(iban_remainder("SI56012345678901234"), Some(22));
/// ```
pub fn iban_remainder(iban: &str) -> Option<u32> {
    if iban.len() < 4 || !iban.is_ascii() {
        return None;
    }
    let (head, tail) = iban.split_at(4);

    tail.chars()
        .chain(head.chars())
        .try_fold(0u32, |remainder, c| match c {
            '0'..='9' => Some((remainder * 10 + c.to_digit(10)?) % 97),
            'A'..='Z' => Some((remainder * 100 + c.to_digit(36)?) % 97),
            _ => None,
        })
}

/// Validates an IBAN.
///
/// Checks run in order and the first failure is reported: length, the
/// generic shape (two letters, two digits, alphanumerics), the country's
/// IBAN pattern when `country` defines one, then the mod-97 checksum. An
/// empty value is valid; the field is optional.
pub fn validate_iban(
    table: &CountryRuleTable,
    country: Option<&CountryInvoiceRule>,
    iban: &str,
) -> Result<(), String> {
    if iban.is_empty() {
        return Ok(());
    }

    let normalized = normalize_iban(iban);
    let length = normalized.chars().count();
    if !(IBAN_MIN_LENGTH..=IBAN_MAX_LENGTH).contains(&length) {
        return Err(format!(
            "IBAN must be between {} and {} characters",
            IBAN_MIN_LENGTH, IBAN_MAX_LENGTH
        ));
    }

    if !table.iban_shape_matches(&normalized) {
        return Err("Invalid IBAN format. Must start with 2 letters, then 2 digits".to_string());
    }

    if let Some(rule) = country {
        if rule.iban_matches(&normalized) == Some(false) {
            return Err(format!(
                "Invalid IBAN for {}. Expected format: {}",
                rule.name, rule.iban_example
            ));
        }
    }

    if iban_remainder(&normalized) != Some(1) {
        return Err("Invalid IBAN checksum".to_string());
    }

    Ok(())
}
