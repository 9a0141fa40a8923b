//! BIC / SWIFT code validation.

use crate::config::CountryRuleTable;

/// Validates a BIC: four letters of bank code, two letters of country code,
/// two alphanumerics of location and an optional three-character branch.
///
/// Whitespace is removed and letters upper-cased first. An empty value is
/// valid; the field is optional.
pub fn validate_bic(table: &CountryRuleTable, bic: &str) -> Result<(), String> {
    if bic.is_empty() {
        return Ok(());
    }

    let normalized: String = bic
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect();

    if table.bic_shape_matches(&normalized) {
        Ok(())
    } else {
        Err("Invalid BIC/SWIFT format. Expected: AAAABBCC or AAAABBCCDDD".to_string())
    }
}
