//! Sequential invoice numbers.

/// Formats an invoice number as `{prefix}-{year}-{sequence:05}`.
///
/// # Example
///
/// ```
/// use practice_engine::invoicing::format_invoice_number;
///
/// assert_eq!(format_invoice_number("INV", 2025, 1), "INV-2025-00001");
/// assert_eq!(format_invoice_number("RAC", 2026, 123456), "RAC-2026-123456");
/// ```
pub fn format_invoice_number(prefix: &str, year: i32, sequence: u64) -> String {
    format!("{}-{}-{:05}", prefix, year, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        assert_eq!(format_invoice_number("INV", 2026, 42), "INV-2026-00042");
        assert_eq!(format_invoice_number("INV", 2026, 99999), "INV-2026-99999");
    }

    #[test]
    fn test_custom_prefix() {
        assert_eq!(format_invoice_number("DR-K", 2026, 7), "DR-K-2026-00007");
    }
}
