//! Money display helpers.
//!
//! Saltbloom prices are whole-currency USD amounts carried as
//! [`rust_decimal::Decimal`]. Arithmetic stays in `Decimal`; these helpers
//! only cover the display edge.

use rust_decimal::Decimal;

/// Format a decimal amount as a US-dollar display string (e.g., `"$12.50"`).
///
/// The amount is rounded to two decimal places before formatting.
#[must_use]
pub fn display_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    format!("${rounded:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(display_usd(Decimal::from(3)), "$3.00");
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(display_usd(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_display_pads_cents() {
        // 37.5 -> "$37.50"
        assert_eq!(display_usd(Decimal::new(375, 1)), "$37.50");
    }

    #[test]
    fn test_display_rounds_excess_precision() {
        // 12.504 -> two decimal places
        assert_eq!(display_usd(Decimal::new(12_504, 3)), "$12.50");
    }
}
