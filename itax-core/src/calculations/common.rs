//! Common utility functions for tax calculations.
//!
//! Shared helpers used by the slab table, the resolver and result
//! presentation: rounding, clamping and lakh-denominated labels.

use rust_decimal::Decimal;

/// One lakh rupees.
pub const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero. Only used when
/// presenting results; calculations run at full precision.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimal places, rounding half-up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::format_amount;
///
/// assert_eq!(format_amount(dec!(0)), "0.00");
/// assert_eq!(format_amount(dec!(62400.156)), "62400.16");
/// ```
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded.to_string()
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Formats a rupee amount in lakhs for slab labels, e.g. `₹2.5L`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::format_lakh;
///
/// assert_eq!(format_lakh(dec!(400000)), "₹4L");
/// assert_eq!(format_lakh(dec!(250000)), "₹2.5L");
/// assert_eq!(format_lakh(dec!(0)), "₹0");
/// ```
pub fn format_lakh(amount: Decimal) -> String {
    if amount.is_zero() {
        return "₹0".to_string();
    }
    format!("₹{}L", (amount / LAKH).normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(62399.894)), dec!(62399.89));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn round_half_up_preserves_whole_rupees() {
        assert_eq!(round_half_up(dec!(54600)), dec!(54600.00));
    }

    #[test]
    fn round_half_up_handles_long_fractions() {
        // 2400 / 1275000 * 100
        assert_eq!(round_half_up(dec!(0.1882352941176470588235294118)), dec!(0.19));
    }

    #[test]
    fn format_amount_pads_whole_numbers() {
        assert_eq!(format_amount(dec!(179400)), "179400.00");
        assert_eq!(format_amount(dec!(7800.0000)), "7800.00");
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_clamps_negative_to_zero() {
        assert_eq!(max(dec!(-75000), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn max_handles_equal_values() {
        assert_eq!(max(dec!(150.00), dec!(150.00)), dec!(150.00));
    }

    // =========================================================================
    // format_lakh tests
    // =========================================================================

    #[test]
    fn format_lakh_whole_lakhs() {
        assert_eq!(format_lakh(dec!(2400000)), "₹24L");
        assert_eq!(format_lakh(dec!(1000000)), "₹10L");
    }

    #[test]
    fn format_lakh_fractional_lakhs() {
        assert_eq!(format_lakh(dec!(550000)), "₹5.5L");
        assert_eq!(format_lakh(dec!(1250000)), "₹12.5L");
    }

    #[test]
    fn lakh_constant_is_one_hundred_thousand() {
        assert_eq!(LAKH, dec!(100000));
    }
}
