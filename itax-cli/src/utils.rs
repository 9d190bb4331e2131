use std::sync::OnceLock;

use itax_core::calculations::common::{LAKH, format_amount};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// One crore rupees (100 lakh).
const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);
const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

const AMOUNT_PATTERN: &str =
    r"(?i)^(?:₹|rs\.?|inr)?\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*(k|l|lac|lacs|lakh|lakhs|cr|crore|crores)?$";

static AMOUNT_RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Error returned when a string cannot be parsed as a rupee amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("invalid amount '{0}'; expected e.g. 1200000, 12,00,000, 12L or 1.2Cr")]
    Format(String),

    #[error("invalid amount '{input}': {source}")]
    Decimal {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("amount '{0}' is too large")]
    Overflow(String),

    #[error("amount pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

fn amount_re() -> Result<&'static Regex, ParseAmountError> {
    AMOUNT_RE
        .get_or_init(|| Regex::new(AMOUNT_PATTERN))
        .as_ref()
        .map_err(|e| ParseAmountError::Pattern(e.clone()))
}

fn unit_multiplier(unit: &str) -> Decimal {
    match unit.to_ascii_lowercase().as_str() {
        "k" => THOUSAND,
        "l" | "lac" | "lacs" | "lakh" | "lakhs" => LAKH,
        "cr" | "crore" | "crores" => CRORE,
        _ => Decimal::ONE,
    }
}

/// Parses a rupee amount as typed on the command line.
///
/// Accepts comma grouping in either style (`12,00,000` or `1,200,000`),
/// an optional `₹`/`Rs`/`INR` prefix and a `K`, `L`/`lakh` or `Cr`/`crore`
/// suffix. Empty input is treated as 0.
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_cli::utils::parse_amount;
///
/// assert_eq!(parse_amount("12,00,000").unwrap(), dec!(1200000));
/// assert_eq!(parse_amount("12.5 lakh").unwrap(), dec!(1250000));
/// assert_eq!(parse_amount("₹1.2Cr").unwrap(), dec!(12000000));
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let captures = amount_re()?.captures(trimmed).ok_or_else(|| {
        tracing::error!(input = %s, "unrecognized amount");
        ParseAmountError::Format(s.to_string())
    })?;

    let number = captures
        .get(1)
        .map(|m| m.as_str().replace(',', ""))
        .unwrap_or_default();
    let value: Decimal = number.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Decimal {
            input: s.to_string(),
            source: e,
        }
    })?;

    let multiplier = captures
        .get(2)
        .map_or(Decimal::ONE, |m| unit_multiplier(m.as_str()));

    value.checked_mul(multiplier).ok_or_else(|| {
        tracing::error!(input = %s, "amount overflows");
        ParseAmountError::Overflow(s.to_string())
    })
}

/// Caps a deduction at its statutory limit, logging when it had to.
pub fn clamp_deduction(
    value: Decimal,
    limit: Decimal,
    field: &'static str,
) -> Decimal {
    if value > limit {
        tracing::warn!(field, %value, %limit, "deduction capped at statutory limit");
        limit
    } else {
        value
    }
}

/// Groups the whole-rupee digits Indian style: last three, then pairs.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats an amount as rupees with Indian digit grouping, e.g. `₹12,00,000.00`.
pub fn format_inr(amount: Decimal) -> String {
    let text = format_amount(amount);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    format!("{sign}₹{}.{fraction}", group_indian(whole))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_plain_and_grouped() {
        assert_eq!(parse_amount("1200000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("12,00,000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("1,250,000.50").unwrap(), dec!(1250000.50));
    }

    #[test]
    fn parse_amount_currency_prefixes() {
        assert_eq!(parse_amount("₹12,00,000").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("Rs. 500000").unwrap(), dec!(500000));
        assert_eq!(parse_amount("INR 75000").unwrap(), dec!(75000));
    }

    #[test]
    fn parse_amount_units() {
        assert_eq!(parse_amount("12L").unwrap(), dec!(1200000));
        assert_eq!(parse_amount("12.5 lakh").unwrap(), dec!(1250000));
        assert_eq!(parse_amount("3 Lakhs").unwrap(), dec!(300000));
        assert_eq!(parse_amount("1.2Cr").unwrap(), dec!(12000000));
        assert_eq!(parse_amount("150k").unwrap(), dec!(150000));
    }

    #[test]
    fn parse_amount_empty_is_zero() {
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(matches!(parse_amount("twelve"), Err(ParseAmountError::Format(_))));
        assert!(matches!(parse_amount("-500"), Err(ParseAmountError::Format(_))));
        assert!(matches!(parse_amount("12 million"), Err(ParseAmountError::Format(_))));
    }

    #[test]
    fn parse_amount_reports_overflow_with_unit() {
        assert!(matches!(
            parse_amount("79228162514264337593543950335Cr"),
            Err(ParseAmountError::Overflow(input)) if input == "79228162514264337593543950335Cr"
        ));
        assert!(matches!(
            parse_amount("79228162514264337593543950335 lakh"),
            Err(ParseAmountError::Overflow(_))
        ));
        // the largest value still parses without a unit
        assert_eq!(
            parse_amount("79228162514264337593543950335").unwrap(),
            Decimal::MAX
        );
    }

    #[test]
    fn clamp_deduction_caps_above_limit() {
        assert_eq!(
            clamp_deduction(dec!(200000), dec!(150000), "deductions_80c"),
            dec!(150000)
        );
        assert_eq!(
            clamp_deduction(dec!(90000), dec!(150000), "deductions_80c"),
            dec!(90000)
        );
    }

    #[test]
    fn format_inr_groups_indian_style() {
        assert_eq!(format_inr(dec!(0)), "₹0.00");
        assert_eq!(format_inr(dec!(999)), "₹999.00");
        assert_eq!(format_inr(dec!(1000)), "₹1,000.00");
        assert_eq!(format_inr(dec!(1200000)), "₹12,00,000.00");
        assert_eq!(format_inr(dec!(62400.156)), "₹62,400.16");
        assert_eq!(format_inr(dec!(123456789)), "₹12,34,56,789.00");
    }

    #[test]
    fn format_inr_keeps_sign_in_front() {
        assert_eq!(format_inr(dec!(-179400)), "-₹1,79,400.00");
    }
}
