//! Formatting utilities for dates, decimals, percentages and currency values.
//!
//! Every number shown to the user goes through this module so the metric cards,
//! the equity chart tooltip and the trade table agree on one convention:
//! two decimal places, half-away-from-zero rounding, `,` thousands separators
//! and a `$` currency prefix.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{GuruError, GuruResult};
use crate::types::DecimalExt;

/// Currency symbol used for every monetary value.
pub const CURRENCY_SYMBOL: &str = "$";

/// Date format used on the wire and in the input form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
///
/// # Examples
///
/// ```
/// use guru_core::format::parse_date;
///
/// assert!(parse_date("2024-02-29").is_ok());
/// assert!(parse_date("2024/02/29").is_err());
/// ```
pub fn parse_date(s: &str) -> GuruResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| GuruError::InvalidInput(format!("잘못된 날짜 형식: {} (YYYY-MM-DD)", s)))
}

/// Formats a date as `YYYY-MM-DD`.
#[inline]
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a decimal value with the specified precision, rounding half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use guru_core::format::format_decimal;
///
/// assert_eq!(format_decimal(&dec!(1.456), 2), "1.46");
/// assert_eq!(format_decimal(&dec!(3), 2), "3.00");
/// ```
#[inline]
pub fn format_decimal(value: &Decimal, precision: u32) -> String {
    let rounded = normalize_zero(value.round_display(precision));
    format!("{:.prec$}", rounded, prec = precision as usize)
}

/// Formats a percentage value (already scaled, `12.5` means 12.5%) with an explicit sign.
///
/// Non-negative values get a `+` prefix.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use guru_core::format::format_percent;
///
/// assert_eq!(format_percent(&dec!(2.0)), "+2.00%");
/// assert_eq!(format_percent(&dec!(-3.456)), "-3.46%");
/// assert_eq!(format_percent(&dec!(0)), "+0.00%");
/// ```
pub fn format_percent(value: &Decimal) -> String {
    let rounded = normalize_zero(value.round_display(2));
    let sign = if rounded.is_non_negative() { "+" } else { "" };
    format!("{}{:.2}%", sign, rounded)
}

/// Formats a monetary value with thousands separators and the currency symbol.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use guru_core::format::format_currency;
///
/// assert_eq!(format_currency(&dec!(10500)), "$10,500.00");
/// assert_eq!(format_currency(&dec!(-1234.567)), "-$1,234.57");
/// ```
pub fn format_currency(value: &Decimal) -> String {
    let rounded = normalize_zero(value.round_display(2));
    let formatted = format!("{:.2}", rounded.abs());

    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!(
        "{}{}{}.{}",
        sign,
        CURRENCY_SYMBOL,
        group_thousands(integer_part),
        decimal_part
    )
}

/// Inserts `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Rounding a tiny negative value can leave a negative zero behind.
fn normalize_zero(value: Decimal) -> Decimal {
    if value.is_zero() {
        Decimal::ZERO
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_and_format_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(format_date(&date), "2024-01-15");
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(&dec!(1.456), 2), "1.46");
        assert_eq!(format_decimal(&dec!(-0.004), 2), "0.00");
        assert_eq!(format_decimal(&dec!(100), 0), "100");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(&dec!(-3.456)), "-3.46%");
        assert_eq!(format_percent(&dec!(2.0)), "+2.00%");
        assert_eq!(format_percent(&dec!(55)), "+55.00%");
        assert_eq!(format_percent(&dec!(-0.001)), "+0.00%");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(&dec!(0)), "$0.00");
        assert_eq!(format_currency(&dec!(12)), "$12.00");
        assert_eq!(format_currency(&dec!(1234)), "$1,234.00");
        assert_eq!(format_currency(&dec!(123456789.125)), "$123,456,789.13");
        assert_eq!(format_currency(&dec!(-500.5)), "-$500.50");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1000000"), "1,000,000");
    }

    proptest! {
        #[test]
        fn prop_percent_sign_matches_value(cents in -10_000_000i64..10_000_000i64) {
            let value = Decimal::new(cents, 2);
            let text = format_percent(&value);

            prop_assert!(text.ends_with('%'));
            if cents >= 0 {
                prop_assert!(text.starts_with('+'));
            } else {
                prop_assert!(text.starts_with('-'));
            }
        }

        #[test]
        fn prop_currency_has_two_decimals(cents in -10_000_000_000i64..10_000_000_000i64) {
            let value = Decimal::new(cents, 2);
            let text = format_currency(&value);
            let (_, decimals) = text.rsplit_once('.').unwrap();

            prop_assert_eq!(decimals.len(), 2);
            prop_assert!(text.trim_start_matches('-').starts_with(CURRENCY_SYMBOL));
        }
    }
}
