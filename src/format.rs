//! Display helpers for KPI tiles and tables.
//!
//! Rounding is half away from zero everywhere (`2_500` renders as `Rp 3K`,
//! `1_250_000` as `Rp 1.3M`), independent of float formatting quirks.

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::data::records::parse_decimal;

pub const CURRENCY_SYMBOL: &str = "Rp";
pub const DEFAULT_PERCENT_DECIMALS: usize = 1;

const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Compact Rupiah amount: millions with one decimal, thousands without
/// decimals, anything smaller as a whole number.
pub fn format_currency(value: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);

    if value >= million {
        format!("{} {:.1}M", CURRENCY_SYMBOL, (value / million).round_dp_with_strategy(1, ROUNDING))
    } else if value >= thousand {
        format!("{} {:.0}K", CURRENCY_SYMBOL, (value / thousand).round_dp_with_strategy(0, ROUNDING))
    } else {
        format!("{} {:.0}", CURRENCY_SYMBOL, value.round_dp_with_strategy(0, ROUNDING))
    }
}

/// Like [`format_currency`] for a raw cell; text that is not a number is
/// returned unchanged.
pub fn format_currency_text(raw: &str) -> String {
    match parse_decimal(raw.trim()) {
        Some(value) => format_currency(value),
        None => raw.to_string(),
    }
}

/// Whole number with thousands separators, e.g. `1,234,568`.
pub fn format_number<V: Into<Decimal>>(value: V) -> String {
    let rounded = value.into().round_dp_with_strategy(0, ROUNDING);
    match rounded.to_i128() {
        Some(whole) => whole.to_formatted_string(&Locale::en),
        None => rounded.to_string(),
    }
}

pub fn format_percentage(value: f64) -> String {
    format_percentage_dp(value, DEFAULT_PERCENT_DECIMALS)
}

pub fn format_percentage_dp(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Percentage of a raw cell; non-numeric text passes through.
pub fn format_percentage_text(raw: &str, decimals: usize) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format_percentage_dp(value, decimals),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn currency_scales() {
        assert_eq!(format_currency(dec!(1500000)), "Rp 1.5M");
        assert_eq!(format_currency(dec!(176500000)), "Rp 176.5M");
        assert_eq!(format_currency(dec!(2000000)), "Rp 2.0M");
        assert_eq!(format_currency(dec!(45200)), "Rp 45K");
        assert_eq!(format_currency(dec!(999)), "Rp 999");
        assert_eq!(format_currency(dec!(0)), "Rp 0");
    }

    #[test]
    fn currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(2500)), "Rp 3K");
        assert_eq!(format_currency(dec!(3500)), "Rp 4K");
        assert_eq!(format_currency(dec!(1250000)), "Rp 1.3M");
        assert_eq!(format_currency(dec!(999.5)), "Rp 1000");
    }

    #[test]
    fn currency_text_passes_through_non_numbers() {
        assert_eq!(format_currency_text("1500000"), "Rp 1.5M");
        assert_eq!(format_currency_text("N/A"), "N/A");
    }

    #[test]
    fn numbers_are_grouped() {
        assert_eq!(format_number(dec!(1234567.5)), "1,234,568");
        assert_eq!(format_number(951u32), "951");
        assert_eq!(format_number(0i64), "0");
        assert_eq!(format_number(-12345i64), "-12,345");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percentage(42.27), "42.3%");
        assert_eq!(format_percentage(12.0), "12.0%");
        assert_eq!(format_percentage(12.25), "12.2%");
        assert_eq!(format_percentage_dp(33.333, 2), "33.33%");
        assert_eq!(format_percentage_dp(7.0, 0), "7%");
        assert_eq!(format_percentage_text("18.76", 1), "18.8%");
        assert_eq!(format_percentage_text("n/a", 1), "n/a");
    }
}
