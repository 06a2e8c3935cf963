//! Display helpers shared by the web dashboards and the operator CLI.
//!
//! Nothing here carries domain rules: these functions only turn amounts,
//! timestamps and small enumerations into the strings the panels render.

pub mod converters;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt::Display;

/// Currency symbol used for every amount on the platform.
pub const CURRENCY_SYMBOL: &str = "¥";

/// Short weekday labels indexed by `day_of_week` (0 = Sunday).
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Formats an amount as whole yen with thousands separators, e.g. `¥15,000`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}{}", CURRENCY_SYMBOL, grouped)
    } else {
        format!("{}{}", CURRENCY_SYMBOL, grouped)
    }
}

/// Formats a timestamp in the given zone as `YYYY-MM-DD HH:MM`.
pub fn format_datetime<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
}

/// Label for a `day_of_week` value, or `"?"` when it is out of range.
pub fn weekday_label(day_of_week: u8) -> &'static str {
    WEEKDAY_LABELS
        .get(day_of_week as usize)
        .copied()
        .unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(Decimal::from(15000)), "¥15,000");
        assert_eq!(format_currency(Decimal::from(999)), "¥999");
        assert_eq!(format_currency(Decimal::from(1_234_567)), "¥1,234,567");
        assert_eq!(format_currency(Decimal::ZERO), "¥0");
    }

    #[test]
    fn test_format_currency_rounds_fractional_yen() {
        assert_eq!(format_currency(Decimal::new(800050, 2)), "¥8,001");
        assert_eq!(format_currency(Decimal::new(-120000, 2)), "-¥1,200");
    }

    #[test]
    fn test_format_datetime_applies_zone() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 31, 20, 30, 0).unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(format_datetime(&ts, &Utc), "2024-01-31 20:30");
        assert_eq!(format_datetime(&ts, &tokyo), "2024-02-01 05:30");
    }

    #[test]
    fn test_weekday_label() {
        assert_eq!(weekday_label(0), "Sun");
        assert_eq!(weekday_label(6), "Sat");
        assert_eq!(weekday_label(7), "?");
    }
}
