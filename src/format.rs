//! Display formatting for money and percentages.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Currency suffix used across the app.
pub const CURRENCY: &str = "EGP";

/// Whole-unit amount with thousands separators: `125,750 EGP`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{} {CURRENCY}", group_thousands(&digits))
}

/// Signed percentage with two decimals: `+0.26%`, `-1.50%`.
pub fn format_percent(value: Decimal) -> String {
    let sign = if value >= Decimal::ZERO { "+" } else { "" };
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{sign}{rounded:.2}%")
}

/// Compact amount: `850.0M EGP`, `1.2B EGP`, `2.5K EGP`, `500 EGP`.
pub fn format_compact_currency(amount: Decimal) -> String {
    let (scaled, suffix) = if amount >= dec!(1_000_000_000) {
        (amount / dec!(1_000_000_000), "B")
    } else if amount >= dec!(1_000_000) {
        (amount / dec!(1_000_000), "M")
    } else if amount >= dec!(1_000) {
        (amount / dec!(1_000), "K")
    } else {
        return format!("{} {CURRENCY}", amount.normalize());
    };
    let rounded = scaled.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}{suffix} {CURRENCY}")
}

/// Plain count with thousands separators: `47,892`.
pub fn format_count(n: u32) -> String {
    group_thousands(&n.to_string())
}

/// Return range as `min-max%`.
pub fn format_range(min: Decimal, max: Decimal) -> String {
    format!("{}-{}%", min.normalize(), max.normalize())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(125750)), "125,750 EGP");
        assert_eq!(format_currency(dec!(500)), "500 EGP");
        assert_eq!(format_currency(dec!(1000)), "1,000 EGP");
        assert_eq!(format_currency(dec!(850000000)), "850,000,000 EGP");
    }

    #[test]
    fn currency_rounds_to_whole_units() {
        assert_eq!(format_currency(dec!(37724.5)), "37,725 EGP");
        assert_eq!(format_currency(dec!(0.4)), "0 EGP");
    }

    #[test]
    fn currency_keeps_negative_sign() {
        assert_eq!(format_currency(dec!(-1250)), "-1,250 EGP");
    }

    #[test]
    fn percent_is_signed() {
        assert_eq!(format_percent(dec!(0.26)), "+0.26%");
        assert_eq!(format_percent(dec!(0)), "+0.00%");
        assert_eq!(format_percent(dec!(-1.5)), "-1.50%");
        assert_eq!(format_percent(dec!(9.347)), "+9.35%");
    }

    #[test]
    fn compact_currency_scales() {
        assert_eq!(format_compact_currency(dec!(850000000)), "850.0M EGP");
        assert_eq!(format_compact_currency(dec!(1250000000)), "1.3B EGP");
        assert_eq!(format_compact_currency(dec!(2500)), "2.5K EGP");
        assert_eq!(format_compact_currency(dec!(500)), "500 EGP");
    }

    #[test]
    fn counts_group_thousands() {
        assert_eq!(format_count(47892), "47,892");
        assert_eq!(format_count(892), "892");
        assert_eq!(format_count(0), "0");
    }

    #[test]
    fn range_drops_trailing_zeros() {
        assert_eq!(format_range(dec!(20), dec!(24)), "20-24%");
        assert_eq!(format_range(dec!(16.0), dec!(20.50)), "16-20.5%");
    }
}
