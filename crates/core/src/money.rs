//! Currency helpers.
//!
//! Amounts are plain `f64` major units (dollars). These helpers cover display
//! and the rounding rule shared by margin and gateway conversions.

/// Round to the nearest integer, halves toward positive infinity.
///
/// `2.5 -> 3`, `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Convert a major-unit amount to minor units (cents).
pub fn to_minor_units(amount: f64) -> i64 {
    round_half_up(amount * 100.0) as i64
}

/// Format as `$1,234.56`: two decimals, comma thousands grouping.
///
/// Locale-naive (always en-US style). Negative amounts render as `-$12.50`.
pub fn format_currency(value: f64) -> String {
    let cents = to_minor_units(value.abs());
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_grouping_and_two_decimals() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1_234_567.8), "$1,234,567.80");
        assert_eq!(format_currency(12.5), "$12.50");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside_the_symbol() {
        assert_eq!(format_currency(-12.5), "-$12.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(39.4), 39.0);
    }

    #[test]
    fn minor_units_round_to_the_nearest_cent() {
        assert_eq!(to_minor_units(10.0), 1000);
        assert_eq!(to_minor_units(19.99), 1999);
        assert_eq!(to_minor_units(0.125), 13);
    }
}
