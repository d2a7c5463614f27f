//! Text formatting for report values.

use cl_math::Measure;

/// Decimal places for physical quantities.
pub const DECIMALS: usize = 4;
/// Decimal places for the absolute errors in the verification table.
pub const ERROR_DECIMALS: usize = 8;
/// Spreadsheet number format matching [`DECIMALS`].
pub const NUMBER_FORMAT: &str = "0.0000";

/// Fixed-point text. Negative zero prints without a sign.
pub fn fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// `value` with [`DECIMALS`] places and a unit, e.g. `2.0000 J`.
pub fn quantity(value: f64, unit: &str) -> String {
    with_unit(fixed(value, DECIMALS), unit)
}

/// A [`Measure`] with [`DECIMALS`] places and a unit, or `N/A`.
pub fn measure(value: Measure, unit: &str) -> String {
    match value.value() {
        Some(v) => quantity(v, unit),
        None => not_available(),
    }
}

/// A percentage [`Measure`], e.g. `99.0000%`, or `N/A`.
pub fn percent(value: Measure) -> String {
    match value.value() {
        Some(v) => format!("{}%", fixed(v, DECIMALS)),
        None => not_available(),
    }
}

/// Shortest text that round-trips, as typed by the user (`1`, `0.5`).
pub fn plain(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

pub fn not_available() -> String {
    "N/A".to_string()
}

fn with_unit(number: String, unit: &str) -> String {
    if unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(0.02, 4), "0.0200");
        assert_eq!(fixed(-0.00001, 4), "0.0000");
        assert_eq!(fixed(-1.5, 4), "-1.5000");
        assert_eq!(fixed(0.02, 8), "0.02000000");
    }

    #[test]
    fn test_quantity_and_measure() {
        assert_eq!(quantity(2.0, "kg"), "2.0000 kg");
        assert_eq!(quantity(1.0, ""), "1.0000");
        assert_eq!(measure(Measure::Value(1.0), "m/s"), "1.0000 m/s");
        assert_eq!(measure(Measure::Indeterminate, "J/kg"), "N/A");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(Measure::Value(99.0)), "99.0000%");
        assert_eq!(percent(Measure::Value(100.0)), "100.0000%");
        assert_eq!(percent(Measure::Indeterminate), "N/A");
    }

    #[test]
    fn test_plain() {
        assert_eq!(plain(1.0), "1");
        assert_eq!(plain(0.5), "0.5");
        assert_eq!(plain(-0.0), "0");
        assert_eq!(plain(-2.25), "-2.25");
    }
}
