//! Number formatting helpers
//!
//! Shared by render descriptions and terminal widgets.

/// Maximum fraction digits kept when a value is not integral
const MAX_FRACTION_DIGITS: usize = 3;

/// Group the integer digits of a non-negative integer string with commas
fn group_digits(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a value with thousands separators
///
/// Integral values print without a fraction; other values keep up to three
/// fraction digits with trailing zeros trimmed. Non-finite values print as-is.
///
/// # Examples
///
/// ```
/// use diagram_engine::util::format_number;
///
/// assert_eq!(format_number(2500.0), "2,500");
/// assert_eq!(format_number(1234567.0), "1,234,567");
/// assert_eq!(format_number(1234.5), "1,234.5");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let negative = value < 0.0;
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(2000.0), "2,000");
        assert_eq!(format_number(123456.0), "123,456");
        assert_eq!(format_number(1234567.0), "1,234,567");
    }

    #[test]
    fn test_format_number_fraction() {
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(2.0004), "2");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-1500.0), "-1,500");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
