//! Number formatting and parsing.
//!
//! Numbers travel through the calculator as text in the same shape a
//! browser would print them, so results, history entries and the pending
//! expression all agree on one spelling.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Longest numeric prefix accepted by `parse_float`.
    static ref FLOAT_PREFIX: Regex = Regex::new(
        r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)"
    ).unwrap();
}

/// Convert a number to its canonical text form.
///
/// Uses the shortest digit string that round-trips, printed in plain
/// decimal notation for magnitudes in `[1e-7, 1e21)` and in exponent
/// notation (`1e+21`, `1.5e-7`) outside that range.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = decompose(&format!("{:e}", value.abs()));
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        exponent_form(&digits, n - 1)
    };

    format!("{}{}", sign, body)
}

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped. Returns NaN when no prefix is a number,
/// so garbage input never raises an error.
pub fn parse_float(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(m) = FLOAT_PREFIX.find(trimmed) else {
        return f64::NAN;
    };

    let literal = m.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => literal.parse().unwrap_or(f64::NAN),
    }
}

/// Format a result for the display.
///
/// Very large or very small magnitudes switch to exponent notation with six
/// fraction digits. Long texts are cut to ten significant digits. Anything
/// else is shown exactly as entered.
pub fn format_display(text: &str, max_digits: usize) -> String {
    let value = parse_float(text);

    if value.abs() > 1e10 || (value.abs() < 1e-6 && value != 0.0) {
        return to_exponential(value, 6);
    }

    if text.chars().count() > max_digits {
        return to_precision(value, 10);
    }

    text.to_string()
}

/// Format `value` in exponent notation with `fraction_digits` after the point.
///
/// The exact binary value is rounded, with ties going away from zero.
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = significant_digits(value.abs(), fraction_digits + 1);
    format!("{}{}", sign, exponent_form(&digits, exponent))
}

/// Format `value` with `precision` significant digits.
///
/// Plain notation is used unless the exponent falls outside
/// `[-6, precision)`. Rounding follows [`to_exponential`].
pub fn to_precision(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }
    let precision = precision.max(1);

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = significant_digits(value.abs(), precision);

    let body = if exponent < -6 || exponent >= precision as i32 {
        exponent_form(&digits, exponent)
    } else if exponent >= 0 {
        let (int_part, frac_part) = digits.split_at(exponent as usize + 1);
        if frac_part.is_empty() {
            int_part.to_string()
        } else {
            format!("{}.{}", int_part, frac_part)
        }
    } else {
        format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
    };

    format!("{}{}", sign, body)
}

/// Format `value` in plain notation with exactly `decimals` fraction digits.
///
/// Magnitudes of `1e21` and above fall back to [`number_to_string`].
pub fn to_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return number_to_string(value);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let all_digits = format!("{}{}", int_part, frac_part);
    let (digits, carried) = round_half_up(&all_digits, int_part.len() + decimals);
    let (int_digits, frac_digits) = digits.split_at(int_part.len() + usize::from(carried));

    let sign = if value < 0.0 { "-" } else { "" };
    if decimals == 0 {
        format!("{}{}", sign, int_digits)
    } else {
        format!("{}{}.{}", sign, int_digits, frac_digits)
    }
}

/// Round `value` to `decimals` fraction digits through [`to_fixed`].
pub fn round_to(value: f64, decimals: u32) -> f64 {
    to_fixed(value, decimals as usize).parse().unwrap_or(value)
}

/// Insert thousand separators into the integer part of a plain decimal.
///
/// Exponent forms and non-numbers are returned unchanged.
pub fn group_digits(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return text.to_string();
    }
    if frac_part.is_some_and(|f| !f.chars().all(|c| c.is_ascii_digit())) {
        return text.to_string();
    }

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Split a Rust `{:e}` rendering into its significant digits and exponent.
fn decompose(scientific: &str) -> (String, i32) {
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let digits = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exponent.parse().unwrap_or(0))
}

/// Enough digits to print any `f64` exactly in exponent notation.
const EXACT_SIGNIFICANT_DIGITS: usize = 800;
/// Enough fraction digits to print any `f64` exactly in plain notation.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// The first `count` significant digits of `magnitude`, rounded half up,
/// and the decimal exponent of the first digit.
fn significant_digits(magnitude: f64, count: usize) -> (String, i32) {
    let (exact, exponent) = decompose(&format!("{:.*e}", EXACT_SIGNIFICANT_DIGITS, magnitude));
    let (digits, carried) = round_half_up(&exact, count);
    if carried {
        (digits[..count].to_string(), exponent + 1)
    } else {
        (digits, exponent)
    }
}

/// Keep the first `keep` digits of an exact digit string, rounding half up.
///
/// The flag is set when the carry produced a new leading digit, in which
/// case the result is one digit longer.
fn round_half_up(digits: &str, keep: usize) -> (String, bool) {
    let mut kept: Vec<u8> = digits.bytes().take(keep).collect();
    kept.resize(keep, b'0');

    let mut carried = false;
    if digits.as_bytes().get(keep).is_some_and(|d| *d >= b'5') {
        carried = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carried = false;
                break;
            }
        }
        if carried {
            kept.insert(0, b'1');
        }
    }

    (kept.into_iter().map(char::from).collect(), carried)
}

fn exponent_form(digits: &str, exponent: i32) -> String {
    let (first, rest) = digits.split_at(1);
    let sign = if exponent >= 0 { '+' } else { '-' };
    if rest.is_empty() {
        format!("{}e{}{}", first, sign, exponent.abs())
    } else {
        format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(120.0), "120");
        assert_eq!(number_to_string(-42.0), "-42");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(number_to_string(0.5), "0.5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_to_string(12.25), "12.25");
        assert_eq!(number_to_string(0.000001), "0.000001");
    }

    #[test]
    fn test_exponent_forms() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e300), "1.5e+300");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(-2.5e-8), "-2.5e-8");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_parse_float_prefixes() {
        assert_eq!(parse_float("42"), 42.0);
        assert_eq!(parse_float("  3.5abc"), 3.5);
        assert_eq!(parse_float("0."), 0.0);
        assert_eq!(parse_float(".25"), 0.25);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("").is_nan());
    }

    #[test]
    fn test_display_passthrough() {
        assert_eq!(format_display("123", 12), "123");
        assert_eq!(format_display("0.", 12), "0.");
        assert_eq!(format_display("0", 12), "0");
    }

    #[test]
    fn test_display_exponent() {
        assert_eq!(format_display("12345678901", 12), "1.234568e+10");
        assert_eq!(format_display("0.0000001", 12), "1.000000e-7");
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format_display("0.30000000000000004", 12), "0.3000000000");
        assert_eq!(format_display("3.14159265358979", 12), "3.141592654");
        assert_eq!(format_display("NaN", 12), "NaN");
    }

    #[test]
    fn test_to_precision_small() {
        assert_eq!(to_precision(0.000123456789012, 10), "0.0001234567890");
        assert_eq!(to_precision(0.0, 10), "0.000000000");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(to_exponential(12345665000.0, 6), "1.234567e+10");
        assert_eq!(to_exponential(-2.5, 0), "-3e+0");
        assert_eq!(to_precision(-12345678.125, 10), "-12345678.13");
        assert_eq!(format_display("12345665000", 12), "1.234567e+10");
        assert_eq!(format_display("-12345678.125", 12), "-12345678.13");
    }

    #[test]
    fn test_near_ties_follow_the_binary_value() {
        // 0.15 is stored slightly below the tie.
        assert_eq!(to_precision(0.15, 1), "0.1");
        // 1e-7 is stored slightly below and rounds up across a digit.
        assert_eq!(to_exponential(1e-7, 6), "1.000000e-7");
        assert_eq!(to_precision(9.9999999999, 10), "10.00000000");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(273.195, 2), "273.19");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(99.995, 0), "100");
        assert_eq!(to_fixed(-1.5, 0), "-2");
        assert_eq!(to_fixed(0.0, 3), "0.000");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.54000000001, 10), 2.54);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-1.005, 0), -1.0);
    }

    #[test]
    fn test_thousand_separators() {
        assert_eq!(group_digits("1000000"), "1,000,000");
        assert_eq!(group_digits("-1234.5678"), "-1,234.5678");
        assert_eq!(group_digits("999"), "999");
        assert_eq!(group_digits("1.5e+21"), "1.5e+21");
        assert_eq!(group_digits("NaN"), "NaN");
    }
}
