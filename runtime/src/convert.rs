//! Primitive conversions from text and the string built-ins.
//!
//! A malformed input sets `CastError` and yields the type's zero value.

use crate::fault::ErrorKind;
use crate::register;

/// Signed 32-bit decimal with an optional leading sign. Surrounding
/// whitespace is rejected.
pub fn string_to_int(text: &str) -> i32 {
    register::begin("string_to_int");
    text.parse::<i32>().unwrap_or_else(|e| {
        register::raise(
            "string_to_int",
            ErrorKind::CastError,
            &format_args!("{:?}: {}", text, e),
        );
        0
    })
}

/// 32-bit float in the language's literal syntax. Surrounding whitespace and
/// control characters are ignored. Accepts decimal with optional exponent,
/// hexadecimal with a binary exponent (`0x1.8p1`), the exact spellings
/// `Infinity` and `NaN` with an optional sign, and one trailing `f`/`F`/`d`/`D`
/// suffix on numeric forms.
pub fn string_to_float(text: &str) -> f32 {
    register::begin("string_to_float");
    parse_float_literal(text).unwrap_or_else(|| {
        register::raise(
            "string_to_float",
            ErrorKind::CastError,
            &format_args!("{:?} is not a float literal", text),
        );
        0.0
    })
}

fn parse_float_literal(text: &str) -> Option<f32> {
    let trimmed = text.trim_matches(|c: char| c <= ' ');
    let (negative, body) = match trimmed.as_bytes().first()? {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = match body {
        "Infinity" => f32::INFINITY,
        "NaN" => f32::NAN,
        _ => {
            let digits = body.strip_suffix(&['f', 'F', 'd', 'D'][..]).unwrap_or(body);
            match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
                Some(hex) => parse_hex_float(hex)?,
                None => parse_decimal(digits)?,
            }
        }
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Unsigned decimal: digits with an optional fraction and exponent.
fn parse_decimal(digits: &str) -> Option<f32> {
    let starts_ok = digits.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    let charset_ok = digits
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !starts_ok || !charset_ok {
        return None;
    }
    digits.parse::<f32>().ok()
}

/// Hex mantissa after the `0x` prefix, then a mandatory `p` exponent.
fn parse_hex_float(hex: &str) -> Option<f32> {
    let (mantissa, exponent) = hex.split_once(&['p', 'P'][..])?;
    let exponent: i64 = exponent.parse().ok()?;
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut value = 0f64;
    for c in whole.chars().chain(fraction.chars()) {
        value = value * 16.0 + f64::from(c.to_digit(16)?);
    }
    let scale = exponent.saturating_sub(4 * fraction.len() as i64);
    let scale = scale.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Some((value * 2f64.powi(scale)) as f32)
}

/// Exactly `"true"` or `"false"`.
pub fn string_to_bool(text: &str) -> bool {
    register::begin("string_to_bool");
    match text {
        "true" => true,
        "false" => false,
        _ => {
            register::raise(
                "string_to_bool",
                ErrorKind::CastError,
                &format_args!("{:?} is not a boolean literal", text),
            );
            false
        }
    }
}

pub fn string_concat(a: &str, b: &str) -> String {
    let mut out = String::with_capacity(a.len() + b.len());
    out.push_str(a);
    out.push_str(b);
    out
}

pub fn string_equal(a: &str, b: &str) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::last_error;

    #[test]
    fn test_int() {
        assert_eq!(string_to_int("42"), 42);
        assert_eq!(last_error(), ErrorKind::NoError);
        assert_eq!(string_to_int("-17"), -17);
        assert_eq!(string_to_int("+8"), 8);
        assert_eq!(string_to_int("2147483647"), i32::MAX);
    }

    #[test]
    fn test_int_malformed() {
        for bad in ["abc", "", " 1", "1 ", "1.5", "2147483648", "0x10"] {
            assert_eq!(string_to_int(bad), 0, "input {:?}", bad);
            assert_eq!(last_error(), ErrorKind::CastError, "input {:?}", bad);
        }
    }

    #[test]
    fn test_float() {
        let cases: [(&str, f32); 11] = [
            ("1.5", 1.5),
            (" -2e3 ", -2000.0),
            ("7", 7.0),
            (".25", 0.25),
            ("3.", 3.0),
            ("1.5f", 1.5),
            ("2d", 2.0),
            ("-4.5E-1F", -0.45),
            ("0x1p3", 8.0),
            ("0X1.8P1d", 3.0),
            ("0x.8p0", 0.5),
        ];
        for (text, expected) in cases {
            assert_eq!(string_to_float(text), expected, "input {:?}", text);
            assert_eq!(last_error(), ErrorKind::NoError, "input {:?}", text);
        }
    }

    #[test]
    fn test_float_special_spellings() {
        assert_eq!(string_to_float("Infinity"), f32::INFINITY);
        assert_eq!(string_to_float("-Infinity"), f32::NEG_INFINITY);
        assert!(string_to_float("+NaN").is_nan());
        assert_eq!(last_error(), ErrorKind::NoError);
    }

    #[test]
    fn test_float_malformed() {
        let bad = [
            "one", "", "  ", "inf", "INF", "infinity", "-inf", "nan", "NAN", "Infinityf",
            "1.5fd", "f", "--1", "+-1", "1e", "0x", "0x1", "0xp3", "0x1.8", "1,5",
        ];
        for text in bad {
            assert_eq!(string_to_float(text), 0.0, "input {:?}", text);
            assert_eq!(last_error(), ErrorKind::CastError, "input {:?}", text);
        }
    }

    #[test]
    fn test_bool() {
        assert!(string_to_bool("true"));
        assert_eq!(last_error(), ErrorKind::NoError);
        assert!(!string_to_bool("false"));
        assert_eq!(last_error(), ErrorKind::NoError);
    }

    #[test]
    fn test_bool_malformed() {
        for bad in ["True", "1", "yes", ""] {
            assert!(!string_to_bool(bad));
            assert_eq!(last_error(), ErrorKind::CastError);
        }
    }

    #[test]
    fn test_string_builtins() {
        assert_eq!(string_concat("graph", "rt"), "graphrt");
        assert_eq!(string_concat("", ""), "");
        assert!(string_equal("a", "a"));
        assert!(!string_equal("a", "A"));
    }
}
