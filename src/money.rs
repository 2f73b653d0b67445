//! Rate value parsing
//!
//! Converts the client-facing rate values of the admin API into
//! [`ExchangeRate`]. Values arrive already scaled by
//! [`crate::core_types::EXCHANGE_RATE_SCALE`], so the only accepted inputs
//! are non-negative integers: a JSON integer, or a numeric string whose
//! value is integral (`"100"`, `"100.0"`).
//!
//! JSON floats are rejected outright, even integral ones: by the time
//! they reach us they may already have been rounded through `f64`.
//! Strings are checked digit by digit, then converted with `rust_decimal`.

use rust_decimal::prelude::*;
use serde_json::Value;
use thiserror::Error;

use crate::core_types::ExchangeRate;

/// Integers up to this many digits always fit a `Decimal` mantissa
const MAX_DECIMAL_DIGITS: usize = 28;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("rate must not be negative")]
    Negative,

    #[error("rate must be an integer amount in scaled units, got {0}")]
    Fractional(String),

    #[error("rate too large, would overflow")]
    Overflow,

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("expected a number or numeric string, got {0}")]
    InvalidType(&'static str),
}

// ============================================================================
// Parse: Client → Internal
// ============================================================================

/// Parse a JSON rate value into a scaled [`ExchangeRate`].
///
/// # Example
/// ```
/// use fee_rates::money::parse_rate_value;
/// use serde_json::json;
///
/// assert_eq!(parse_rate_value(&json!(100)).unwrap().scaled_value(), 100);
/// assert_eq!(parse_rate_value(&json!("2500")).unwrap().scaled_value(), 2500);
/// assert!(parse_rate_value(&json!("1.5")).is_err());
/// ```
pub fn parse_rate_value(value: &Value) -> Result<ExchangeRate, MoneyError> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return Ok(ExchangeRate::from_scaled(v));
            }
            if n.as_i64().is_some() {
                return Err(MoneyError::Negative);
            }
            // Anything else was read as f64 and may already be rounded
            match n.as_f64() {
                Some(f) if f < 0.0 => Err(MoneyError::Negative),
                Some(f) if f.fract() == 0.0 && f >= u64::MAX as f64 => Err(MoneyError::Overflow),
                _ => Err(MoneyError::InvalidFormat(format!(
                    "JSON number must be an integer, got {}",
                    n
                ))),
            }
        }
        Value::String(s) => parse_rate_str(s),
        Value::Null => Err(MoneyError::InvalidType("null")),
        Value::Bool(_) => Err(MoneyError::InvalidType("boolean")),
        Value::Array(_) => Err(MoneyError::InvalidType("array")),
        Value::Object(_) => Err(MoneyError::InvalidType("object")),
    }
}

/// Parse a numeric string rate.
///
/// Accepts `digits` or `digits.zeros`. Rejects explicit `+`, `.5`/`5.`
/// forms, exponents and any other character.
pub fn parse_rate_str(rate_str: &str) -> Result<ExchangeRate, MoneyError> {
    let s = rate_str.trim();
    if s.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }
    if s.starts_with('-') {
        return Err(MoneyError::Negative);
    }
    if s.starts_with('+') {
        return Err(MoneyError::InvalidFormat(format!("explicit sign: {}", s)));
    }
    if s.contains(['e', 'E']) {
        return Err(MoneyError::InvalidFormat(format!(
            "scientific notation: {}",
            s
        )));
    }
    if s.starts_with('.') || s.ends_with('.') {
        return Err(MoneyError::InvalidFormat(format!("dangling dot: {}", s)));
    }

    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || !is_digits(frac_part) {
        return Err(MoneyError::InvalidFormat(s.to_string()));
    }
    // Checked on the text: Decimal rounds away digits past its scale
    if frac_part.bytes().any(|b| b != b'0') {
        return Err(MoneyError::Fractional(s.to_string()));
    }

    let int_part = int_part.trim_start_matches('0');
    if int_part.len() > MAX_DECIMAL_DIGITS {
        return Err(MoneyError::Overflow);
    }
    if int_part.is_empty() {
        return Ok(ExchangeRate::from_scaled(0));
    }

    let decimal = Decimal::from_str(int_part).map_err(|e| match e {
        rust_decimal::Error::ExceedsMaximumPossibleValue => MoneyError::Overflow,
        other => MoneyError::InvalidFormat(format!("{}: {}", s, other)),
    })?;

    decimal
        .to_u64()
        .map(ExchangeRate::from_scaled)
        .ok_or(MoneyError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_integer_values() {
        assert_eq!(parse_rate_value(&json!(0)).unwrap().scaled_value(), 0);
        assert_eq!(parse_rate_value(&json!(100)).unwrap().scaled_value(), 100);
        assert_eq!(
            parse_rate_value(&json!(u64::MAX)).unwrap().scaled_value(),
            u64::MAX
        );
    }

    #[test]
    fn test_parse_numeric_strings() {
        assert_eq!(parse_rate_value(&json!("100")).unwrap().scaled_value(), 100);
        assert_eq!(parse_rate_value(&json!(" 42 ")).unwrap().scaled_value(), 42);
        assert_eq!(parse_rate_value(&json!("100.0")).unwrap().scaled_value(), 100);
        assert_eq!(
            parse_rate_value(&json!("007")).unwrap().scaled_value(),
            7
        );
    }

    #[test]
    fn test_reject_json_floats() {
        // Floats are rejected even when integral: f64 may have rounded them
        let cases = ["100.0", "0.99999999999999999", "9007199254740993.0", "1e2"];
        for case in cases {
            let value: Value = serde_json::from_str(case).unwrap();
            assert!(
                matches!(parse_rate_value(&value), Err(MoneyError::InvalidFormat(_))),
                "Should reject JSON float: {}",
                case
            );
        }
    }

    #[test]
    fn test_json_integer_beyond_u64_overflows() {
        let value: Value = serde_json::from_str("18446744073709551616").unwrap();
        assert_eq!(parse_rate_value(&value), Err(MoneyError::Overflow));
        let value: Value = serde_json::from_str("-18446744073709551616").unwrap();
        assert_eq!(parse_rate_value(&value), Err(MoneyError::Negative));
    }

    #[test]
    fn test_reject_negative() {
        assert_eq!(parse_rate_value(&json!(-5)), Err(MoneyError::Negative));
        assert_eq!(parse_rate_value(&json!("-5")), Err(MoneyError::Negative));
    }

    #[test]
    fn test_reject_fractional() {
        assert!(matches!(
            parse_rate_value(&json!(1.5)),
            Err(MoneyError::InvalidFormat(_))
        ));
        // Beyond Decimal's scale: must not round to 1
        assert_eq!(
            parse_rate_str("1.00000000000000000000000000001"),
            Err(MoneyError::Fractional("1.00000000000000000000000000001".to_string()))
        );
        assert_eq!(parse_rate_str("1.000000000000000000000000000000").unwrap().scaled_value(), 1);
        assert!(matches!(
            parse_rate_value(&json!("1.5")),
            Err(MoneyError::Fractional(_))
        ));
    }

    #[test]
    fn test_reject_invalid_formats() {
        let cases = ["", "abc", "1,000", "1e8", "+5", ".5", "5.", "0x10", "1.2.3"];
        for case in cases {
            assert!(
                parse_rate_str(case).is_err(),
                "Should reject invalid format: {:?}",
                case
            );
        }
    }

    #[test]
    fn test_reject_overflow() {
        assert_eq!(
            parse_rate_str("18446744073709551616"),
            Err(MoneyError::Overflow)
        );
        // Too many digits for Decimal
        assert_eq!(parse_rate_str(&"9".repeat(40)), Err(MoneyError::Overflow));
        assert_eq!(parse_rate_str("000000000000000000000000000000042").unwrap().scaled_value(), 42);
        assert_eq!(parse_rate_str("0.000").unwrap().scaled_value(), 0);
    }

    #[test]
    fn test_reject_non_numeric_types() {
        assert_eq!(
            parse_rate_value(&json!(null)),
            Err(MoneyError::InvalidType("null"))
        );
        assert_eq!(
            parse_rate_value(&json!(true)),
            Err(MoneyError::InvalidType("boolean"))
        );
        assert_eq!(
            parse_rate_value(&json!([1])),
            Err(MoneyError::InvalidType("array"))
        );
        assert_eq!(
            parse_rate_value(&json!({"v": 1})),
            Err(MoneyError::InvalidType("object"))
        );
    }
}
