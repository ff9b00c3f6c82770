//! Lenient parsing of form entries.
//!
//! Nothing is rejected here. A numeric field that does not parse becomes NaN
//! and is stored as such; JSON has no NaN, so it is written as `null` and
//! [`lenient_f64`] reads that back as NaN.

use serde::{Deserialize, Deserializer};

/// Parses a money-like entry, yielding NaN for anything non-numeric.
///
/// ```rust
/// use dashboard_store::form::parse_number;
///
/// assert_eq!(parse_number(" 19.99 "), 19.99);
/// assert!(parse_number("abc").is_nan());
/// ```
pub fn parse_number(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses a whole-number entry such as a stock count.
///
/// Fractional input is truncated toward zero. Anything non-numeric is NaN,
/// like any other numeric form field.
///
/// ```rust
/// use dashboard_store::form::parse_count;
///
/// assert_eq!(parse_count("3.9"), 3.0);
/// assert!(parse_count("lots").is_nan());
/// ```
pub fn parse_count(input: &str) -> f64 {
    let trimmed = input.trim();
    if let Ok(count) = trimmed.parse::<i64>() {
        return count as f64;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value.trunc(),
        _ => f64::NAN,
    }
}

/// Deserializes an `f64` that may have been persisted as `null`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
