//! Numeric coercion for store values.
//!
//! Anything that does not parse to a finite number becomes a missing value;
//! coercion never fails.

use serde_json::Value;

/// Parse a string value to a finite `f64`.
///
/// Handles surrounding whitespace, signs, decimals and scientific notation.
/// Returns None for empty, malformed, NaN or infinite values.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Coerce a JSON value (number or numeric text) to a finite `f64`.
pub fn json_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|parsed| parsed.is_finite()),
        Value::String(text) => parse_numeric(text),
        _ => None,
    }
}
