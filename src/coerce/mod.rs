//! Total coercion of loosely-typed JSON scalars into model values
//!
//! None of these functions fail. Anything that cannot be understood as the
//! requested kind of value becomes "absent" (`None` / `false`).

pub mod fields;

#[cfg(test)]
mod property_tests;

pub use fields::*;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use std::ops::RangeInclusive;

/// Valid character level range run bounds are clamped into
pub const LEVEL_RANGE: RangeInclusive<f64> = 1.0..=99.0;

/// Decimal number grammar accepted from text input
static NUMERIC_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").expect("numeric grammar is valid")
});

/// Parse an optional number from a raw JSON value.
///
/// Finite JSON numbers pass through unchanged and numeric strings are parsed
/// after trimming. `null`, empty strings, non-numeric strings, booleans,
/// arrays and objects all yield `None`.
pub fn parse_optional_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_number_text(s),
        _ => None,
    }
}

/// Parse an optional number from text typed into an input field
pub fn parse_number_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || !NUMERIC_TEXT.is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Drop NaN and infinities, which have no wire form
#[inline]
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Normalize a run level bound: round to the nearest whole level and clamp
/// into [`LEVEL_RANGE`]. `None` and non-finite values come out as `None`.
#[inline]
pub fn normalize_run_numeric_value(value: Option<f64>) -> Option<f64> {
    finite(value).map(|v| v.round().clamp(*LEVEL_RANGE.start(), *LEVEL_RANGE.end()))
}

/// Truthiness of a raw JSON value: `null`, `false`, `0`, `NaN` and `""` are
/// false, everything else (including empty arrays and objects) is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce an optional raw value into a strict boolean
#[inline]
pub fn coerce_bool(value: Option<&Value>) -> bool {
    value.is_some_and(is_truthy)
}

/// Wire representation of a model number.
///
/// Whole numbers are written as JSON integers so levels stay `24`, not
/// `24.0`.
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Serde adapter writing optional numbers through [`number_value`]
pub(crate) fn serialize_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::Serialize;
    match value {
        Some(v) => number_value(*v).serialize(serializer),
        None => serializer.serialize_none(),
    }
}
