//! Coercion of raw resolved values into requested shapes
//!
//! Every `resolve_*` function maps an absent input to an absent output; only
//! present values that cannot take the requested shape are errors. The
//! `assert_*` functions validate caller-supplied fallbacks.

use crate::error::{BoxError, Error, Result};
use serde_json::Value;

/// Resolve a raw value into a string.
///
/// Strings pass through; any other value is serialized as compact JSON.
pub fn resolve_string(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Resolve a raw value into a number.
///
/// Strings are read up to the end of their leading decimal number, so
/// `"12px"` is 12. Only finite results are accepted: `"Infinity"` is not a
/// decimal number, and `"1e400"` overflows to infinity, so both are rejected.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if the value is present but is neither a
/// number nor a string that starts with a decimal number, or if the parsed
/// result is infinite.
pub fn resolve_number(value: Option<Value>) -> Result<Option<f64>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(Error::type_mismatch(format!("not a number: {value}"))),
    }
}

/// Resolve a raw value into a boolean.
///
/// Everything present counts as `true` except `false` and the string
/// `"false"`. Absent is `false`.
pub fn resolve_boolean(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => s != "false",
        Some(_) => true,
    }
}

/// Resolve a raw value into a composite.
///
/// Objects, arrays and `null` pass through. Non-empty strings are parsed as
/// JSON and must decode to one of those.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] for unparsable strings (carrying the parse
/// error as its source) and for any other present value.
pub fn resolve_object(value: Option<Value>) -> Result<Option<Value>> {
    match value {
        None => Ok(None),
        Some(value @ (Value::Object(_) | Value::Array(_) | Value::Null)) => Ok(Some(value)),
        Some(Value::String(s)) if !s.is_empty() => {
            let parsed: Value = serde_json::from_str(&s)
                .map_err(|e| Error::type_mismatch_caused_by(format!("invalid JSON: {s}"), e))?;
            if is_composite(&parsed) {
                Ok(Some(parsed))
            } else {
                Err(Error::type_mismatch(format!("not an object: {s}")))
            }
        }
        Some(other) => Err(Error::type_mismatch(format!("not an object: {other}"))),
    }
}

/// Construct a custom type from a raw value with `factory`.
///
/// Absent values are never passed to the factory.
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] wrapping the factory's failure.
pub fn resolve_type<T, F, E>(value: Option<Value>, factory: F) -> Result<Option<T>>
where
    F: FnOnce(Value) -> std::result::Result<T, E>,
    E: Into<BoxError>,
{
    let Some(value) = value else {
        return Ok(None);
    };
    factory(value).map(Some).map_err(|e| {
        Error::type_mismatch_caused_by(
            format!("failed to create {}", std::any::type_name::<T>()),
            e,
        )
    })
}

/// Replace a string holding a JSON object by the object itself.
///
/// Used during chain walks so that string-encoded objects take part in
/// object merges. Anything else is returned unchanged.
pub fn expand_encoded_object(value: Value) -> Value {
    match value {
        Value::String(s) if s.trim_start().starts_with('{') => {
            match serde_json::from_str::<Value>(&s) {
                Ok(parsed @ Value::Object(_)) => parsed,
                _ => Value::String(s),
            }
        }
        other => other,
    }
}

/// Validate a string fallback.
pub fn assert_string(fallback: Value) -> Result<String> {
    match fallback {
        Value::String(s) => Ok(s),
        other => Err(Error::type_mismatch(format!("fallback is not a string: {other}"))),
    }
}

/// Validate a numeric fallback. Non-finite numbers arrive as `null` and fail.
pub fn assert_number(fallback: Value) -> Result<f64> {
    match fallback.as_f64() {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(Error::type_mismatch(format!("fallback is not a number: {fallback}"))),
    }
}

/// Validate a composite fallback.
pub fn assert_object(fallback: Value) -> Result<Value> {
    if is_composite(&fallback) {
        Ok(fallback)
    } else {
        Err(Error::type_mismatch(format!("fallback is not an object: {fallback}")))
    }
}

fn is_composite(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_) | Value::Null)
}

/// Parse the longest leading decimal number of `input`, after leading whitespace.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
