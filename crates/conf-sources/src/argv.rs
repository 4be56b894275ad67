//! Command-line argument source
//!
//! Arguments are flattened into an object without any declaration of the
//! accepted flags:
//!
//! - `--key=value` and `--key value` set `key`
//! - `--flag` sets `true`, `--no-flag` sets `false`
//! - `-abc` sets `a`, `b` and `c`; the last short flag may take a value
//! - `--a.b=1` sets the nested key `a.b`
//! - repeating a key collects its values into an array
//! - values that look like numbers or booleans are converted
//! - positional arguments and everything after `--` are dropped
//!
//! Keys are folded to lowerCamelCase, so `--log-level` and `--logLevel` are
//! the same key.

use crate::case::camel_case;
use serde_json::{Map, Number, Value};

/// Parser turning raw arguments into a flat (or dotted-nested) object
pub type ArgvParser = fn(&[String]) -> Map<String, Value>;

/// Parse `args` (without the program name).
pub fn parse_args(args: &[String]) -> Map<String, Value> {
    let mut parsed = Map::new();
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        if let Some(body) = arg.strip_prefix("--") {
            if let Some((key, value)) = body.split_once('=') {
                set_arg(&mut parsed, key, coerce(value));
            } else if let Some(key) = body.strip_prefix("no-") {
                set_arg(&mut parsed, key, Value::Bool(false));
            } else {
                let value = match iter.next_if(|next| !is_flag(next)) {
                    Some(next) => coerce(next),
                    None => Value::Bool(true),
                };
                set_arg(&mut parsed, body, value);
            }
            continue;
        }

        if let Some(letters) = arg.strip_prefix('-').filter(|_| is_flag(arg)) {
            if let Some((key, value)) = letters.split_once('=') {
                set_arg(&mut parsed, key, coerce(value));
                continue;
            }
            let mut chars = letters.chars().peekable();
            while let Some(letter) = chars.next() {
                let key = letter.to_string();
                if chars.peek().is_some() {
                    set_arg(&mut parsed, &key, Value::Bool(true));
                    continue;
                }
                let value = match iter.next_if(|next| !is_flag(next)) {
                    Some(next) => coerce(next),
                    None => Value::Bool(true),
                };
                set_arg(&mut parsed, &key, value);
            }
            continue;
        }

        tracing::trace!(argument = %arg, "Ignoring positional argument");
    }

    parsed
}

/// Whether `arg` is a flag rather than a value. Negative numbers are values.
fn is_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-') && number(arg).is_none()
}

fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => number(raw)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
    }
}

fn number(raw: &str) -> Option<Number> {
    let looks_numeric = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && raw.chars().any(|c| c.is_ascii_digit());
    if !looks_numeric {
        return None;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

fn set_arg(parsed: &mut Map<String, Value>, key: &str, value: Value) {
    let path: Vec<String> = key.split('.').map(camel_case).collect();
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    if path.iter().any(String::is_empty) {
        tracing::trace!(key = %key, "Ignoring argument with an empty key");
        return;
    }

    let mut current = parsed;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return;
        };
        current = map;
    }

    match current.get_mut(last) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            current.insert(last.clone(), value);
        }
    }
}
