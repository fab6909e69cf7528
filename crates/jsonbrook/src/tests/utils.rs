use alloc::{string::String, vec::Vec};

use crate::{JsonBrook, Map, ParserError, ParserOptions, Value};

/// Options that panic on the first syntax error, for documents expected to
/// parse.
pub(crate) fn strict_options() -> ParserOptions {
    ParserOptions {
        panic_on_error: true,
        ..Default::default()
    }
}

/// Parses `text` one character at a time, then ends the input.
pub(crate) fn parse_chars(text: &str, options: ParserOptions) -> Result<Option<Value>, ParserError> {
    let mut parser = JsonBrook::new(options);
    for ch in text.chars() {
        parser.write(ch)?;
    }
    parser.end()?;
    Ok(parser.current_value())
}

/// The value reported after each character of `text`, followed by the value
/// after end of input.
pub(crate) fn progression(text: &str, options: ParserOptions) -> Vec<Option<Value>> {
    let mut parser = JsonBrook::new(options);
    let mut out = Vec::with_capacity(text.len() + 1);
    for ch in text.chars() {
        parser.write(ch).unwrap();
        out.push(parser.current_value());
    }
    parser.end().unwrap();
    out.push(parser.current_value());
    out
}

/// Parses `text` with `serde_json`, the reference for whole-document parses.
pub(crate) fn reference(text: &str) -> Option<Value> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .map(from_serde)
}

pub(crate) fn from_serde(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_serde).collect()),
        serde_json::Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k, from_serde(v)))
                .collect::<Map>(),
        ),
    }
}

/// Whether `partial` is a value reported for a prefix of a document whose
/// final value is `full`: already-completed array elements and object
/// entries must be final, the element still being written may only grow.
pub(crate) fn is_prefix_of(partial: &Value, full: &Value) -> bool {
    match (partial, full) {
        // A provisional number is whatever prefix of digits arrived so far.
        (Value::Number(_), Value::Number(_)) => true,
        (Value::String(a), Value::String(b)) => b.starts_with(a.as_str()),
        (Value::Array(a), Value::Array(b)) => {
            a.len() <= b.len()
                && a.iter().zip(b).enumerate().all(|(i, (x, y))| {
                    if i + 1 == a.len() {
                        is_prefix_of(x, y)
                    } else {
                        x == y
                    }
                })
        }
        (Value::Object(a), Value::Object(b)) => a
            .iter()
            .all(|(k, v)| b.get(k).is_some_and(|w| is_prefix_of(v, w))),
        (a, b) => a == b,
    }
}

/// Splits `text` into chunks at the char offsets in `splits`.
pub(crate) fn chunks(text: &str, splits: &[usize]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut idx = 0;
    for &s in splits {
        let remaining = chars.len() - idx;
        if remaining == 0 {
            break;
        }
        let size = 1 + s % remaining;
        out.push(chars[idx..idx + size].iter().collect());
        idx += size;
    }
    if idx < chars.len() {
        out.push(chars[idx..].iter().collect());
    }
    out
}
