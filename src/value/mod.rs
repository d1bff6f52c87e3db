//! Value handling: dynamic menu values, display strings, and the CSV boundary.
//!
//! Menu values are dynamic JSON shapes (re-exported [`Value`]). The host
//! moves them between widgets, session files, and the network, so the menu
//! never restricts them to one Rust type: a value may be a number, a string,
//! a boolean, or a whole array/object, and two values are "the same entry"
//! when they are structurally equal.
//!
//! This module also carries the string rules the menu inherits from its
//! host environment:
//!
//! - [`display_string`]: objects and arrays display as their JSON
//!   serialization, scalars as their bare text.
//! - [`to_csv`] / [`from_csv`]: the flat snapshot format joins list values
//!   with commas and decodes scalar fields back to typed values.
//! - [`parse_float_prefix`] / [`numeric_value`]: prefix and whole-string
//!   numeric parsing with the host's coercion semantics, used by the
//!   label heuristic in [`EntryList::build`].

mod entries;

pub use entries::{EntryList, MenuEntry, ValueSpec, WeightSpec, MAX_ANGLE_SPAN};

pub use serde_json::Value;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Render a value the way the display node shows it.
///
/// Strings are shown bare (no quotes), numbers drop a whole-valued
/// fractional part (`3.0` displays as `3`), booleans and `null` use their
/// literal spelling, and arrays/objects display as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                #[allow(clippy::cast_possible_truncation)]
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
                    return format!("{}", f as i64);
                }
            }
            n.to_string()
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        composite => composite.to_string(),
    }
}

/// Structural equality with numeric comparison by magnitude.
///
/// The entry lookup in [`crate::Menu::set_value`] must treat `1` and `1.0`
/// as the same value (hosts round-trip numbers through text), so numbers
/// compare as `f64` while everything else compares structurally.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(v, w)| values_equal(v, w))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}

/// Host-style truthiness for loosely-typed boolean properties.
pub fn js_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Encode a value as the CSV field used by the flat snapshot format.
///
/// Lists join their elements with `,` (recursively, matching the host's
/// array-to-string coercion); everything else uses its display string.
pub fn to_csv(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(to_csv).collect::<Vec<_>>().join(","),
        other => display_string(other),
    }
}

/// Decode a snapshot CSV field back into a value.
///
/// A single field yields a scalar, several fields yield a list. Fields
/// that parse as JSON numbers, booleans, or `null` come back typed so the
/// entry lookup can re-match numeric values; anything else stays a string.
pub fn from_csv(field: &str) -> Value {
    let parts: Vec<&str> = field.split(',').collect();
    if parts.len() == 1 {
        decode_scalar(parts[0])
    } else {
        Value::Array(parts.into_iter().map(decode_scalar).collect())
    }
}

fn decode_scalar(field: &str) -> Value {
    match serde_json::from_str::<Value>(field.trim()) {
        Ok(v @ (Value::Number(_) | Value::Bool(_) | Value::Null)) => v,
        _ => Value::String(field.to_string()),
    }
}

/// Fit a label into a column budget, grapheme-safely.
///
/// Labels wider than `max_width` columns are truncated on a grapheme
/// boundary and suffixed with an ellipsis. A zero budget yields an empty
/// string.
pub fn fit_label(label: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if UnicodeWidthStr::width(label) <= max_width {
        return label.to_string();
    }
    let mut fitted = String::new();
    let mut used = 0;
    for grapheme in label.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        // keep one column for the ellipsis
        if used + w + 1 > max_width {
            break;
        }
        fitted.push_str(grapheme);
        used += w;
    }
    fitted.push('…');
    fitted
}

/// Parse the leading numeric prefix of a string (`parseFloat` semantics).
///
/// Leading whitespace is skipped, then the longest prefix matching an
/// optional sign, `Infinity`, or a decimal literal (with optional fraction
/// and exponent) is parsed. Returns NaN when no prefix parses.
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    match parse_decimal(trimmed) {
        Some((value, _)) => value,
        None => f64::NAN,
    }
}

/// Parse a whole string as a number (`ToNumber` semantics for strings).
///
/// The string is trimmed on both ends; an empty remainder is `0`.
/// `Infinity` forms, `0x`/`0o`/`0b` integer literals, and full decimal
/// literals parse; anything with trailing junk is NaN.
pub fn numeric_value(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    for (prefixes, radix) in [
        (["0x", "0X"], 16),
        (["0o", "0O"], 8),
        (["0b", "0B"], 2),
    ] {
        for prefix in prefixes {
            if let Some(digits) = trimmed.strip_prefix(prefix) {
                #[allow(clippy::cast_precision_loss)]
                return u128::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
            }
        }
    }
    match parse_decimal(trimmed) {
        Some((value, consumed)) if consumed == trimmed.len() => value,
        _ => f64::NAN,
    }
}

/// True when a mapping key is just a textual echo of a number.
///
/// Mirrors the host's loose comparison between the key's parsed float
/// prefix and its whole-string numeric value: when both parse and agree
/// (`"1"`, `"01"`, `" 1 "`, `"1.5"`, `"Infinity"`), the key carries no
/// label information and the entry labels itself with its value instead.
/// NaN on either side keeps the key verbatim (`"B "`, `"1x"`, `""`).
pub fn numeric_echo(key: &str) -> bool {
    let prefix = parse_float_prefix(key);
    let whole = numeric_value(key);
    !prefix.is_nan() && !whole.is_nan() && prefix == whole
}

/// Parse an optional-sign decimal literal (or `Infinity`) at the start of
/// `text`. Returns the value and the number of bytes consumed.
fn parse_decimal(text: &str) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut i = 0;
    let mut negative = false;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        negative = bytes[i] == b'-';
        i += 1;
    }
    if text[i..].starts_with("Infinity") {
        let value = if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some((value, i + "Infinity".len()));
    }

    let digits_start = i;
    let mut seen_digit = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        seen_digit = true;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            seen_digit = true;
        }
    }
    if !seen_digit {
        return None;
    }

    // optional exponent, only kept if it has at least one digit
    let mut end = i;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits {
            end = j;
        }
    }

    let magnitude: f64 = text[digits_start..end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    Some((value, end))
}
