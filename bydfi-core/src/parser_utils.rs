//! Field probing helpers for exchange payloads.
//!
//! Exchanges report the same attribute under different keys and encodings
//! (`"90156"`, `90156`, `""`, `null`). The `*_n` helpers take a lookup order
//! and return the first key that holds a usable value; absent values stay
//! `None` instead of collapsing to zero.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Converts a JSON value to `Decimal` (string or number).
///
/// Numbers are parsed from their textual form so `0.052` stays exactly
/// `0.052`. Empty strings and non-numeric values are `None`.
pub fn decimal_from_value(v: &Value) -> Option<Decimal> {
    match v {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s.trim()),
        _ => None,
    }
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse a `Decimal` stored under `key`.
pub fn parse_decimal(data: &Value, key: &str) -> Option<Decimal> {
    data.get(key).and_then(decimal_from_value)
}

/// Parse the first `Decimal` found under any of `keys`, in order.
pub fn parse_decimal_n(data: &Value, keys: &[&str]) -> Option<Decimal> {
    keys.iter().find_map(|key| parse_decimal(data, key))
}

/// Parse a millisecond timestamp (number or numeric string).
pub fn parse_timestamp(data: &Value, key: &str) -> Option<i64> {
    data.get(key).and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
            .or_else(|| {
                #[allow(clippy::cast_possible_truncation)]
                v.as_f64().map(|f| f as i64)
            })
    })
}

/// Parse the first timestamp found under any of `keys`, in order.
pub fn parse_timestamp_n(data: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| parse_timestamp(data, key))
}

/// Parse a string; numbers and booleans are stringified, empty strings are `None`.
pub fn parse_string(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse the first string found under any of `keys`, in order.
pub fn parse_string_n(data: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| parse_string(data, key))
}

/// Parse a boolean (`true`, `"true"`, `1`, `"1"` and their negatives).
pub fn parse_bool(data: &Value, key: &str) -> Option<bool> {
    match data.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Convert a millisecond timestamp to an ISO 8601 string.
pub fn timestamp_to_datetime(timestamp: i64) -> Option<String> {
    chrono::DateTime::from_timestamp_millis(timestamp)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string())
}
