//! Key normalization for API responses.
//!
//! The backend mixes `snake_case` columns (`job_id`, `years_exp`) with
//! camelCase fields added by hand in route handlers (`postedAt`, `isOpen`,
//! `logoURL`). Every response is passed through [`normalize_json`] before
//! decoding so the models only need to know one spelling.

use serde_json::{Map, Value};

/// Convert a single key to snake_case.
///
/// Runs of capitals are treated as one word, so `logoURL` becomes `logo_url`
/// and `HTTPStatus` becomes `http_status`. Keys that are already snake_case
/// come back unchanged.
pub fn normalize_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (index, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() {
            let prev = index.checked_sub(1).map(|i| chars[i]);
            let next = chars.get(index + 1).copied();

            let after_lower = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            let ends_acronym = prev.is_some_and(|p| p.is_ascii_uppercase())
                && next.is_some_and(|n| n.is_ascii_lowercase());

            if (after_lower || ends_acronym) && !out.ends_with('_') {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }

    out
}

/// Recursively normalize every object key in a JSON value.
pub fn normalize_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let normalized: Map<String, Value> = map
                .into_iter()
                .map(|(key, value)| (normalize_key(&key), normalize_json(value)))
                .collect();
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json).collect()),
        other => other,
    }
}
