//! Response envelope validation.
//!
//! Each endpoint has exactly one accepted body shape. A body that does not
//! match is turned into [`ApiError::Rejected`] instead of being defaulted to
//! an empty list, so a backend contract change shows up as an error banner
//! rather than as "no jobs found".

use crate::error::ApiError;

use common::HttpStatusCode;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Accepted shape of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEnvelope {
    /// `[ ... ]`
    Bare,
    /// `{ "<key>": [ ... ], ... }`
    Keyed(&'static str),
}

impl ListEnvelope {
    fn describe(&self) -> String {
        match self {
            ListEnvelope::Bare => String::from("a JSON array"),
            ListEnvelope::Keyed(key) => format!("an object with a '{key}' array"),
        }
    }

    /// Pull the list items out of `body`, or explain why it does not match.
    pub fn items(&self, body: Value) -> Result<Vec<Value>, String> {
        match (self, body) {
            (ListEnvelope::Bare, Value::Array(items)) => Ok(items),
            (ListEnvelope::Keyed(key), Value::Object(mut map)) => match map.remove(*key) {
                Some(Value::Array(items)) => Ok(items),
                Some(other) => Err(format!(
                    "'{key}' is {}, expected an array",
                    json_kind(&other)
                )),
                None => Err(format!("missing '{key}' field")),
            },
            (_, other) => Err(format!(
                "got {}, expected {}",
                json_kind(&other),
                self.describe()
            )),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a list body according to its envelope.
#[track_caller]
pub fn decode_list<T: DeserializeOwned>(
    envelope: ListEnvelope,
    status: HttpStatusCode,
    body: Value,
) -> Result<Vec<T>, ApiError> {
    let items = envelope
        .items(body)
        .map_err(|reason| ApiError::rejected(status, format!("Malformed response: {reason}")))?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                ApiError::rejected(status, format!("Malformed response: item {index}: {e}"))
            })
        })
        .collect()
}

/// Decode a single-object body.
#[track_caller]
pub fn decode_item<T: DeserializeOwned>(status: HttpStatusCode, body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::rejected(status, format!("Malformed response: {e}")))
}
