//! Response normalization.
//!
//! Endpoints disagree on their envelope: some return a bare array, some
//! `{data: [...]}`, some `{data: {<resource>: [...]}}` and some
//! `{<resource>: [...]}`. Every list and record read goes through this module
//! so callers only deal with [`ListResponse`] and typed records.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::ListResponse;

/// No recognizable list in a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not find a `{resource}` list in the response")]
pub struct ShapeError {
    pub resource: String,
}

/// Locate the record list of a response. First match wins:
/// the response itself, `.data`, `.data.<key>`, `.<key>`.
pub fn extract_list<'a>(response: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    if let Some(list) = response.as_array() {
        return Some(list);
    }

    let data = response.get("data");
    if let Some(list) = data.and_then(Value::as_array) {
        return Some(list);
    }
    if let Some(list) = data.and_then(|d| d.get(key)).and_then(Value::as_array) {
        return Some(list);
    }

    response.get(key).and_then(Value::as_array)
}

/// Normalize a list response into typed records.
///
/// Records that do not deserialize are skipped with a warning; only a missing
/// list is an error.
pub fn normalize_list<T>(response: &Value, key: &str) -> Result<ListResponse<T>, ShapeError>
where
    T: DeserializeOwned,
{
    let Some(list) = extract_list(response, key) else {
        tracing::warn!("Could not extract `{}` list from response", key);
        return Err(ShapeError {
            resource: key.to_string(),
        });
    };

    let items = list
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value::<T>(raw.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed `{}` record #{}: {}", key, index, e);
                None
            }
        })
        .collect();

    Ok(ListResponse {
        items,
        total: extract_total(response),
        message: extract_message(response),
    })
}

/// Locate a single record: `.data.<key>`, `.<key>`, `.data`, then the response
/// itself, trying each key in order.
pub fn extract_record<'a>(response: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let data = response.get("data");

    for key in keys {
        if let Some(record) = data.and_then(|d| d.get(*key)).filter(|v| v.is_object()) {
            return Some(record);
        }
    }
    for key in keys {
        if let Some(record) = response.get(*key).filter(|v| v.is_object()) {
            return Some(record);
        }
    }

    data.filter(|v| v.is_object())
        .or_else(|| Some(response).filter(|v| v.is_object()))
}

/// Deserialize the single record of a response. `Ok(None)` means the response
/// holds no record; a record that is present but malformed is an error.
pub fn normalize_record<T>(response: &Value, keys: &[&str]) -> Result<Option<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    let Some(raw) = extract_record(response, keys) else {
        return Ok(None);
    };
    serde_json::from_value(raw.clone()).map(Some).map_err(|e| {
        tracing::warn!("Malformed `{}` record in response: {}", keys.join("/"), e);
        e
    })
}

fn extract_total(response: &Value) -> Option<u64> {
    let candidates = [
        response.pointer("/data/totalResults"),
        response.pointer("/data/total"),
        response.get("totalResults"),
        response.get("total"),
    ];
    candidates.into_iter().flatten().find_map(Value::as_u64)
}

fn extract_message(response: &Value) -> Option<String> {
    response
        .pointer("/data/message")
        .or_else(|| response.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
