//! Purpose: Decode JSON text or generic values into typed records.
//! Exports: `from_str`, `from_slice`, `convert`.
//! Role: Decode boundary used by the CLI and by library callers.
//! Invariants: A malformed leaf value fails the whole record; no partial results.
//! Notes: `convert` is the untyped-to-typed path (decode to `Value`, then rebuild a struct).

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::error::Error;

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, Error> {
    serde_json::from_str(input).map_err(Error::from_json)
}

pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(input).map_err(Error::from_json)
}

/// Rebuild a typed record from an already-decoded JSON value.
pub fn convert<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    tracing::trace!(shape = value_shape(&value), "converting json value");
    serde_json::from_value(value).map_err(Error::from_json)
}

fn value_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
