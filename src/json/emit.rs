//! Purpose: Encode typed records to JSON text or values.
//! Exports: `to_string`, `to_string_pretty`, `to_value`.
//! Role: Encode boundary; string byte fields holding non-UTF-8 data fail here.
//! Invariants: Compact output uses no insignificant whitespace.

use serde::Serialize;
use serde_json::Value;

use crate::core::error::Error;

pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string(value).map_err(Error::from_json)
}

pub fn to_string_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value).map_err(Error::from_json)
}

pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, Error> {
    serde_json::to_value(value).map_err(Error::from_json)
}
