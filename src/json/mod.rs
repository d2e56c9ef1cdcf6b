//! Purpose: Typed JSON entry points that report failures as `jsonutil::Error`.
//! Exports: `from_str`, `from_slice`, `convert`, `to_string`, `to_string_pretty`, `to_value`.
//! Role: Single seam over serde_json so callers get classified codec errors.
//! Invariants: Helpers are thin wrappers; no hidden global state or configuration.
//! Invariants: Every engine failure goes through `Error::from_json`.

mod emit;
mod parse;

pub use emit::{to_string, to_string_pretty, to_value};
pub use parse::{convert, from_slice, from_str};
