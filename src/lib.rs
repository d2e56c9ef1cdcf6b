//! Purpose: Byte-sequence field types for JSON records, plus a typed JSON boundary.
//! Exports: `ByteJsonString`, `ByteJsonArray`, `field` adapters, `json` helpers, `Error`.
//! Role: Library backing the `jsonutil` CLI; codecs plug into any serde-derived record.
//! Invariants: Codecs are stateless and pure; safe to use from any thread.
//! Invariants: A rejected leaf value fails the enclosing record; nothing is substituted.
pub mod core;
pub mod json;

pub use crate::core::byte_array::ByteJsonArray;
pub use crate::core::byte_string::ByteJsonString;
pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::field;
