// Core modules: the two byte codecs, their serde adapters, and error modeling.
pub mod byte_array;
pub mod byte_string;
pub mod classify;
pub mod error;
pub mod field;
