//! Purpose: Map serde_json failures onto stable `ErrorKind` categories.
//! Exports: `categorize_error`, `categorize_message`, `hint_for`, `strip_position`.
//! Role: Single place that knows how engine messages encode codec rejections.
//! Invariants: The engine's category is consulted first; messages are matched only within it.
//! Invariants: Data messages can echo payload text, so they are matched by prefix only.
//! Notes: Codec visitors raise `invalid_type` for shape errors and
//! `invalid_value` for range errors; serde renders those with fixed prefixes.

use serde_json::error::Category;

use crate::core::error::ErrorKind;

/// Message used by the string codec when the bytes are not well-formed UTF-8.
pub(crate) const INVALID_UTF8: &str = "byte sequence is not valid UTF-8";

// Fixed serde_json syntax messages for string contents that are not text.
const ESCAPE_MARKERS: &[&str] = &[
    "invalid unicode code point",
    "surrogate",
    "hex escape",
];

pub fn categorize_error(err: &serde_json::Error) -> ErrorKind {
    match err.classify() {
        Category::Io => ErrorKind::Io,
        Category::Eof => ErrorKind::Syntax,
        Category::Syntax => {
            let message = strip_position(err);
            if ESCAPE_MARKERS.iter().any(|marker| message.contains(marker)) {
                ErrorKind::Encoding
            } else {
                ErrorKind::Syntax
            }
        }
        Category::Data => categorize_message(&strip_position(err)),
    }
}

/// Kind for a data-category message; only prefixes are inspected.
pub fn categorize_message(message: &str) -> ErrorKind {
    if message.starts_with("invalid type") {
        ErrorKind::TypeMismatch
    } else if message.starts_with("invalid value") {
        ErrorKind::Range
    } else if message.starts_with(INVALID_UTF8) {
        ErrorKind::Encoding
    } else {
        ErrorKind::Data
    }
}

pub fn hint_for(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::Syntax => Some("Input is not a complete JSON document."),
        ErrorKind::TypeMismatch => Some(
            "String byte fields take a JSON string; array byte fields take a JSON array of integers.",
        ),
        ErrorKind::Range => Some("Array byte fields accept integers from 0 to 255 only."),
        ErrorKind::Encoding => Some(
            "String byte fields carry UTF-8 text; use the array encoding for arbitrary binary data.",
        ),
        ErrorKind::Internal | ErrorKind::Usage | ErrorKind::Data | ErrorKind::Io => None,
    }
}

/// The engine message without its trailing ` at line L column C`.
pub fn strip_position(err: &serde_json::Error) -> String {
    let rendered = err.to_string();
    if err.line() == 0 {
        return rendered;
    }
    let suffix = format!(" at line {} column {}", err.line(), err.column());
    match rendered.strip_suffix(&suffix) {
        Some(stripped) => stripped.to_string(),
        None => rendered,
    }
}
