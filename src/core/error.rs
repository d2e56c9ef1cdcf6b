//! Purpose: Error model shared by the byte codecs, the JSON boundary and the CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: One error type so a bad leaf value surfaces with the same kind everywhere.
//! Invariants: Kinds are stable; exit codes are additive-only.
//! Invariants: Engine errors keep their line/column and stay reachable via `source()`.
use std::error::Error as StdError;
use std::fmt;

use crate::core::classify;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    Internal,
    Usage,
    Syntax,
    TypeMismatch,
    Range,
    Encoding,
    Data,
    Io,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    field: Option<String>,
    line: Option<usize>,
    column: Option<usize>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            field: None,
            line: None,
            column: None,
            source: None,
        }
    }

    /// Classify an error raised while serde_json walked a document.
    ///
    /// Line and column are kept only when the engine reported a position
    /// (serialization errors and `from_value` errors report 0).
    pub fn from_json(err: serde_json::Error) -> Self {
        let kind = classify::categorize_error(&err);
        let mut out = Error::new(kind).with_message(classify::strip_position(&err));
        if err.line() > 0 {
            out = out.with_position(err.line(), err.column());
        }
        if let Some(hint) = classify::hint_for(kind) {
            out = out.with_hint(hint);
        }
        out.with_source(err)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> Option<usize> {
        self.column
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }
        if let (Some(line), Some(column)) = (self.line, self.column) {
            write!(f, " (line: {line}, column: {column})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::from_json(err)
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::Syntax => 3,
        ErrorKind::TypeMismatch => 4,
        ErrorKind::Range => 5,
        ErrorKind::Encoding => 6,
        ErrorKind::Data => 7,
        ErrorKind::Io => 8,
    }
}
