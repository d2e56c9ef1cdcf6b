//! Purpose: Byte sequence field that travels as a JSON string.
//! Exports: `ByteJsonString`.
//! Role: Field-type override; serde routes the field here instead of the `Vec<u8>` default.
//! Invariants: The JSON string's UTF-8 bytes equal the held bytes exactly.
//! Invariants: Bytes that are not well-formed UTF-8 are rejected on encode, never replaced.
//! Notes: Decoding accepts only strings (and raw bytes from non-JSON formats); `null` is a shape error.

use std::fmt;
use std::ops::{Deref, DerefMut};

use bstr::BStr;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{self, Serialize, Serializer};

use crate::core::classify::INVALID_UTF8;
use crate::core::error::{Error, ErrorKind};

/// Bytes rendered as the characters of a JSON string.
///
/// ```
/// use jsonutil::ByteJsonString;
///
/// let value = ByteJsonString::from("lobaro");
/// assert_eq!(serde_json::to_string(&value).unwrap(), r#""lobaro""#);
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteJsonString(Vec<u8>);

impl ByteJsonString {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Text view of the bytes, or an `Encoding` error naming the first bad byte.
    pub fn to_str(&self) -> Result<&str, Error> {
        std::str::from_utf8(&self.0).map_err(|err| {
            Error::new(ErrorKind::Encoding)
                .with_message(utf8_message(&err))
                .with_source(err)
        })
    }
}

pub(crate) fn utf8_message(err: &std::str::Utf8Error) -> String {
    format!(
        "{INVALID_UTF8} (first invalid byte at index {})",
        err.valid_up_to()
    )
}

pub(crate) fn serialize_text<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match std::str::from_utf8(bytes) {
        Ok(text) => serializer.serialize_str(text),
        Err(err) => {
            tracing::debug!(
                len = bytes.len(),
                valid_up_to = err.valid_up_to(),
                "rejecting non-utf8 bytes for string field"
            );
            Err(ser::Error::custom(utf8_message(&err)))
        }
    }
}

pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_string(TextVisitor)
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.as_bytes().to_vec())
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.into_bytes())
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v.to_vec())
    }

    fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(v)
    }
}

impl Serialize for ByteJsonString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_text(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for ByteJsonString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_text(deserializer).map(Self)
    }
}

impl fmt::Debug for ByteJsonString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteJsonString({:?})", BStr::new(&self.0))
    }
}

impl Deref for ByteJsonString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ByteJsonString {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<[u8]> for ByteJsonString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteJsonString {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteJsonString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for ByteJsonString {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for ByteJsonString {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<String> for ByteJsonString {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<ByteJsonString> for Vec<u8> {
    fn from(value: ByteJsonString) -> Self {
        value.0
    }
}

impl FromIterator<u8> for ByteJsonString {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
