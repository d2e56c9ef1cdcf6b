//! Purpose: Byte sequence field that travels as a JSON array of integers.
//! Exports: `ByteJsonArray`.
//! Role: Field-type override; serde routes the field here instead of the `Vec<u8>` default.
//! Invariants: Array element i equals byte i; every element is an integer in 0..=255.
//! Invariants: Encoding is total; decoding rejects out-of-range and non-integral numbers.

use std::fmt;
use std::ops::{Deref, DerefMut};

use bstr::BStr;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Unexpected, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::core::byte_string::ByteJsonString;

const OCTET_EXPECTED: &str = "an integer in 0..=255";
// Upper bound on the capacity trusted from a sequence size hint.
const MAX_PREALLOC: usize = 64 * 1024;

/// Bytes rendered as a JSON array with one integer per byte.
///
/// ```
/// use jsonutil::ByteJsonArray;
///
/// let value: ByteJsonArray = serde_json::from_str("[1, 2,3]").unwrap();
/// assert_eq!(value.as_bytes(), &[1, 2, 3]);
/// assert_eq!(serde_json::to_string(&value).unwrap(), "[1,2,3]");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteJsonArray(Vec<u8>);

impl ByteJsonArray {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

pub(crate) fn serialize_octets<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(bytes)
}

pub(crate) fn deserialize_octets<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_seq(OctetsVisitor)
}

struct OctetsVisitor;

impl<'de> Visitor<'de> for OctetsVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON array of integers in 0..=255")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOC);
        let mut out = Vec::with_capacity(capacity);
        while let Some(Octet(byte)) = seq.next_element()? {
            out.push(byte);
        }
        Ok(out)
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

/// One array element; integral numbers only.
struct Octet(u8);

impl<'de> Deserialize<'de> for Octet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_u8(OctetVisitor).map(Octet)
    }
}

struct OctetVisitor;

impl<'de> Visitor<'de> for OctetVisitor {
    type Value = u8;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(OCTET_EXPECTED)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u8::try_from(v).map_err(|_| out_of_range(Unexpected::Unsigned(v)))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u8::try_from(v).map_err(|_| out_of_range(Unexpected::Signed(v)))
    }

    // JSON numbers written with a fraction or exponent are never bytes, even `2.0`.
    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Err(out_of_range(Unexpected::Float(v)))
    }
}

fn out_of_range<E: de::Error>(unexpected: Unexpected<'_>) -> E {
    tracing::debug!(value = %unexpected, "rejecting array element outside byte range");
    E::invalid_value(unexpected, &OCTET_EXPECTED)
}

impl Serialize for ByteJsonArray {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_octets(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for ByteJsonArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_octets(deserializer).map(Self)
    }
}

impl fmt::Debug for ByteJsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteJsonArray({:?})", BStr::new(&self.0))
    }
}

impl Deref for ByteJsonArray {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ByteJsonArray {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<[u8]> for ByteJsonArray {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteJsonArray {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteJsonArray {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for ByteJsonArray {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for ByteJsonArray {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<String> for ByteJsonArray {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<ByteJsonArray> for Vec<u8> {
    fn from(value: ByteJsonArray) -> Self {
        value.0
    }
}

impl From<ByteJsonString> for ByteJsonArray {
    fn from(value: ByteJsonString) -> Self {
        Self(value.into_inner())
    }
}

impl From<ByteJsonArray> for ByteJsonString {
    fn from(value: ByteJsonArray) -> Self {
        ByteJsonString::new(value.0)
    }
}

impl FromIterator<u8> for ByteJsonArray {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::ByteJsonArray;
    use crate::core::byte_string::ByteJsonString;
    use serde_json::json;

    #[test]
    fn encodes_compact_integer_array() {
        let value = ByteJsonArray::from([1u8, 2, 3]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "[1,2,3]");
        assert_eq!(
            serde_json::to_string(&ByteJsonArray::default()).unwrap(),
            "[]"
        );
    }

    #[test]
    fn every_byte_value_is_representable() {
        let all: ByteJsonArray = (0..=255u8).collect();
        let text = serde_json::to_string(&all).unwrap();
        assert!(text.starts_with("[0,1,2,"));
        assert!(text.ends_with(",254,255]"));
        let back: ByteJsonArray = serde_json::from_str(&text).unwrap();
        assert_eq!(back, all);
    }

    #[test]
    fn irregular_whitespace_is_accepted() {
        let value: ByteJsonArray = serde_json::from_str("[ 1 ,\n 2,3\t]").unwrap();
        assert_eq!(value.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn out_of_range_elements_are_invalid_values() {
        for input in ["[1, 2, 256]", "[-1]", "[1.5]", "[2.0]", "[1e3]"] {
            let err = serde_json::from_str::<ByteJsonArray>(input).unwrap_err();
            assert!(
                err.to_string().starts_with("invalid value"),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn wrong_shapes_are_invalid_types() {
        for input in ["\"abc\"", "{}", "7", "null", "[\"1\"]", "[null]", "[[1]]", "[true]"] {
            let err = serde_json::from_str::<ByteJsonArray>(input).unwrap_err();
            assert!(
                err.to_string().starts_with("invalid type"),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn decodes_through_json_value() {
        let value: ByteJsonArray = serde_json::from_value(json!([0, 128, 255])).unwrap();
        assert_eq!(value.as_bytes(), &[0, 128, 255]);
        assert!(serde_json::from_value::<ByteJsonArray>(json!([300])).is_err());
    }

    #[test]
    fn text_conversions_match_the_string_codec() {
        let owned = ByteJsonArray::from(String::from("hi"));
        assert_eq!(owned, ByteJsonArray::from("hi"));
        assert_eq!(
            owned.as_bytes(),
            ByteJsonString::from(String::from("hi")).as_bytes()
        );
        assert_eq!(serde_json::to_string(&owned).unwrap(), "[104,105]");
    }

    #[test]
    fn retags_between_codecs_without_copying_semantics() {
        let array = ByteJsonArray::from("hi");
        let string = ByteJsonString::from(array.clone());
        assert_eq!(string.as_bytes(), array.as_bytes());
        assert_eq!(ByteJsonArray::from(string), array);
    }
}
