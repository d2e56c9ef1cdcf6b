//! Purpose: `#[serde(with = ...)]` adapters for records that keep plain `Vec<u8>` fields.
//! Exports: `string` and `array` modules, each with `serialize`/`deserialize`.
//! Role: Same codecs as `ByteJsonString`/`ByteJsonArray` without changing the field type.
//! Invariants: Output and errors match the newtype codecs byte for byte.

/// String codec: `#[serde(with = "jsonutil::field::string")]`.
pub mod string {
    use serde::{Deserializer, Serializer};

    use crate::core::byte_string::{deserialize_text, serialize_text};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_text(bytes, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_text(deserializer)
    }
}

/// Array codec: `#[serde(with = "jsonutil::field::array")]`.
pub mod array {
    use serde::{Deserializer, Serializer};

    use crate::core::byte_array::{deserialize_octets, serialize_octets};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_octets(bytes, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_octets(deserializer)
    }
}
