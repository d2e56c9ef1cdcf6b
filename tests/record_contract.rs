//! Purpose: Lock the wire contract of byte fields embedded in host records.
//! Exports: Integration tests only (no runtime exports).
//! Role: Records declare a codec type and serde routes the field to it.
//! Invariants: Wire forms `{"Str":"lobaro"}` and `{"Bytes":[1,2,3]}` stay byte-exact.
//! Invariants: A bad leaf value fails the whole record with a classified kind.

use jsonutil::{ByteJsonArray, ByteJsonString, ErrorKind, json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ByteString {
    str: ByteJsonString,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ByteArray {
    bytes: ByteJsonArray,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Mixed {
    name: String,
    label: ByteJsonString,
    payload: ByteJsonArray,
    raw: Vec<u8>,
}

#[test]
fn marshal_byte_string() {
    let record = ByteString {
        str: ByteJsonString::from("lobaro"),
    };
    assert_eq!(json::to_string(&record).unwrap(), r#"{"Str":"lobaro"}"#);
}

#[test]
fn unmarshal_byte_string() {
    let record: ByteString = json::from_str(r#"{"Str":"lobaro"}"#).unwrap();
    assert_eq!(
        record.str.as_bytes(),
        &[0x6c, 0x6f, 0x62, 0x61, 0x72, 0x6f]
    );
}

#[test]
fn marshal_byte_array() {
    let record = ByteArray {
        bytes: ByteJsonArray::from([1u8, 2, 3]),
    };
    assert_eq!(json::to_string(&record).unwrap(), r#"{"Bytes":[1,2,3]}"#);
}

#[test]
fn unmarshal_byte_array() {
    let record: ByteArray = json::from_str(r#"{"Bytes":[1, 2,3]}"#).unwrap();
    assert_eq!(record.bytes.as_bytes(), &[1, 2, 3]);
}

#[test]
fn empty_sequences_round_trip() {
    let text = json::to_string(&ByteString::default()).unwrap();
    assert_eq!(text, r#"{"Str":""}"#);
    let back: ByteString = json::from_str(&text).unwrap();
    assert!(back.str.is_empty());

    let text = json::to_string(&ByteArray::default()).unwrap();
    assert_eq!(text, r#"{"Bytes":[]}"#);
    let back: ByteArray = json::from_str(&text).unwrap();
    assert!(back.bytes.is_empty());
}

#[test]
fn codec_fields_override_the_default_vec_rule() {
    let record = Mixed {
        name: "frame".to_string(),
        label: ByteJsonString::from("ab"),
        payload: ByteJsonArray::from([9u8]),
        raw: vec![9],
    };
    let value = json::to_value(&record).unwrap();
    assert_eq!(value["label"], Value::from("ab"));
    assert_eq!(value["payload"], serde_json::json!([9]));
    assert_eq!(value["raw"], serde_json::json!([9]));
    let back: Mixed = json::convert(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn shape_errors_fail_the_record() {
    for input in [r#"{"Str":5}"#, r#"{"Str":{}}"#, r#"{"Str":[108]}"#] {
        let err = json::from_str::<ByteString>(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch, "{input}");
    }
    for input in [r#"{"Bytes":"abc"}"#, r#"{"Bytes":{}}"#, r#"{"Bytes":[1,"2"]}"#] {
        let err = json::from_str::<ByteArray>(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch, "{input}");
    }
}

#[test]
fn range_errors_fail_the_record() {
    let err = json::from_str::<ByteArray>(r#"{"Bytes":[1, 2, 256]}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(err.line(), Some(1));
    assert!(err.message().unwrap().contains("256"));

    for input in [r#"{"Bytes":[-1]}"#, r#"{"Bytes":[0.5]}"#] {
        let err = json::from_str::<ByteArray>(input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range, "{input}");
    }
}

#[test]
fn encoding_errors_are_not_silently_replaced() {
    let record = ByteString {
        str: ByteJsonString::new(vec![0x66, 0x80, 0x6f]),
    };
    let err = json::to_string(&record).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);

    let err = json::from_str::<ByteString>(r#"{"Str":"\ud800"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn missing_field_is_a_data_error() {
    let err = json::from_str::<ByteArray>("{}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
}

#[derive(Debug, Serialize, Deserialize)]
struct Nested {
    number: f64,
    string: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    string: String,
    float: f64,
    int: i64,
    bool_true: bool,
    bool_false: bool,
    nested: Nested,
    #[serde(with = "time::serde::rfc3339")]
    time: OffsetDateTime,
    tag: ByteJsonString,
    blob: ByteJsonArray,
}

#[test]
fn convert_untyped_value_into_record() {
    let input = r#"{
        "string": "abc",
        "float": 2.721,
        "int": 215,
        "bool_true": true,
        "bool_false": false,
        "nested": {
          "number": 53.47273,
          "string": "abc"
        },
        "time": "2016-09-19T18:32:19Z",
        "tag": "lobaro",
        "blob": [0, 255]
    }"#;

    let untyped: Value = json::from_str(input).unwrap();
    assert_eq!(untyped["float"], Value::from(2.721));

    let doc: Document = json::convert(untyped).unwrap();
    assert_eq!(doc.string, "abc");
    assert_eq!(doc.float, 2.721);
    assert_eq!(doc.int, 215);
    assert!(doc.bool_true);
    assert!(!doc.bool_false);
    assert_eq!(doc.nested.number, 53.47273);
    assert_eq!(doc.nested.string, "abc");
    assert_eq!(doc.tag.as_bytes(), b"lobaro");
    assert_eq!(doc.blob.as_bytes(), &[0, 255]);

    assert_eq!(doc.time.unix_timestamp(), 1_474_309_939);
    assert_eq!(
        doc.time,
        OffsetDateTime::parse("2016-09-19T18:32:19Z", &Rfc3339).unwrap()
    );

    let back = json::to_value(&doc).unwrap();
    assert_eq!(back["time"], Value::from("2016-09-19T18:32:19Z"));
    assert_eq!(back["tag"], Value::from("lobaro"));
}
