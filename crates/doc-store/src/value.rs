//! Field Values
//!
//! Typed document values. The serde representation is Firestore's REST
//! encoding, so `Value` is both the in-memory model and the wire format.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named fields of a document (or of a map value)
pub type Fields = BTreeMap<String, Value>;

/// A single typed field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    #[serde(rename = "nullValue")]
    Null(()),
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// Sent as a decimal string on the wire
    #[serde(rename = "integerValue")]
    Integer(#[serde(with = "integer_string")] i64),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "timestampValue")]
    Timestamp(DateTime<Utc>),
    #[serde(rename = "stringValue")]
    String(String),
    /// Base64 payload, kept opaque
    #[serde(rename = "bytesValue")]
    Bytes(String),
    /// Full resource name of another document
    #[serde(rename = "referenceValue")]
    Reference(String),
    #[serde(rename = "geoPointValue")]
    GeoPoint(GeoPoint),
    #[serde(rename = "arrayValue")]
    Array(ArrayValue),
    #[serde(rename = "mapValue")]
    Map(MapValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: Fields,
}

impl Value {
    pub fn null() -> Self {
        Value::Null(())
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(ArrayValue { values })
    }

    pub fn map(fields: Fields) -> Self {
        Value::Map(MapValue { fields })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

mod integer_string {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(i64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(D::Error::custom),
            Repr::Number(n) => Ok(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_scalar_wire_format() {
        assert_eq!(serde_json::to_value(Value::from("Work")).unwrap(), json!({"stringValue": "Work"}));
        assert_eq!(serde_json::to_value(Value::from(3i64)).unwrap(), json!({"integerValue": "3"}));
        assert_eq!(serde_json::to_value(Value::null()).unwrap(), json!({"nullValue": null}));
        assert_eq!(serde_json::to_value(Value::from(true)).unwrap(), json!({"booleanValue": true}));
    }

    #[test]
    fn test_timestamp_wire_format() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let encoded = serde_json::to_value(Value::from(ts)).unwrap();
        let text = encoded["timestampValue"].as_str().unwrap();
        assert!(text.starts_with("2024-05-01T12:30:00"));

        let decoded: Value = serde_json::from_value(json!({"timestampValue": "2024-05-01T12:30:00.123456Z"})).unwrap();
        assert_eq!(decoded.as_timestamp().unwrap().timestamp(), ts.timestamp());
    }

    #[test]
    fn test_integer_accepts_string_or_number() {
        let a: Value = serde_json::from_value(json!({"integerValue": "42"})).unwrap();
        let b: Value = serde_json::from_value(json!({"integerValue": 42})).unwrap();
        assert_eq!(a.as_integer(), Some(42));
        assert_eq!(b.as_integer(), Some(42));
    }

    #[test]
    fn test_nested_values_decode() {
        let raw = json!({
            "mapValue": {
                "fields": {
                    "tags": {"arrayValue": {"values": [{"stringValue": "a"}, {"stringValue": "b"}]}},
                    "empty": {"arrayValue": {}},
                    "where": {"geoPointValue": {"latitude": 1.5, "longitude": -2.0}}
                }
            }
        });
        let value: Value = serde_json::from_value(raw).unwrap();
        let Value::Map(map) = value else { panic!("expected map") };
        assert_eq!(map.fields["tags"], Value::array(vec!["a".into(), "b".into()]));
        assert_eq!(map.fields["empty"], Value::array(vec![]));
        assert_eq!(map.fields["where"], Value::GeoPoint(GeoPoint { latitude: 1.5, longitude: -2.0 }));
    }
}
