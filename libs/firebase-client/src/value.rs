/// Firestore wire-value mapping
///
/// The documents REST API wraps every field in a typed envelope
/// (`{"stringValue": ...}`, `{"integerValue": "3"}`, ...). This module
/// converts between that envelope format and plain `serde_json` values so
/// the rest of the code never sees the wire shape.
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::error::{FirebaseError, Result};

/// A document fetched from a collection: its id plus decoded fields.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    /// Decode a document resource from the REST API.
    ///
    /// The resource `name` ends in `.../documents/{collection}/{id}`; only
    /// the trailing id is retained.
    pub fn from_wire(resource: &Value) -> Result<Document> {
        let name = resource
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| FirebaseError::Decode("document without a name".to_string()))?;
        let id = name
            .rsplit('/')
            .next()
            .unwrap_or(name)
            .to_string();

        let fields = match resource.get("fields") {
            Some(Value::Object(wire)) => decode_fields(wire),
            _ => Map::new(),
        };

        Ok(Document {
            id,
            fields,
            create_time: parse_time(resource.get("createTime")),
            update_time: parse_time(resource.get("updateTime")),
        })
    }
}

fn parse_time(v: Option<&Value>) -> Option<DateTime<Utc>> {
    v.and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Encode a plain JSON value into the Firestore envelope format.
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                // Integers travel as decimal strings on the wire.
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => {
            let mut fields = Map::new();
            for (k, v) in map {
                fields.insert(k.clone(), encode(v));
            }
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Encode a whole field map.
pub fn encode_fields(fields: &Map<String, Value>) -> Value {
    let mut wire = Map::new();
    for (k, v) in fields {
        wire.insert(k.clone(), encode(v));
    }
    Value::Object(wire)
}

/// Decode a Firestore envelope into a plain JSON value.
///
/// Timestamps come back as their RFC 3339 string; callers that care parse
/// them at the model boundary.
pub fn decode(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };

    if let Some((kind, inner)) = obj.iter().next() {
        match kind.as_str() {
            "nullValue" => Value::Null,
            "booleanValue" => inner.clone(),
            "integerValue" => inner
                .as_str()
                .and_then(|s| s.parse::<i64>().ok())
                .map(|i| json!(i))
                .unwrap_or(Value::Null),
            "doubleValue" => inner.clone(),
            "stringValue" | "timestampValue" | "referenceValue" => inner.clone(),
            "arrayValue" => {
                let items = inner
                    .get("values")
                    .and_then(Value::as_array)
                    .map(|vs| vs.iter().map(decode).collect())
                    .unwrap_or_default();
                Value::Array(items)
            }
            "mapValue" => match inner.get("fields") {
                Some(Value::Object(wire)) => Value::Object(decode_fields(wire)),
                _ => json!({}),
            },
            _ => Value::Null,
        }
    } else {
        Value::Null
    }
}

fn decode_fields(wire: &Map<String, Value>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (k, v) in wire {
        fields.insert(k.clone(), decode(v));
    }
    fields
}
