use anyhow::Result;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

/// Renders a stored document the way clients expect it: object ids as hex
/// strings, binary payloads as base64, dates as RFC 3339.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Binary(binary) => Value::String(BASE64.encode(&binary.bytes)),
        Bson::DateTime(date) => date
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or(Value::Null),
        other => other.into_relaxed_extjson(),
    }
}

pub fn json_to_document(object: &Map<String, Value>) -> Result<Document> {
    Ok(bson::to_document(object)?)
}

pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(value) => value.clone(),
        other => other.to_string(),
    }
}
