//! JSON rendering of stored records.
//!
//! Records are returned exactly as stored: every field, including ones the
//! models do not declare and shapes written by older schema versions. Only
//! BSON-specific scalars are mapped to their JSON forms: `ObjectId` becomes
//! its hex string and dates become ISO 8601 strings with millisecond
//! precision (`2024-03-12T09:30:00.000Z`).

use chrono::SecondsFormat;
use mongodb::bson::{Bson, Document};
use serde_json::{Map, Number, Value};

pub fn render_document(document: Document) -> Value {
    Value::Object(render_map(document))
}

fn render_map(document: Document) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (key, render_value(value)))
        .collect()
}

fn render_value(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::Number(i.into()),
        Bson::Int64(i) => Value::Number(i.into()),
        // Non-finite doubles have no JSON form.
        Bson::Double(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Bson::String(s) => Value::String(s),
        Bson::Symbol(s) => Value::String(s),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Array(items) => Value::Array(items.into_iter().map(render_value).collect()),
        Bson::Document(doc) => Value::Object(render_map(doc)),
        other => other.into_relaxed_extjson(),
    }
}
