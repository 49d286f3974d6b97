//! Rules for array, object and any fields. Arrays and objects only accept
//! their native JSON shapes; a string is never split or parsed.
use crate::schema::{CastRefusal, CastResult, TypedValue};
use serde_json::Value;

pub(crate) fn array_from_native(value: &Value) -> CastResult {
    match value {
        Value::Array(items) => Ok(TypedValue::Array(items.clone())),
        _ => Err(CastRefusal),
    }
}

pub(crate) fn object_from_native(value: &Value) -> CastResult {
    match value {
        Value::Object(map) => Ok(TypedValue::Object(map.clone())),
        _ => Err(CastRefusal),
    }
}

pub(crate) fn any_from_str(text: &str) -> CastResult {
    Ok(TypedValue::String(text.to_owned()))
}

pub(crate) fn any_from_native(value: &Value) -> CastResult {
    Ok(TypedValue::from(value.clone()))
}
