//! Rules for boolean and null fields. Both are fixed word-sets matched
//! case-insensitively; neither is configurable per descriptor.
use crate::schema::{CastRefusal, CastResult, TypedValue};
use serde_json::Value;

const TRUE_WORDS: [&str; 5] = ["true", "t", "yes", "y", "1"];
const FALSE_WORDS: [&str; 5] = ["false", "f", "no", "n", "0"];
/// The empty spelling lets a required null field accept an empty cell.
const NULL_WORDS: [&str; 6] = ["null", "none", "nil", "nan", "-", ""];

fn is_one_of(words: &[&str], text: &str) -> bool {
    words.iter().any(|w| w.eq_ignore_ascii_case(text))
}

pub(crate) fn boolean_from_str(text: &str) -> CastResult {
    if is_one_of(&TRUE_WORDS, text) {
        Ok(TypedValue::Boolean(true))
    } else if is_one_of(&FALSE_WORDS, text) {
        Ok(TypedValue::Boolean(false))
    } else {
        Err(CastRefusal)
    }
}

pub(crate) fn boolean_from_native(value: &Value) -> CastResult {
    match value {
        Value::Bool(b) => Ok(TypedValue::Boolean(*b)),
        _ => Err(CastRefusal),
    }
}

pub(crate) fn null_from_str(text: &str) -> CastResult {
    if is_one_of(&NULL_WORDS, text) {
        Ok(TypedValue::Null)
    } else {
        Err(CastRefusal)
    }
}

pub(crate) fn null_from_native(value: &Value) -> CastResult {
    match value {
        Value::Null => Ok(TypedValue::Null),
        _ => Err(CastRefusal),
    }
}
