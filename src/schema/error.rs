//! Defines the error types for the casting engine.
use super::value::TypedValue;
use thiserror::Error;

/// Raised while building a field type from its descriptor. Never raised
/// while casting.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("field '{field}': unknown type '{type_name}'")]
    UnknownType { field: String, type_name: String },
    #[error("field '{field}': type '{type_name}' does not support format '{format}'")]
    UnsupportedFormat {
        field: String,
        type_name: String,
        format: String,
    },
    #[error("field '{field}': invalid date/time pattern '{pattern}'")]
    InvalidPattern { field: String, pattern: String },
    #[error("field '{field}': {option} must be exactly one character, got {value:?}")]
    InvalidSeparator {
        field: String,
        option: &'static str,
        value: String,
    },
    #[error("field '{field}': groupChar and decimalChar are both '{separator}'")]
    AmbiguousSeparators { field: String, separator: char },
    #[error("malformed field descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}

/// The value does not conform to the field's type and format.
///
/// Carries no payload: callers that need a reason wrap `cast` themselves.
#[derive(Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("value does not conform to the field type")]
pub struct CastRefusal;

pub type CastResult = Result<TypedValue, CastRefusal>;
