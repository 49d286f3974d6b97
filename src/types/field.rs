//! The uniform casting contract every field type honours.
use super::registry::TypeKind;
use super::rules::{
    collection,
    geo::{self, GeoPointFormat},
    logical,
    numeric::{self, NumberParser},
    temporal::{self, TemporalStrategy},
    text::{self, StringFormat},
};
use crate::schema::{CastRefusal, CastResult, FieldDescriptor, TypedValue};
use log::trace;
use serde_json::Value;

/// The resolved parsing strategy of a field, one variant per type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Caster {
    String(StringFormat),
    Integer,
    Number(NumberParser),
    Boolean,
    Null,
    Array,
    Object,
    Date(TemporalStrategy),
    Time(TemporalStrategy),
    DateTime(TemporalStrategy),
    Year,
    YearMonth,
    GeoPoint(GeoPointFormat),
    GeoJson,
    Any,
}

impl Caster {
    /// Textual input, after the empty-string rule has been applied.
    fn cast_text(&self, text: &str) -> CastResult {
        match self {
            Self::String(format) => text::cast(*format, text),
            Self::Integer => numeric::integer_from_str(text),
            Self::Number(parser) => parser.cast_text(text),
            Self::Boolean => logical::boolean_from_str(text),
            Self::Null => logical::null_from_str(text),
            Self::Array | Self::Object | Self::GeoJson => Err(CastRefusal),
            Self::Date(strategy) => temporal::date_from_str(strategy, text),
            Self::Time(strategy) => temporal::time_from_str(strategy, text),
            Self::DateTime(strategy) => temporal::datetime_from_str(strategy, text),
            Self::Year => temporal::year_from_str(text),
            Self::YearMonth => temporal::yearmonth_from_str(text),
            Self::GeoPoint(format) => geo::geopoint_from_str(*format, text),
            Self::Any => collection::any_from_str(text),
        }
    }

    /// Every non-string JSON shape.
    fn cast_native(&self, value: &Value) -> CastResult {
        match self {
            Self::Integer => numeric::integer_from_native(value),
            Self::Number(_) => numeric::number_from_native(value),
            Self::Boolean => logical::boolean_from_native(value),
            Self::Null => logical::null_from_native(value),
            Self::Array => collection::array_from_native(value),
            Self::Object => collection::object_from_native(value),
            Self::Year => temporal::year_from_native(value),
            Self::YearMonth => temporal::yearmonth_from_native(value),
            Self::GeoPoint(format) => geo::geopoint_from_native(*format, value),
            Self::GeoJson => geo::geojson_from_native(value),
            Self::Any => collection::any_from_native(value),
            // Strings and temporal values have no native JSON form.
            Self::String(_) | Self::Date(_) | Self::Time(_) | Self::DateTime(_) => {
                Err(CastRefusal)
            }
        }
    }
}

/// A field type bound to one descriptor.
///
/// Immutable once built; `cast` is a pure function of the instance and the
/// input, so one instance can serve many rows and many threads.
#[derive(Debug, Clone)]
pub struct FieldType {
    descriptor: FieldDescriptor,
    kind: TypeKind,
    caster: Caster,
}

impl FieldType {
    pub(crate) fn new(descriptor: FieldDescriptor, kind: TypeKind, caster: Caster) -> Self {
        Self {
            descriptor,
            kind,
            caster,
        }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Casts any JSON-shaped value. Strings take the same path as
    /// [`FieldType::cast_str`].
    pub fn cast(&self, value: &Value) -> CastResult {
        let result = match value {
            Value::String(text) => return self.cast_str(text),
            other => self.caster.cast_native(other),
        };
        if result.is_err() {
            trace!("field '{}': refused {} value", self.name(), shape_of(value));
        }
        result
    }

    /// Casts a raw cell, typically read from CSV.
    pub fn cast_str(&self, text: &str) -> CastResult {
        if let Some(empty) = self.check_empty(text) {
            return Ok(empty);
        }
        let result = self.caster.cast_text(text);
        if result.is_err() {
            trace!("field '{}': refused {:?} as {}", self.name(), text, self.kind);
        }
        result
    }

    pub fn test(&self, value: &Value) -> bool {
        self.cast(value).is_ok()
    }

    pub fn test_str(&self, text: &str) -> bool {
        self.cast_str(text).is_ok()
    }

    /// The empty-cell rule: an empty string in an optional field is the
    /// type's empty value, and no parsing happens. `None` means the rule does
    /// not apply and the type's own grammar decides.
    pub fn check_empty(&self, text: &str) -> Option<TypedValue> {
        (text.is_empty() && !self.descriptor.is_required()).then(|| self.kind.empty_value())
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
