//! Maps declared type names onto field type factories.
use super::field::{Caster, FieldType};
use super::format::{self, FormatSpec};
use super::rules::{geo, numeric, temporal, text};
use crate::schema::{ConfigurationError, FieldDescriptor, TypedValue};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Every type the engine knows how to cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Array,
    Object,
    Date,
    Time,
    DateTime,
    Year,
    YearMonth,
    GeoPoint,
    GeoJson,
    Any,
}

impl TypeKind {
    pub const ALL: [TypeKind; 15] = [
        Self::String,
        Self::Integer,
        Self::Number,
        Self::Boolean,
        Self::Null,
        Self::Array,
        Self::Object,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Year,
        Self::YearMonth,
        Self::GeoPoint,
        Self::GeoJson,
        Self::Any,
    ];

    /// The name used in descriptors.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Array => "array",
            Self::Object => "object",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Year => "year",
            Self::YearMonth => "yearmonth",
            Self::GeoPoint => "geopoint",
            Self::GeoJson => "geojson",
            Self::Any => "any",
        }
    }

    /// What an empty cell casts to in an optional field.
    pub fn empty_value(self) -> TypedValue {
        match self {
            Self::String => TypedValue::String(String::new()),
            Self::Array => TypedValue::Array(Vec::new()),
            Self::Object => TypedValue::Object(Map::new()),
            _ => TypedValue::Null,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with a descriptor whose type name is not registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTypePolicy {
    /// Fail construction with [`ConfigurationError::UnknownType`].
    #[default]
    Reject,
    /// Build an `any` field instead.
    Any,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryOptions {
    #[serde(default)]
    pub unknown_types: UnknownTypePolicy,
}

/// Builds a [`Caster`] from a descriptor and its parsed format.
type Factory = fn(&FieldDescriptor, &FormatSpec) -> Result<Caster, ConfigurationError>;

fn string_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    text::resolve(d, spec).map(Caster::String)
}

fn integer_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    numeric::resolve_integer(d, spec).map(|()| Caster::Integer)
}

fn number_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    let parser = numeric::NumberParser::resolve(d, spec)?;
    let locale = parser.locale();
    debug!(
        "field '{}': number strategy group={:?} decimal={:?} currency={}",
        d.name,
        locale.group,
        locale.decimal,
        parser.is_currency()
    );
    Ok(Caster::Number(parser))
}

fn date_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    temporal::resolve(d, spec).map(Caster::Date)
}

fn time_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    temporal::resolve(d, spec).map(Caster::Time)
}

fn datetime_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    temporal::resolve(d, spec).map(Caster::DateTime)
}

fn geopoint_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    geo::resolve_geopoint(d, spec).map(Caster::GeoPoint)
}

fn geojson_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    geo::resolve_geojson(d, spec).map(|()| Caster::GeoJson)
}

fn year_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    temporal::resolve_plain(d, spec).map(|()| Caster::Year)
}

fn yearmonth_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    temporal::resolve_plain(d, spec).map(|()| Caster::YearMonth)
}

fn boolean_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    format::require_default(d, spec).map(|()| Caster::Boolean)
}

fn null_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    format::require_default(d, spec).map(|()| Caster::Null)
}

fn array_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    format::require_default(d, spec).map(|()| Caster::Array)
}

fn object_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    format::require_default(d, spec).map(|()| Caster::Object)
}

fn any_factory(d: &FieldDescriptor, spec: &FormatSpec) -> Result<Caster, ConfigurationError> {
    format::require_default(d, spec).map(|()| Caster::Any)
}

fn factory_for(kind: TypeKind) -> Factory {
    match kind {
        TypeKind::String => string_factory,
        TypeKind::Integer => integer_factory,
        TypeKind::Number => number_factory,
        TypeKind::Date => date_factory,
        TypeKind::Time => time_factory,
        TypeKind::DateTime => datetime_factory,
        TypeKind::Year => year_factory,
        TypeKind::YearMonth => yearmonth_factory,
        TypeKind::GeoPoint => geopoint_factory,
        TypeKind::GeoJson => geojson_factory,
        TypeKind::Boolean => boolean_factory,
        TypeKind::Null => null_factory,
        TypeKind::Array => array_factory,
        TypeKind::Object => object_factory,
        TypeKind::Any => any_factory,
    }
}

/// Resolves type names to factories. Names are matched exactly.
#[derive(Clone)]
pub struct TypeRegistry {
    factories: HashMap<&'static str, (TypeKind, Factory)>,
    options: RegistryOptions,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.type_names().collect();
        names.sort_unstable();
        f.debug_struct("TypeRegistry")
            .field("types", &names)
            .field("options", &self.options)
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(RegistryOptions::default())
    }
}

impl TypeRegistry {
    pub fn new(options: RegistryOptions) -> Self {
        let factories = TypeKind::ALL
            .iter()
            .map(|&kind| (kind.name(), (kind, factory_for(kind))))
            .collect();
        Self { factories, options }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub fn kind_of(&self, type_name: &str) -> Option<TypeKind> {
        self.factories.get(type_name).map(|(kind, _)| *kind)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Builds the field type for `descriptor`. All descriptor problems are
    /// reported here, never while casting.
    pub fn create(&self, descriptor: &FieldDescriptor) -> Result<FieldType, ConfigurationError> {
        let (kind, factory) = match self.factories.get(descriptor.type_name.as_str()) {
            Some(entry) => *entry,
            None => match self.options.unknown_types {
                UnknownTypePolicy::Reject => {
                    return Err(ConfigurationError::UnknownType {
                        field: descriptor.name.clone(),
                        type_name: descriptor.type_name.clone(),
                    });
                }
                UnknownTypePolicy::Any => {
                    warn!(
                        "field '{}': unknown type '{}', casting as any",
                        descriptor.name, descriptor.type_name
                    );
                    (TypeKind::Any, factory_for(TypeKind::Any))
                }
            },
        };

        let spec = FormatSpec::parse(&descriptor.format);
        let caster = factory(descriptor, &spec)?;
        debug!(
            "field '{}': built {} caster for format {:?}",
            descriptor.name, kind, spec
        );
        Ok(FieldType::new(descriptor.clone(), kind, caster))
    }
}

static DEFAULT_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// The process-wide registry behind [`create_type`], built on first use.
pub(crate) fn default_registry() -> &'static TypeRegistry {
    DEFAULT_REGISTRY.get_or_init(TypeRegistry::default)
}

/// Builds a field type with the default registry, which rejects unknown
/// type names.
pub fn create_type(descriptor: &FieldDescriptor) -> Result<FieldType, ConfigurationError> {
    default_registry().create(descriptor)
}
