//! Field descriptors, deserialized from a Table-Schema `fields` entry.
use super::error::ConfigurationError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FORMAT: &str = "default";

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

/// Constraints attached to a field. Only `required` affects casting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    /// When `false`, an empty string casts to the type's empty value.
    #[serde(default)]
    pub required: bool,
}

/// The immutable description of a single schema field.
///
/// Unknown keys (`title`, `description`, ...) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Used for diagnostics only.
    #[serde(default)]
    pub name: String,
    /// The registered type name, e.g. `"number"` or `"datetime"`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// `"default"`, `"any"`, `"fmt:<pattern>"` or a type-specific name.
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub constraints: Constraints,
    /// Thousands separator for numbers. Kept as a string so a multi-character
    /// value can be reported as a configuration error instead of a parse error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_char: Option<String>,
    /// Decimal separator for numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_char: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            format: default_format(),
            constraints: Constraints::default(),
            group_char: None,
            decimal_char: None,
        }
    }

    /// Parses a single descriptor from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.constraints.required = required;
        self
    }

    pub fn with_group_char(mut self, group_char: impl Into<String>) -> Self {
        self.group_char = Some(group_char.into());
        self
    }

    pub fn with_decimal_char(mut self, decimal_char: impl Into<String>) -> Self {
        self.decimal_char = Some(decimal_char.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.constraints.required
    }
}
