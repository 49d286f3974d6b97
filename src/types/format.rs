//! Resolves a descriptor's `format` string and locale options into a parsing
//! strategy, once, at construction time.
use crate::schema::{ConfigurationError, FieldDescriptor};

pub const DEFAULT_GROUP_CHAR: char = ',';
pub const DEFAULT_DECIMAL_CHAR: char = '.';

const PATTERN_PREFIX: &str = "fmt:";

/// The universal shape of a `format` value. Each type decides which of
/// these it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    Default,
    Any,
    /// A strftime-style pattern from `fmt:<pattern>`.
    Pattern(String),
    /// A type-specific name such as `currency` or `email`.
    Named(String),
}

impl FormatSpec {
    pub fn parse(format: &str) -> Self {
        match format {
            "" | "default" => Self::Default,
            "any" => Self::Any,
            other => match other.strip_prefix(PATTERN_PREFIX) {
                Some(pattern) => Self::Pattern(pattern.to_string()),
                None => Self::Named(other.to_string()),
            },
        }
    }
}

/// The error every resolver returns for a format it does not understand.
pub(crate) fn unsupported(descriptor: &FieldDescriptor) -> ConfigurationError {
    ConfigurationError::UnsupportedFormat {
        field: descriptor.name.clone(),
        type_name: descriptor.type_name.clone(),
        format: descriptor.format.clone(),
    }
}

/// Resolver for types whose only grammar is the default one. `any` is
/// accepted and behaves the same.
pub(crate) fn require_default(
    descriptor: &FieldDescriptor,
    spec: &FormatSpec,
) -> Result<(), ConfigurationError> {
    match spec {
        FormatSpec::Default | FormatSpec::Any => Ok(()),
        _ => Err(unsupported(descriptor)),
    }
}

/// Group and decimal separators for textual numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group: char,
    pub decimal: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP_CHAR,
            decimal: DEFAULT_DECIMAL_CHAR,
        }
    }
}

impl NumberLocale {
    /// Reads `groupChar`/`decimalChar`, rejecting multi-character or equal
    /// separators.
    pub fn resolve(descriptor: &FieldDescriptor) -> Result<Self, ConfigurationError> {
        let group = single_char(
            descriptor,
            "groupChar",
            descriptor.group_char.as_deref(),
            DEFAULT_GROUP_CHAR,
        )?;
        let decimal = single_char(
            descriptor,
            "decimalChar",
            descriptor.decimal_char.as_deref(),
            DEFAULT_DECIMAL_CHAR,
        )?;

        if group == decimal {
            return Err(ConfigurationError::AmbiguousSeparators {
                field: descriptor.name.clone(),
                separator: group,
            });
        }
        Ok(Self { group, decimal })
    }
}

fn single_char(
    descriptor: &FieldDescriptor,
    option: &'static str,
    value: Option<&str>,
    default: char,
) -> Result<char, ConfigurationError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigurationError::InvalidSeparator {
            field: descriptor.name.clone(),
            option,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("default", FormatSpec::Default)]
    #[case("", FormatSpec::Default)]
    #[case("any", FormatSpec::Any)]
    #[case("fmt:%d/%m/%Y", FormatSpec::Pattern("%d/%m/%Y".into()))]
    #[case("currency", FormatSpec::Named("currency".into()))]
    #[case("ANY", FormatSpec::Named("ANY".into()))]
    fn test_format_spec_parsing(#[case] input: &str, #[case] expected: FormatSpec) {
        assert_eq!(FormatSpec::parse(input), expected);
    }

    #[test]
    fn test_locale_defaults() {
        let d = FieldDescriptor::new("n", "number");
        assert_eq!(NumberLocale::resolve(&d).unwrap(), NumberLocale::default());
    }

    #[test]
    fn test_locale_reads_custom_separators() {
        let d = FieldDescriptor::new("n", "number")
            .with_group_char("Q")
            .with_decimal_char("#");
        let locale = NumberLocale::resolve(&d).unwrap();
        assert_eq!(locale, NumberLocale { group: 'Q', decimal: '#' });
    }

    #[test]
    fn test_locale_rejects_equal_separators() {
        // Only decimalChar is set; it collides with the default group char.
        let d = FieldDescriptor::new("n", "number").with_decimal_char(",");
        let err = NumberLocale::resolve(&d).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::AmbiguousSeparators { separator: ',', .. }
        ));
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    fn test_locale_rejects_non_single_chars(#[case] separator: &str) {
        let d = FieldDescriptor::new("n", "number").with_group_char(separator);
        let err = NumberLocale::resolve(&d).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidSeparator { option: "groupChar", .. }
        ));
    }
}
