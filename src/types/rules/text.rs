//! Rule for string fields and their named formats.
use crate::schema::{CastRefusal, CastResult, ConfigurationError, FieldDescriptor, TypedValue};
use crate::types::format::{unsupported, FormatSpec};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StringFormat {
    Default,
    Email,
    Uri,
    Binary,
    Uuid,
}

pub(crate) fn resolve(
    descriptor: &FieldDescriptor,
    spec: &FormatSpec,
) -> Result<StringFormat, ConfigurationError> {
    match spec {
        FormatSpec::Default | FormatSpec::Any => Ok(StringFormat::Default),
        FormatSpec::Named(name) => match name.as_str() {
            "email" => Ok(StringFormat::Email),
            "uri" => Ok(StringFormat::Uri),
            "binary" => Ok(StringFormat::Binary),
            "uuid" => Ok(StringFormat::Uuid),
            _ => Err(unsupported(descriptor)),
        },
        FormatSpec::Pattern(_) => Err(unsupported(descriptor)),
    }
}

/// Accepts the string verbatim once it passes its format check. Non-string
/// input never reaches this rule; the dispatcher refuses it outright.
pub(crate) fn cast(format: StringFormat, text: &str) -> CastResult {
    if text.is_empty() {
        return Err(CastRefusal);
    }
    let conforms = match format {
        StringFormat::Default => true,
        StringFormat::Email => is_email(text),
        StringFormat::Uri => is_uri(text),
        StringFormat::Binary => STANDARD.decode(text).is_ok(),
        StringFormat::Uuid => Uuid::parse_str(text).is_ok(),
    };
    if conforms {
        Ok(TypedValue::String(text.to_owned()))
    } else {
        Err(CastRefusal)
    }
}

fn is_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// `scheme ":" rest`, with an RFC 3986 scheme and a non-empty remainder.
fn is_uri(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((scheme, rest)) = text.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid_scheme && !rest.is_empty()
}
