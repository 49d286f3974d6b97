//! Rules for integer and number fields, including locale-aware and currency
//! numerals.
use crate::schema::{CastRefusal, CastResult, ConfigurationError, FieldDescriptor, TypedValue};
use crate::types::format::{require_default, unsupported, FormatSpec, NumberLocale};
use serde_json::Value;
use smallvec::SmallVec;
use std::borrow::Cow;

/// Symbols tolerated once, before or after a currency amount.
const CURRENCY_SYMBOLS: [char; 14] = [
    '$', '€', '£', '¥', '₹', '₽', '₩', '₺', '₪', '₫', '฿', '₴', '₦', '¢',
];

/// Typical numerals fit inline; longer ones spill to the heap.
type Numeral = SmallVec<[u8; 32]>;

pub(crate) fn resolve_integer(
    descriptor: &FieldDescriptor,
    spec: &FormatSpec,
) -> Result<(), ConfigurationError> {
    require_default(descriptor, spec)
}

pub(crate) fn integer_from_str(text: &str) -> CastResult {
    text.parse::<i64>()
        .map(TypedValue::Integer)
        .map_err(|_| CastRefusal)
}

/// Only JSON integers that fit an `i64`. `1.0` is a float and is refused.
pub(crate) fn integer_from_native(value: &Value) -> CastResult {
    match value {
        Value::Number(n) => n.as_i64().map(TypedValue::Integer).ok_or(CastRefusal),
        _ => Err(CastRefusal),
    }
}

pub(crate) fn number_from_native(value: &Value) -> CastResult {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map(TypedValue::Number)
            .ok_or(CastRefusal),
        _ => Err(CastRefusal),
    }
}

/// A resolved number strategy: separators plus the currency leniency flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberParser {
    locale: NumberLocale,
    currency: bool,
}

impl NumberParser {
    pub(crate) fn resolve(
        descriptor: &FieldDescriptor,
        spec: &FormatSpec,
    ) -> Result<Self, ConfigurationError> {
        let currency = match spec {
            FormatSpec::Default | FormatSpec::Any => false,
            FormatSpec::Named(name) if name == "currency" => true,
            _ => return Err(unsupported(descriptor)),
        };
        Ok(Self {
            locale: NumberLocale::resolve(descriptor)?,
            currency,
        })
    }

    pub(crate) fn is_currency(&self) -> bool {
        self.currency
    }

    pub(crate) fn locale(&self) -> NumberLocale {
        self.locale
    }

    pub(crate) fn cast_text(&self, text: &str) -> CastResult {
        let numeral = if self.currency {
            let stripped = strip_currency(text)?;
            self.check_currency_layout(&stripped)?;
            stripped
        } else {
            Cow::Borrowed(text)
        };
        let normalized = self.normalize(&numeral)?;
        parse_numeral(&normalized).map(TypedValue::Number)
    }

    /// Drops group separators and maps the single decimal separator to `.`.
    fn normalize(&self, numeral: &str) -> Result<Numeral, CastRefusal> {
        let mut out = Numeral::new();
        let mut seen_decimal = false;
        for c in numeral.chars() {
            if c == self.locale.group {
                continue;
            }
            if c == self.locale.decimal {
                if seen_decimal {
                    return Err(CastRefusal);
                }
                seen_decimal = true;
                out.push(b'.');
            } else if !c.is_ascii() {
                return Err(CastRefusal);
            } else {
                out.push(c as u8);
            }
        }
        Ok(out)
    }

    /// Group separators only between digits and never after the decimal
    /// separator; the decimal separator at most once and followed by a digit.
    fn check_currency_layout(&self, numeral: &str) -> Result<(), CastRefusal> {
        let chars: SmallVec<[char; 32]> = numeral.chars().collect();
        let digit_at = |i: usize| chars.get(i).is_some_and(|c| c.is_ascii_digit());
        let mut seen_decimal = false;

        for (i, &c) in chars.iter().enumerate() {
            if c == self.locale.group {
                let between_digits = i > 0 && digit_at(i - 1) && digit_at(i + 1);
                if seen_decimal || !between_digits {
                    return Err(CastRefusal);
                }
            } else if c == self.locale.decimal {
                if seen_decimal || !digit_at(i + 1) {
                    return Err(CastRefusal);
                }
                seen_decimal = true;
            }
        }
        Ok(())
    }
}

/// Trims whitespace and removes one leading or trailing currency symbol.
/// A minus sign may precede a leading symbol (`-$10`).
fn strip_currency(text: &str) -> Result<Cow<'_, str>, CastRefusal> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let amount = if let Some(rest) = rest.strip_prefix(&CURRENCY_SYMBOLS[..]) {
        rest.trim_start()
    } else if let Some(rest) = rest.strip_suffix(&CURRENCY_SYMBOLS[..]) {
        rest.trim_end()
    } else {
        rest
    };

    if amount.is_empty() {
        return Err(CastRefusal);
    }
    if negative {
        Ok(Cow::Owned(format!("-{amount}")))
    } else {
        Ok(Cow::Borrowed(amount))
    }
}

/// Parses `-?DIGITS(.DIGITS)?` exactly; anything else is refused.
pub(crate) fn parse_numeral(numeral: &[u8]) -> Result<f64, CastRefusal> {
    let unsigned = numeral.strip_prefix(b"-").unwrap_or(numeral);
    let (whole, fraction) = match unsigned.iter().position(|&b| b == b'.') {
        Some(dot) => (&unsigned[..dot], Some(&unsigned[dot + 1..])),
        None => (unsigned, None),
    };

    let all_digits = |part: &[u8]| !part.is_empty() && part.iter().all(u8::is_ascii_digit);
    if !all_digits(whole) || fraction.is_some_and(|f| !all_digits(f)) {
        return Err(CastRefusal);
    }

    let text = std::str::from_utf8(numeral).map_err(|_| CastRefusal)?;
    let value: f64 = text.parse().map_err(|_| CastRefusal)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CastRefusal)
    }
}
