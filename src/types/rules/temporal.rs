//! Rules for date, time, datetime, year and yearmonth fields.
//!
//! `default` is one strict ISO layout per type, `any` walks a fixed list of
//! grammars in order, and `fmt:<pattern>` hands the pattern to chrono's
//! strftime parser.
use crate::schema::{CastRefusal, CastResult, ConfigurationError, FieldDescriptor, TypedValue};
use crate::types::format::{require_default, unsupported, FormatSpec};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Date-only grammars tried by `any`, in priority order. Day/month orders
/// that are ambiguous with slashes (`01/02/2003`) are deliberately absent.
/// `%b` only matches the three-letter abbreviation, so each textual grammar
/// has a `%B` twin for full month names.
const DATE_GRAMMARS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%a, %d %b %Y",
];

/// Zone-less date-time grammars tried by `any`.
const DATETIME_GRAMMARS: [&str; 15] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%d %B %Y %H:%M",
    "%d %b %Y %I:%M %p",
    "%b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M",
    "%b %d, %Y %H:%M",
    "%B %d, %Y %H:%M",
];

/// Zoned grammars tried by `any` after RFC 3339 and RFC 2822.
const ZONED_GRAMMARS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

const TIME_GRAMMARS: [&str; 5] = ["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p", "%I:%M%p"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemporalStrategy {
    Default,
    Any,
    Pattern(String),
}

pub(crate) fn resolve(
    descriptor: &FieldDescriptor,
    spec: &FormatSpec,
) -> Result<TemporalStrategy, ConfigurationError> {
    match spec {
        FormatSpec::Default => Ok(TemporalStrategy::Default),
        FormatSpec::Any => Ok(TemporalStrategy::Any),
        FormatSpec::Pattern(pattern) => {
            let malformed = pattern.is_empty()
                || StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
            if malformed {
                Err(ConfigurationError::InvalidPattern {
                    field: descriptor.name.clone(),
                    pattern: pattern.clone(),
                })
            } else {
                Ok(TemporalStrategy::Pattern(pattern.clone()))
            }
        }
        FormatSpec::Named(_) => Err(unsupported(descriptor)),
    }
}

pub(crate) fn resolve_plain(
    descriptor: &FieldDescriptor,
    spec: &FormatSpec,
) -> Result<(), ConfigurationError> {
    require_default(descriptor, spec)
}

// --- Strict ISO layouts ---

/// Value of an all-digit byte run, or `None` if any byte is not a digit.
fn digits(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() {
        return None;
    }
    bytes.iter().try_fold(0u32, |acc, &b| {
        b.is_ascii_digit()
            .then(|| acc * 10 + u32::from(b - b'0'))
    })
}

fn year_digits(bytes: &[u8]) -> Option<i32> {
    digits(bytes).and_then(|y| i32::try_from(y).ok())
}

/// `YYYY-MM-DD`
fn iso_date(text: &str) -> Option<NaiveDate> {
    let b = text.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return None;
    }
    NaiveDate::from_ymd_opt(year_digits(&b[0..4])?, digits(&b[5..7])?, digits(&b[8..10])?)
}

/// `HH:MM:SS`
fn iso_time(text: &str) -> Option<NaiveTime> {
    let b = text.as_bytes();
    if b.len() != 8 || b[2] != b':' || b[5] != b':' {
        return None;
    }
    NaiveTime::from_hms_opt(digits(&b[0..2])?, digits(&b[3..5])?, digits(&b[6..8])?)
}

/// `YYYY-MM-DDTHH:MM:SS[.f](Z|±HH:MM)` with an upper-case `T` and `Z`.
fn iso_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    if text.as_bytes().get(10) != Some(&b'T') || text.ends_with('z') {
        return None;
    }
    DateTime::parse_from_rfc3339(text).ok()
}

fn utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    naive.and_utc().fixed_offset()
}

// --- Free-form grammars ---

fn any_zoned(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
        .or_else(|| {
            ZONED_GRAMMARS
                .iter()
                .find_map(|g| DateTime::parse_from_str(text, g).ok())
        })
}

fn any_naive_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_GRAMMARS
        .iter()
        .find_map(|g| NaiveDateTime::parse_from_str(text, g).ok())
}

fn any_date_only(text: &str) -> Option<NaiveDate> {
    DATE_GRAMMARS
        .iter()
        .find_map(|g| NaiveDate::parse_from_str(text, g).ok())
}

fn any_date(text: &str) -> Option<NaiveDate> {
    any_date_only(text)
        .or_else(|| any_naive_datetime(text).map(|dt| dt.date()))
        .or_else(|| any_zoned(text).map(|dt| dt.date_naive()))
}

fn any_time(text: &str) -> Option<NaiveTime> {
    TIME_GRAMMARS
        .iter()
        .find_map(|g| NaiveTime::parse_from_str(text, g).ok())
        .or_else(|| any_naive_datetime(text).map(|dt| dt.time()))
        .or_else(|| any_zoned(text).map(|dt| dt.time()))
}

fn any_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    any_zoned(text)
        .or_else(|| any_naive_datetime(text).map(utc))
        .or_else(|| {
            any_date_only(text)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(utc)
        })
}

/// A user pattern may or may not carry an offset or a time of day.
fn pattern_datetime(text: &str, pattern: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(text, pattern)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, pattern).ok().map(utc))
        .or_else(|| {
            NaiveDate::parse_from_str(text, pattern)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(utc)
        })
}

// --- Entry points ---

pub(crate) fn date_from_str(strategy: &TemporalStrategy, text: &str) -> CastResult {
    let date = match strategy {
        TemporalStrategy::Default => iso_date(text),
        TemporalStrategy::Any => any_date(text),
        TemporalStrategy::Pattern(p) => NaiveDate::parse_from_str(text, p).ok(),
    };
    date.map(TypedValue::Date).ok_or(CastRefusal)
}

pub(crate) fn time_from_str(strategy: &TemporalStrategy, text: &str) -> CastResult {
    let time = match strategy {
        TemporalStrategy::Default => iso_time(text),
        TemporalStrategy::Any => any_time(text),
        TemporalStrategy::Pattern(p) => NaiveTime::parse_from_str(text, p).ok(),
    };
    time.map(TypedValue::Time).ok_or(CastRefusal)
}

pub(crate) fn datetime_from_str(strategy: &TemporalStrategy, text: &str) -> CastResult {
    let datetime = match strategy {
        TemporalStrategy::Default => iso_datetime(text),
        TemporalStrategy::Any => any_datetime(text),
        TemporalStrategy::Pattern(p) => pattern_datetime(text, p),
    };
    datetime.map(TypedValue::DateTime).ok_or(CastRefusal)
}

/// `YYYY`
pub(crate) fn year_from_str(text: &str) -> CastResult {
    let b = text.as_bytes();
    if b.len() != 4 {
        return Err(CastRefusal);
    }
    year_digits(b).map(TypedValue::Year).ok_or(CastRefusal)
}

pub(crate) fn year_from_native(value: &Value) -> CastResult {
    value
        .as_i64()
        .and_then(|y| i32::try_from(y).ok())
        .map(TypedValue::Year)
        .ok_or(CastRefusal)
}

fn year_month(year: i32, month: u32) -> CastResult {
    if (1..=12).contains(&month) {
        Ok(TypedValue::YearMonth { year, month })
    } else {
        Err(CastRefusal)
    }
}

/// `YYYY-MM`
pub(crate) fn yearmonth_from_str(text: &str) -> CastResult {
    let b = text.as_bytes();
    if b.len() != 7 || b[4] != b'-' {
        return Err(CastRefusal);
    }
    let year = year_digits(&b[0..4]).ok_or(CastRefusal)?;
    let month = digits(&b[5..7]).ok_or(CastRefusal)?;
    year_month(year, month)
}

/// `[year, month]`
pub(crate) fn yearmonth_from_native(value: &Value) -> CastResult {
    let Value::Array(items) = value else {
        return Err(CastRefusal);
    };
    match items.as_slice() {
        [year, month] => {
            let year = year.as_i64().and_then(|y| i32::try_from(y).ok());
            let month = month.as_u64().and_then(|m| u32::try_from(m).ok());
            match (year, month) {
                (Some(year), Some(month)) => year_month(year, month),
                _ => Err(CastRefusal),
            }
        }
        _ => Err(CastRefusal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use rstest::rstest;
    use serde_json::json;

    fn pattern(p: &str) -> TemporalStrategy {
        TemporalStrategy::Pattern(p.to_string())
    }

    fn ymd(y: i32, m: u32, d: u32) -> CastResult {
        Ok(TypedValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap()))
    }

    #[rstest]
    #[case(TemporalStrategy::Default, "2019-01-01", 2019, 1, 1)]
    #[case(TemporalStrategy::Any, "10 Jan 1969", 1969, 1, 10)]
    #[case(TemporalStrategy::Any, "10 January 1969", 1969, 1, 10)]
    #[case(TemporalStrategy::Any, "2019-01-01", 2019, 1, 1)]
    #[case(TemporalStrategy::Any, "Jan 10, 1969", 1969, 1, 10)]
    #[case(TemporalStrategy::Any, "January 10, 1969", 1969, 1, 10)]
    #[case(TemporalStrategy::Any, "January 10 1969", 1969, 1, 10)]
    #[case(TemporalStrategy::Any, "10 Jan 1969 9:00", 1969, 1, 10)]
    #[case(pattern("%d/%m/%Y"), "10/06/2014", 2014, 6, 10)]
    fn test_date_accepts(
        #[case] strategy: TemporalStrategy,
        #[case] input: &str,
        #[case] y: i32,
        #[case] m: u32,
        #[case] d: u32,
    ) {
        assert_eq!(date_from_str(&strategy, input), ymd(y, m, d));
    }

    #[rstest]
    #[case(TemporalStrategy::Default, "01-01-2019")]
    #[case(TemporalStrategy::Default, "2019-1-1")]
    #[case(TemporalStrategy::Default, "2019/01/01")]
    #[case(TemporalStrategy::Default, "2019-02-30")]
    #[case(TemporalStrategy::Default, "10 Jan 1969")]
    #[case(TemporalStrategy::Any, "10th Jan nineteen sixty nine")]
    #[case(TemporalStrategy::Any, "yesterday")]
    #[case(pattern("%d/%m/%Y"), "2014/12/19")]
    #[case(pattern("%d/%m/%Y"), "10/06/2014 extra")]
    fn test_date_refuses(#[case] strategy: TemporalStrategy, #[case] input: &str) {
        assert_eq!(date_from_str(&strategy, input), Err(CastRefusal));
    }

    #[rstest]
    #[case(TemporalStrategy::Default, "06:00:00", 6, 0, 0)]
    #[case(TemporalStrategy::Default, "23:59:59", 23, 59, 59)]
    #[case(TemporalStrategy::Any, "06:00", 6, 0, 0)]
    #[case(TemporalStrategy::Any, "3:30 PM", 15, 30, 0)]
    #[case(TemporalStrategy::Any, "2014-01-01T06:00:00Z", 6, 0, 0)]
    #[case(TemporalStrategy::Any, "10 January 1969 9:00", 9, 0, 0)]
    #[case(pattern("%H.%M"), "07.15", 7, 15, 0)]
    fn test_time_accepts(
        #[case] strategy: TemporalStrategy,
        #[case] input: &str,
        #[case] h: u32,
        #[case] m: u32,
        #[case] s: u32,
    ) {
        let Ok(TypedValue::Time(time)) = time_from_str(&strategy, input) else {
            panic!("expected a time for {input:?}");
        };
        assert_eq!((time.hour(), time.minute(), time.second()), (h, m, s));
    }

    #[rstest]
    #[case(TemporalStrategy::Default, "3 am")]
    #[case(TemporalStrategy::Default, "6:00:00")]
    #[case(TemporalStrategy::Default, "24:00:00")]
    #[case(TemporalStrategy::Default, "06:00")]
    #[case(TemporalStrategy::Any, "3 am")]
    #[case(pattern("%H.%M"), "07:15")]
    fn test_time_refuses(#[case] strategy: TemporalStrategy, #[case] input: &str) {
        assert_eq!(time_from_str(&strategy, input), Err(CastRefusal));
    }

    #[test]
    fn test_datetime_default_requires_zone() {
        let Ok(TypedValue::DateTime(dt)) =
            datetime_from_str(&TemporalStrategy::Default, "2014-01-01T06:00:00Z")
        else {
            panic!("expected a datetime");
        };
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!((dt.year(), dt.hour()), (2014, 6));

        assert!(datetime_from_str(&TemporalStrategy::Default, "2014-01-01T06:00:00+02:00").is_ok());
        assert_eq!(
            datetime_from_str(&TemporalStrategy::Default, "2014-01-01T06:00:00"),
            Err(CastRefusal)
        );
        for deviating in [
            "01/01/2014 06:00",
            "2014-01-01 06:00:00Z",
            "2014-01-01t06:00:00z",
            "2014-01-01T06:00:00z",
        ] {
            assert_eq!(
                datetime_from_str(&TemporalStrategy::Default, deviating),
                Err(CastRefusal),
                "{deviating:?}"
            );
        }
    }

    #[rstest]
    #[case("10 Jan 1969 9:00", 1969, 9)]
    #[case("10 Jan 1969", 1969, 0)]
    #[case("10 January 1969 9:00", 1969, 9)]
    #[case("10 January 1969 09:00:30", 1969, 9)]
    #[case("January 10, 1969 9:00", 1969, 9)]
    #[case("2014-01-01 06:00:00", 2014, 6)]
    #[case("2014-01-01T06:00:00+01:00", 2014, 6)]
    #[case("Fri, 10 Jan 1969 09:00:00 +0000", 1969, 9)]
    fn test_datetime_any_accepts(#[case] input: &str, #[case] year: i32, #[case] hour: u32) {
        let Ok(TypedValue::DateTime(dt)) = datetime_from_str(&TemporalStrategy::Any, input) else {
            panic!("expected a datetime for {input:?}");
        };
        assert_eq!((dt.year(), dt.hour()), (year, hour));
    }

    #[rstest]
    #[case("10 Jan 1969 9")]
    #[case("sometime in 1969")]
    #[case("")]
    fn test_datetime_any_refuses(#[case] input: &str) {
        assert_eq!(datetime_from_str(&TemporalStrategy::Any, input), Err(CastRefusal));
    }

    #[test]
    fn test_datetime_pattern_with_and_without_time() {
        let with_time = pattern("%d/%m/%Y %H:%M");
        let Ok(TypedValue::DateTime(dt)) = datetime_from_str(&with_time, "10/06/2014 13:45") else {
            panic!("expected a datetime");
        };
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (10, 13, 45));

        let date_only = pattern("%d/%m/%Y");
        let Ok(TypedValue::DateTime(dt)) = datetime_from_str(&date_only, "10/06/2014") else {
            panic!("expected a datetime");
        };
        assert_eq!((dt.month(), dt.hour()), (6, 0));
        assert_eq!(datetime_from_str(&date_only, "2014/12/19"), Err(CastRefusal));
    }

    #[test]
    fn test_resolve_validates_patterns() {
        let d = FieldDescriptor::new("when", "date").with_format("fmt:%d/%Q/%Y");
        let err = resolve(&d, &FormatSpec::parse(&d.format)).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));

        let d = FieldDescriptor::new("when", "date").with_format("fmt:");
        assert!(resolve(&d, &FormatSpec::parse(&d.format)).is_err());

        let d = FieldDescriptor::new("when", "date").with_format("iso");
        let err = resolve(&d, &FormatSpec::parse(&d.format)).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnsupportedFormat { .. }));
    }

    #[rstest]
    #[case("2019", Ok(TypedValue::Year(2019)))]
    #[case("0999", Ok(TypedValue::Year(999)))]
    #[case("19", Err(CastRefusal))]
    #[case("20a9", Err(CastRefusal))]
    #[case("-200", Err(CastRefusal))]
    fn test_year_strings(#[case] input: &str, #[case] expected: CastResult) {
        assert_eq!(year_from_str(input), expected);
    }

    #[test]
    fn test_year_native() {
        assert_eq!(year_from_native(&json!(2019)), Ok(TypedValue::Year(2019)));
        assert_eq!(year_from_native(&json!(2019.5)), Err(CastRefusal));
        assert_eq!(year_from_native(&json!("2019")), Err(CastRefusal));
    }

    #[rstest]
    #[case("2019-06", Ok(TypedValue::YearMonth { year: 2019, month: 6 }))]
    #[case("2019-13", Err(CastRefusal))]
    #[case("2019-00", Err(CastRefusal))]
    #[case("2019-6", Err(CastRefusal))]
    #[case("201906", Err(CastRefusal))]
    fn test_yearmonth_strings(#[case] input: &str, #[case] expected: CastResult) {
        assert_eq!(yearmonth_from_str(input), expected);
    }

    #[test]
    fn test_yearmonth_native() {
        assert_eq!(
            yearmonth_from_native(&json!([2019, 6])),
            Ok(TypedValue::YearMonth { year: 2019, month: 6 })
        );
        assert_eq!(yearmonth_from_native(&json!([2019, 13])), Err(CastRefusal));
        assert_eq!(yearmonth_from_native(&json!([2019])), Err(CastRefusal));
        assert_eq!(yearmonth_from_native(&json!({"year": 2019})), Err(CastRefusal));
    }
}
