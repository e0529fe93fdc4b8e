//! Time related utils.

use crate::Error;
use chrono::Datelike;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::SecondsFormat;
use chrono::TimeZone;
use chrono::Utc;

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Format time into RFC3339: `2022-03-13T07:20:04Z`
///
/// Sub-second precision is dropped and the time is always rendered in UTC.
pub fn format_rfc3339(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse time from RFC3339.
///
/// All of them are valid time:
///
/// - `2022-03-13T07:20:04Z`
/// - `2022-03-01T08:12:34+00:00`
/// - `2022-03-01T08:12:34.00+00:00`
pub fn parse_rfc3339(s: &str) -> crate::Result<DateTime> {
    Ok(chrono::DateTime::parse_from_rfc3339(s)
        .map_err(|e| Error::invalid_format(format!("parse {s} into rfc3339 failed")).with_source(e))?
        .with_timezone(&Utc))
}

/// Parse a human entered ISO 8601 datetime.
///
/// Formats are tried from least to greatest precision, the first match wins:
///
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DD<TZD>`
/// - `YYYY-MM-DDThh:mm`
/// - `YYYY-MM-DDThh:mm<TZD>`
/// - `YYYY-MM-DDThh:mm:ss`
/// - `YYYY-MM-DDThh:mm:ss<TZD>` (RFC3339, fractional seconds allowed)
///
/// `<TZD>` is either `Z` or `+hh:mm`/`-hh:mm`. Input without a zone
/// designator is taken as UTC. Every number is fixed width and zero padded,
/// and the result must fall within years `0000` to `9999` in UTC.
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    if s.is_empty() {
        return Err(Error::empty_input("datetime provided to parse is empty"));
    }

    let parsers: [fn(&str) -> Option<DateTime>; 6] = [
        parse_date,
        |s| with_offset(s, parse_date),
        parse_date_minutes,
        |s| with_offset(s, parse_date_minutes),
        parse_date_seconds,
        parse_date_seconds_with_offset,
    ];

    parsers
        .iter()
        .find_map(|parse| parse(s))
        .filter(|t| (0..=9999).contains(&t.year()))
        .ok_or_else(|| {
            Error::invalid_format(format!(
                "datetime {s:?} must be an ISO 8601 formatted date string"
            ))
        })
}

const DATE_SHAPE: &str = "dddd-dd-dd";
const DATE_MINUTES_SHAPE: &str = "dddd-dd-ddTdd:dd";
const DATE_SECONDS_SHAPE: &str = "dddd-dd-ddTdd:dd:dd";

/// Check `s` against `shape`, where `d` stands for one ASCII digit and any
/// other byte must match exactly.
fn has_shape(s: &str, shape: &str) -> bool {
    s.len() == shape.len()
        && s.bytes().zip(shape.bytes()).all(|(b, expected)| match expected {
            b'd' => b.is_ascii_digit(),
            _ => b == expected,
        })
}

fn parse_date(s: &str) -> Option<DateTime> {
    if !has_shape(s, DATE_SHAPE) {
        return None;
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

fn parse_date_minutes(s: &str) -> Option<DateTime> {
    if !has_shape(s, DATE_MINUTES_SHAPE) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|t| t.and_utc())
}

fn parse_date_seconds(s: &str) -> Option<DateTime> {
    if !has_shape(s, DATE_SECONDS_SHAPE) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|t| t.and_utc())
}

/// RFC3339 with a zone designator, fractional seconds allowed.
fn parse_date_seconds_with_offset(s: &str) -> Option<DateTime> {
    let prefix = s.get(..DATE_SECONDS_SHAPE.len())?;
    if !has_shape(prefix, DATE_SECONDS_SHAPE) {
        return None;
    }
    parse_rfc3339(s).ok()
}

/// Strip the zone designator from `s`, parse the rest with `parse` as wall
/// clock time in that zone and convert it into UTC.
fn with_offset(s: &str, parse: fn(&str) -> Option<DateTime>) -> Option<DateTime> {
    let (local, offset) = split_offset(s)?;
    let naive = parse(local)?.naive_utc();

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|t| t.with_timezone(&Utc))
}

fn split_offset(s: &str) -> Option<(&str, FixedOffset)> {
    if !s.is_ascii() {
        return None;
    }

    if let Some(local) = s.strip_suffix(&['Z', 'z'][..]) {
        return Some((local, FixedOffset::east_opt(0)?));
    }

    let bytes = s.as_bytes();
    let len = bytes.len();
    if len < 6 || bytes[len - 3] != b':' {
        return None;
    }

    let sign = match bytes[len - 6] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits = |v: &str| -> Option<i32> {
        if v.len() == 2 && v.bytes().all(|b| b.is_ascii_digit()) {
            v.parse().ok()
        } else {
            None
        }
    };
    let hours = digits(&s[len - 5..len - 3])?;
    let minutes = digits(&s[len - 2..])?;
    if minutes >= 60 {
        return None;
    }

    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
    Some((&s[..len - 6], offset))
}
