//! Tolerant decoders for list fields that are only ever displayed.
//!
//! A loosely typed backend may send numbers as strings, identifiers as
//! numbers, or dates in several layouts. One odd field must not fail the
//! whole list, so these decoders accept every shape seen on the wire and
//! fall back to "absent" (or to the raw text, for timestamps).

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::models::SubmittedAt;

/// Layouts tried, in order, for date-times without an offset.
const NAIVE_DATE_TIME_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Reads a string, a number or a boolean as display text; `null` is empty.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

/// Like [`text`], but keeps `null` distinct from the empty string.
pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// Reads a finite number sent either as a JSON number or as numeric text.
pub(crate) fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite()))
}

/// Reads a whole month count sent as a JSON number or as numeric text.
pub(crate) fn optional_months<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().and_then(|months| u32::try_from(months).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Reads a submission time.
///
/// Text is tried as RFC 3339, then as a local date-time without offset, then
/// as a date alone (midnight UTC). Numbers are epoch milliseconds. Anything
/// else is kept as raw text.
pub(crate) fn optional_submitted_at<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<SubmittedAt>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(parse_submitted_at(&text)),
        Value::Number(number) => Some(
            number
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map_or_else(|| SubmittedAt::Raw(number.to_string()), SubmittedAt::Instant),
        ),
        other => Some(SubmittedAt::Raw(other.to_string())),
    })
}

/// Parses submission-time text, keeping it verbatim when no layout fits.
pub(crate) fn parse_submitted_at(text: &str) -> SubmittedAt {
    let trimmed = text.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return SubmittedAt::Instant(instant.with_timezone(&Utc));
    }

    let local = NAIVE_DATE_TIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
        .and_then(|naive| naive.and_local_timezone(Local).earliest());
    if let Some(instant) = local {
        return SubmittedAt::Instant(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or_else(
            || SubmittedAt::Raw(text.to_owned()),
            |midnight| SubmittedAt::Instant(midnight.and_utc()),
        )
}
