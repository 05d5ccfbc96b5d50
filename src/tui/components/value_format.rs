//! Display formatting for service values.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use serde_json::Value;

use crate::service::SubmittedAt;

/// Inserts a space before every capital letter of a field name.
///
/// `aadharNumber` becomes `aadhar Number`. Nothing else about the name is
/// changed.
#[must_use]
pub fn humanise_field_name(name: &str) -> String {
    let mut humanised = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            humanised.push(' ');
        }
        humanised.push(ch);
    }
    humanised
}

/// Renders a JSON value for display.
///
/// Strings are shown raw, `null` as empty, and everything else in compact
/// JSON form.
#[must_use]
pub fn format_json_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Renders an optional number, leaving missing values empty.
#[must_use]
pub fn format_amount(amount: Option<f64>) -> String {
    amount.map(|value| value.to_string()).unwrap_or_default()
}

/// Renders a submission time in the local time zone.
///
/// Unreadable times are shown exactly as the service sent them. Falls back
/// to RFC 3339 if `format` cannot be rendered.
#[must_use]
pub fn format_local_timestamp(timestamp: Option<&SubmittedAt>, format: &str) -> String {
    match timestamp {
        None => String::new(),
        Some(SubmittedAt::Raw(text)) => text.clone(),
        Some(SubmittedAt::Instant(instant)) => format_instant(instant, format),
    }
}

fn format_instant(instant: &DateTime<Utc>, format: &str) -> String {
    let local = instant.with_timezone(&Local);

    let mut rendered = String::new();
    if write!(rendered, "{}", local.format(format)).is_err() {
        return local.to_rfc3339();
    }
    rendered
}
