/// Data models for the Crafty app
///
/// Typed records for the two remote document shapes (`posts` and `users`)
/// plus the parsing boundary that turns loose remote documents into them.
pub mod post;
pub mod user;

pub use post::{Post, ANONYMOUS_AUTHOR, ANONYMOUS_COMMENTER};
pub use user::User;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

/// Read a required string field, rejecting the document when it is absent
/// or not a string.
pub(crate) fn required_str(fields: &Map<String, Value>, key: &str) -> Result<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::Malformed(format!("missing field `{key}`")))
}

/// Read an optional string field, treating non-strings as absent.
pub(crate) fn optional_str(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Read an integer field, defaulting when absent or malformed.
pub(crate) fn int_or(fields: &Map<String, Value>, key: &str, default: i64) -> i64 {
    fields.get(key).and_then(Value::as_i64).unwrap_or(default)
}

/// Read a string-array field, defaulting to empty and dropping non-string
/// entries.
pub(crate) fn string_array(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read a timestamp field (RFC 3339 string on the wire).
pub(crate) fn timestamp(fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}
