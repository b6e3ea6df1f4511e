//! Wire format of a log record.
//!
//! Each frame is one JSON object:
//!
//! ```text
//! { "type": "cpu"|"user"|"access", "uuid": <string>, "timestamp": <epoch-ms or ISO>,
//!   "level": <string>, ...type-specific fields... }
//! ```
//!
//! Only the `type` tag is validated. Every other field is optional and is
//! kept as raw JSON so renderers can substitute whatever the producer sent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::error::FeedError;

/// Record category, selected by the `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Cpu,
    User,
    Access,
}

impl RecordType {
    /// Parse a wire tag. Tags are matched exactly, as the producer emits them.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cpu" => Some(RecordType::Cpu),
            "user" => Some(RecordType::User),
            "access" => Some(RecordType::Access),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            RecordType::Cpu => "cpu",
            RecordType::User => "user",
            RecordType::Access => "access",
        }
    }
}

/// One structured event or metric sample received over the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub kind: RecordType,
    /// Deduplication key. `None` when the producer omitted it.
    pub uuid: Option<String>,
    /// All fields of the frame, including `type`, `uuid`, `timestamp` and `level`.
    pub fields: Map<String, Value>,
}

impl LogRecord {
    /// Text of a scalar field, or an empty string when absent.
    pub fn field_text(&self, name: &str) -> String {
        self.fields.get(name).map(value_text).unwrap_or_default()
    }

    /// Raw severity tag, empty when absent.
    pub fn level(&self) -> String {
        self.field_text("level")
    }

    /// Event time, when the `timestamp` field is present and parseable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.fields.get("timestamp").and_then(parse_timestamp)
    }

    /// Server utilisation entries of a `cpu` record, sorted by server name.
    pub fn servers(&self) -> Vec<(&str, &Value)> {
        match self.fields.get("servers") {
            Some(Value::Object(servers)) => {
                servers.iter().map(|(name, value)| (name.as_str(), value)).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Decode a raw text frame into a [`LogRecord`].
pub fn decode_frame(text: &str) -> Result<LogRecord, FeedError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(fields) = value else {
        return Err(FeedError::decode("frame is not a JSON object"));
    };

    let kind = match fields.get("type") {
        Some(Value::String(tag)) => RecordType::from_tag(tag).ok_or_else(|| {
            FeedError::UnknownType {
                type_tag: Some(tag.clone()),
            }
        })?,
        Some(other) => {
            return Err(FeedError::UnknownType {
                type_tag: Some(other.to_string()),
            })
        }
        None => return Err(FeedError::UnknownType { type_tag: None }),
    };

    let uuid = match fields.get("uuid") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_text(value)),
    };

    Ok(LogRecord { kind, uuid, fields })
}

/// Render a JSON value the way a text template would.
///
/// Strings are unquoted, `null` is empty, and compound values fall back to
/// compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Parse a wire timestamp.
///
/// Accepts epoch milliseconds (number or numeric string), RFC 3339, and
/// naive ISO-8601 date-times or dates, which are read as UTC.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(ms) = s.parse::<i64>() {
        return Utc.timestamp_millis_opt(ms).single();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    // Date-only values mean midnight UTC
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
