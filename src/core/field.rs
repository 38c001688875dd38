//! Field value types and coercions

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A polymorphic field value that can hold different scalar types
///
/// Records are open attribute maps, so a single enum covers every value a
/// screen can put in a cell. Variant order matters for untagged
/// deserialization: date-like strings become `Date`, everything else that is
/// a JSON string falls through to `String`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    String(String),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Check if the value is null or an empty/whitespace-only string
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Canonical text rendering of the value
    ///
    /// This is the form used by text predicates, equality comparison and CSV
    /// export. `Null` renders as the empty string so missing attributes never
    /// fail a lookup.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Numeric coercion used by numeric predicates and the sort stage
    ///
    /// Anything that does not parse as a number coerces to `0.0`.
    pub fn as_number(&self) -> f64 {
        match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(f) => *f,
            FieldValue::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Date coercion used by date predicates and the sort stage
    ///
    /// Returns `None` when the value is not a date and cannot be parsed as
    /// one; callers treat that as "matches everything" rather than an error.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::String(s) => parse_date(s),
            _ => None,
        }
    }

    /// Convert a JSON value into a field value
    ///
    /// Date-like strings become `Date`; arrays and objects degrade to their
    /// JSON text rendering rather than failing.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => match parse_date(s) {
                Some(d) => FieldValue::Date(d),
                None => FieldValue::String(s.clone()),
            },
            other => FieldValue::String(other.to_string()),
        }
    }

    /// Convert the field value into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Integer(i) => serde_json::json!(i),
            FieldValue::Float(f) => serde_json::json!(f),
            FieldValue::Boolean(b) => serde_json::Value::Bool(*b),
            FieldValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            FieldValue::Null => serde_json::Value::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        FieldValue::Date(d)
    }
}

/// Parse a date-like string
///
/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
