//! Open record type backing every table screen

use crate::core::field::FieldValue;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of domain data as an open attribute mapping
///
/// No fixed schema is enforced: each screen decides which attributes its
/// records carry. Reading a missing attribute yields [`FieldValue::Null`],
/// so predicate evaluation and sorting never fail on an incomplete record.
///
/// The `id` is stable across edits and is what the store keys mutations on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Unique identifier, stable across updates
    pub id: Uuid,

    /// Attribute name → value, in insertion order
    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record with a fresh id
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            fields: IndexMap::new(),
        }
    }

    /// Create an empty record with a known id
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            fields: IndexMap::new(),
        }
    }

    /// Set an attribute, builder style
    pub fn field(mut self, attribute: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(attribute.into(), value.into());
        self
    }

    /// Set an attribute in place
    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(attribute.into(), value.into());
    }

    /// Get an attribute value, `Null` when absent
    pub fn get(&self, attribute: &str) -> FieldValue {
        self.fields
            .get(attribute)
            .cloned()
            .unwrap_or(FieldValue::Null)
    }

    /// Text rendering of an attribute, empty string when absent
    pub fn text(&self, attribute: &str) -> String {
        self.get(attribute).as_text()
    }

    /// Numeric coercion of an attribute, `0.0` when absent or unparseable
    pub fn number(&self, attribute: &str) -> f64 {
        self.get(attribute).as_number()
    }

    /// Date coercion of an attribute, `None` when absent or unparseable
    pub fn date(&self, attribute: &str) -> Option<NaiveDate> {
        self.get(attribute).as_date()
    }

    /// Build a record from a JSON object
    ///
    /// An `"id"` key is used as the record id when it holds a valid UUID;
    /// otherwise a fresh id is generated. Non-object values produce an empty
    /// record rather than an error.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut record = match value.get("id").and_then(|v| v.as_str()) {
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Record::with_id(id),
                Err(_) => Record::new(),
            },
            None => Record::new(),
        };

        if let serde_json::Value::Object(map) = value {
            for (key, val) in map {
                if key == "id" {
                    continue;
                }
                record.fields.insert(key.clone(), FieldValue::from_json(val));
            }
        }

        record
    }

    /// Render the record as a JSON object, id included
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            "id".to_string(),
            serde_json::Value::String(self.id.to_string()),
        );
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}
