//! Declarative field schema shared by evaluators and the sort stage

use serde::{Deserialize, Serialize};

/// Declared kind of a field, driving comparison and sort behavior
///
/// The same filter operator means different things depending on the declared
/// kind: `>` compares floats for a `Numeric` field and calendar dates for a
/// `Date` field. Dispatch always goes through the schema, never through
/// per-field-name special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Numeric,
    Date,
    Enum,
}

/// One field of a screen: human-readable label, record attribute, kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDef {
    /// Label shown in filter dropdowns (e.g. "Purchase Date")
    pub label: String,

    /// Record attribute the label maps to (e.g. "purchase_date")
    pub attribute: String,

    /// Declared kind, `text` when omitted in configuration
    #[serde(default)]
    pub kind: FieldKind,

    /// Whether free-text search looks at this field
    #[serde(default)]
    pub searchable: bool,
}

impl FieldDef {
    /// A plain text field
    pub fn text(label: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(label, attribute, FieldKind::Text)
    }

    /// A numeric field
    pub fn numeric(label: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(label, attribute, FieldKind::Numeric)
    }

    /// A date field
    pub fn date(label: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(label, attribute, FieldKind::Date)
    }

    /// An enumerated field (fixed option set, multi-select filterable)
    pub fn enumerated(label: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::new(label, attribute, FieldKind::Enum)
    }

    /// Mark the field as a free-text search target, builder style
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    fn new(label: impl Into<String>, attribute: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            attribute: attribute.into(),
            kind,
            searchable: false,
        }
    }
}

/// The field table of one screen
///
/// Resolves human-readable filter labels to record attributes and reports
/// declared kinds. Unknown labels resolve to nothing and unknown attributes
/// report `Text`, so a stale filter row degrades instead of erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    fields: Vec<FieldDef>,
}

impl Schema {
    /// Build a schema from field definitions
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// All field definitions, in declaration order
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Find a field by its label (case-insensitive), falling back to the
    /// attribute name so programmatic callers can skip the label layer
    pub fn resolve(&self, label: &str) -> Option<&FieldDef> {
        self.fields
            .iter()
            .find(|f| f.label.eq_ignore_ascii_case(label))
            .or_else(|| self.by_attribute(label))
    }

    /// Find a field by its record attribute
    pub fn by_attribute(&self, attribute: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.attribute == attribute)
    }

    /// Declared kind of an attribute, `Text` for unknown attributes
    pub fn kind_of(&self, attribute: &str) -> FieldKind {
        self.by_attribute(attribute)
            .map(|f| f.kind)
            .unwrap_or_default()
    }

    /// Attributes free-text search looks at
    pub fn search_fields(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.attribute.clone())
            .collect()
    }
}
