//! Query-editor filter clauses and their evaluator

use crate::core::field::FieldValue;
use crate::core::record::Record;
use crate::core::schema::{FieldKind, Schema};
use crate::query::predicate::{CompareOp, compare_matches};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logical link between consecutive clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    And,
    Or,
}

/// A clause's comparison value
///
/// The screens use a literal `"any"` entry to mean "no constraint"; that
/// convention is typed here as an explicit sentinel instead of a magic
/// string, while string conversion keeps serialized clause lists readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClauseValue {
    /// No constraint: the clause is skipped during evaluation
    Any,
    /// A literal comparison value
    Literal(String),
}

impl ClauseValue {
    /// Whether this value actually constrains anything
    ///
    /// `Any`, empty and whitespace-only literals all impose no constraint.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            ClauseValue::Any => None,
            ClauseValue::Literal(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() { None } else { Some(trimmed) }
            }
        }
    }
}

impl From<String> for ClauseValue {
    fn from(s: String) -> Self {
        if s.trim().eq_ignore_ascii_case("any") {
            ClauseValue::Any
        } else {
            ClauseValue::Literal(s)
        }
    }
}

impl From<&str> for ClauseValue {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ClauseValue> for String {
    fn from(value: ClauseValue) -> Self {
        match value {
            ClauseValue::Any => "any".to_string(),
            ClauseValue::Literal(s) => s,
        }
    }
}

/// One row of the query editor: field label, operator, value, logical link
///
/// The `id` is stable across edits so a specific row can be updated or
/// removed without reindexing by position. The first clause of a list
/// carries no link; it seeds the accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Stable row identity
    pub id: Uuid,

    /// Human-readable field label, resolved through the screen's schema
    pub field: String,

    /// Comparison operator
    pub op: CompareOp,

    /// Comparison value
    pub value: ClauseValue,

    /// Link to the previous clause; `None` on the seed clause
    #[serde(default)]
    pub link: Option<LogicalOp>,
}

impl Clause {
    /// Create the seed clause of a list
    pub fn seed(field: impl Into<String>, op: CompareOp, value: impl Into<ClauseValue>) -> Self {
        Self {
            id: Uuid::new_v4(),
            field: field.into(),
            op,
            value: value.into(),
            link: None,
        }
    }

    /// Create a clause linked to the previous one
    pub fn linked(
        link: LogicalOp,
        field: impl Into<String>,
        op: CompareOp,
        value: impl Into<ClauseValue>,
    ) -> Self {
        Self {
            link: Some(link),
            ..Self::seed(field, op, value)
        }
    }
}

/// Reduce an ordered clause list to one boolean for a record
///
/// Evaluation is strictly left-to-right with no operator precedence:
/// `[A, B AND, C OR]` means `(A AND B) OR C`, so an OR clause can rescue a
/// record that failed every earlier AND clause. Unconstrained clauses are
/// skipped; the first effective clause seeds the accumulator. A later
/// clause missing its link degrades to AND. An empty or fully-skipped list
/// matches everything.
pub fn evaluate_clauses(clauses: &[Clause], record: &Record, schema: &Schema) -> bool {
    let mut acc: Option<bool> = None;

    for clause in clauses {
        let Some(raw) = clause.value.constraint() else {
            continue;
        };

        // Unknown field labels resolve to the empty value; the clause still
        // evaluates against it.
        let (value, kind) = match schema.resolve(&clause.field) {
            Some(def) => (record.get(&def.attribute), def.kind),
            None => (FieldValue::Null, FieldKind::Text),
        };

        let hit = compare_matches(&value, clause.op, raw, kind);

        acc = Some(match (acc, clause.link) {
            (None, _) => hit,
            (Some(prev), Some(LogicalOp::Or)) => prev || hit,
            (Some(prev), _) => prev && hit,
        });
    }

    acc.unwrap_or(true)
}
