//! Predicate evaluators
//!
//! Every evaluator is a pure, total function: malformed filter input
//! degrades to "no constraint" and bad record data to a defined default, so
//! a broken filter value can never take the table down.

use crate::core::field::{FieldValue, parse_date};
use crate::core::schema::FieldKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a filter clause or numeric filter
///
/// Serialized as the symbols the screens use (`=`, `!=`, `>`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CompareOp {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

impl CompareOp {
    /// The operator's display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
        }
    }

    /// Apply the operator to any ordered pair
    pub fn compare<T: PartialOrd>(&self, left: &T, right: &T) -> bool {
        match self {
            CompareOp::Eq => left == right,
            CompareOp::Ne => left != right,
            CompareOp::Gt => left > right,
            CompareOp::Lt => left < right,
            CompareOp::Ge => left >= right,
            CompareOp::Le => left <= right,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for CompareOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "=" | "==" => Ok(CompareOp::Eq),
            "!=" | "<>" => Ok(CompareOp::Ne),
            ">" => Ok(CompareOp::Gt),
            "<" => Ok(CompareOp::Lt),
            ">=" => Ok(CompareOp::Ge),
            "<=" => Ok(CompareOp::Le),
            other => Err(format!("Unknown comparison operator: '{}'", other)),
        }
    }
}

/// Numeric predicate: coerce both sides to floats and compare
///
/// A blank filter value imposes no constraint. Unparseable values on either
/// side coerce to `0.0`.
pub fn numeric_matches(value: &FieldValue, op: CompareOp, filter: &str) -> bool {
    if filter.trim().is_empty() {
        return true;
    }
    let filter_num: f64 = filter.trim().parse().unwrap_or(0.0);
    op.compare(&value.as_number(), &filter_num)
}

/// Date-range predicate: inclusive `[from, to]` containment
///
/// No bounds means no constraint. A field value that is not a valid date
/// matches everything, so bad data never silently hides rows.
pub fn date_range_matches(
    value: &FieldValue,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(date) = value.as_date() else {
        return true;
    };
    from.is_none_or(|f| date >= f) && to.is_none_or(|t| date <= t)
}

/// Text predicate: case-insensitive substring containment
pub fn text_matches(value: &FieldValue, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    value.as_text().to_lowercase().contains(&needle.to_lowercase())
}

/// Multi-select predicate: membership of the value's text rendering
///
/// An empty selection imposes no constraint.
pub fn selection_matches(value: &FieldValue, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    allowed.iter().any(|a| *a == value.as_text())
}

/// Relational predicate used by the clause evaluator
///
/// `=` and `!=` always compare case-insensitive string renderings. The
/// ordered operators compare calendar dates when the field's declared kind
/// is `Date` (either side unparseable matches everything) and floats
/// otherwise. The meaning of an operator follows the declared kind, not the
/// field name.
pub fn compare_matches(value: &FieldValue, op: CompareOp, raw: &str, kind: FieldKind) -> bool {
    match op {
        CompareOp::Eq => value.as_text().eq_ignore_ascii_case(raw.trim()),
        CompareOp::Ne => !value.as_text().eq_ignore_ascii_case(raw.trim()),
        _ => match kind {
            FieldKind::Date => {
                let (Some(left), Some(right)) = (value.as_date(), parse_date(raw)) else {
                    return true;
                };
                op.compare(&left, &right)
            }
            _ => {
                let right: f64 = raw.trim().parse().unwrap_or(0.0);
                op.compare(&value.as_number(), &right)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // === CompareOp ===

    #[test]
    fn test_compare_op_parse_symbols() {
        assert_eq!("=".parse::<CompareOp>().unwrap(), CompareOp::Eq);
        assert_eq!("!=".parse::<CompareOp>().unwrap(), CompareOp::Ne);
        assert_eq!(">=".parse::<CompareOp>().unwrap(), CompareOp::Ge);
        assert!("~".parse::<CompareOp>().is_err());
    }

    #[test]
    fn test_compare_op_serde_symbols() {
        assert_eq!(serde_json::to_string(&CompareOp::Ge).unwrap(), "\">=\"");
        let op: CompareOp = serde_json::from_str("\"!=\"").unwrap();
        assert_eq!(op, CompareOp::Ne);
    }

    // === numeric_matches ===

    #[test]
    fn test_numeric_blank_filter_matches_everything() {
        assert!(numeric_matches(&FieldValue::Integer(5), CompareOp::Gt, ""));
        assert!(numeric_matches(&FieldValue::Null, CompareOp::Lt, "   "));
    }

    #[test]
    fn test_numeric_operators() {
        let v = FieldValue::Float(20.0);
        assert!(numeric_matches(&v, CompareOp::Gt, "15"));
        assert!(!numeric_matches(&v, CompareOp::Lt, "15"));
        assert!(numeric_matches(&v, CompareOp::Ge, "20"));
        assert!(numeric_matches(&v, CompareOp::Le, "20"));
        assert!(numeric_matches(&v, CompareOp::Ne, "15"));
    }

    #[test]
    fn test_numeric_is_reflexive() {
        for raw in ["0", "42", "-3.5", "1200.75"] {
            let value = FieldValue::from(raw);
            assert!(
                numeric_matches(&value, CompareOp::Eq, raw),
                "x = x should hold for {}",
                raw
            );
        }
    }

    #[test]
    fn test_numeric_unparseable_field_coerces_to_zero() {
        let v = FieldValue::from("n/a");
        assert!(numeric_matches(&v, CompareOp::Eq, "0"));
        assert!(numeric_matches(&v, CompareOp::Lt, "1"));
    }

    // === date_range_matches ===

    #[test]
    fn test_date_range_unbounded_matches_everything() {
        assert!(date_range_matches(&FieldValue::from("2024-01-01"), None, None));
        assert!(date_range_matches(&FieldValue::from("garbage"), None, None));
        assert!(date_range_matches(&FieldValue::Null, None, None));
    }

    #[test]
    fn test_date_range_inclusive_bounds() {
        let v = FieldValue::Date(date(2024, 2, 1));
        assert!(date_range_matches(&v, Some(date(2024, 2, 1)), None));
        assert!(date_range_matches(&v, None, Some(date(2024, 2, 1))));
        assert!(date_range_matches(
            &v,
            Some(date(2024, 1, 1)),
            Some(date(2024, 3, 1))
        ));
        assert!(!date_range_matches(&v, Some(date(2024, 2, 2)), None));
        assert!(!date_range_matches(&v, None, Some(date(2024, 1, 31))));
    }

    #[test]
    fn test_date_range_invalid_field_date_matches() {
        let v = FieldValue::from("not a date");
        assert!(date_range_matches(
            &v,
            Some(date(2024, 1, 1)),
            Some(date(2024, 12, 31))
        ));
    }

    // === text_matches ===

    #[test]
    fn test_text_substring_case_insensitive() {
        let v = FieldValue::from("Dell Latitude 5420");
        assert!(text_matches(&v, "latitude"));
        assert!(text_matches(&v, "DELL"));
        assert!(!text_matches(&v, "thinkpad"));
    }

    #[test]
    fn test_text_blank_needle_matches_everything() {
        assert!(text_matches(&FieldValue::Null, ""));
        assert!(text_matches(&FieldValue::from("x"), "  "));
    }

    #[test]
    fn test_text_missing_value_reads_as_empty() {
        assert!(!text_matches(&FieldValue::Null, "anything"));
    }

    // === selection_matches ===

    #[test]
    fn test_selection_empty_list_matches_everything() {
        assert!(selection_matches(&FieldValue::from("active"), &[]));
    }

    #[test]
    fn test_selection_membership() {
        let allowed = vec!["active".to_string(), "retired".to_string()];
        assert!(selection_matches(&FieldValue::from("active"), &allowed));
        assert!(!selection_matches(&FieldValue::from("broken"), &allowed));
    }

    // === compare_matches ===

    #[test]
    fn test_compare_equality_is_string_based() {
        let v = FieldValue::from("Active");
        assert!(compare_matches(&v, CompareOp::Eq, "active", FieldKind::Text));
        assert!(compare_matches(&v, CompareOp::Ne, "retired", FieldKind::Text));
        // Equality stays string-based even for numeric fields
        assert!(compare_matches(
            &FieldValue::Integer(10),
            CompareOp::Eq,
            "10",
            FieldKind::Numeric
        ));
    }

    #[test]
    fn test_compare_relational_numeric() {
        let v = FieldValue::Integer(20);
        assert!(compare_matches(&v, CompareOp::Gt, "15", FieldKind::Numeric));
        assert!(!compare_matches(&v, CompareOp::Lt, "15", FieldKind::Numeric));
    }

    #[test]
    fn test_compare_relational_dispatches_on_date_kind() {
        let v = FieldValue::from("2024-02-01");
        assert!(compare_matches(
            &v,
            CompareOp::Lt,
            "2024-02-15",
            FieldKind::Date
        ));
        // Same operator against a numeric kind coerces both sides to 0
        assert!(!compare_matches(
            &v,
            CompareOp::Lt,
            "2024-02-15",
            FieldKind::Numeric
        ));
    }

    #[test]
    fn test_compare_unparseable_date_matches_everything() {
        assert!(compare_matches(
            &FieldValue::from("pending"),
            CompareOp::Gt,
            "2024-01-01",
            FieldKind::Date
        ));
        assert!(compare_matches(
            &FieldValue::from("2024-01-01"),
            CompareOp::Gt,
            "whenever",
            FieldKind::Date
        ));
    }
}
