//! Advanced filter set, free-text search and the filter pipeline

use crate::core::record::Record;
use crate::core::schema::Schema;
use crate::query::clause::{Clause, evaluate_clauses};
use crate::query::predicate::{
    CompareOp, date_range_matches, numeric_matches, selection_matches, text_matches,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A numeric constraint on one field
///
/// The value is kept as the raw input string; a blank value means no
/// constraint and an unparseable one coerces to `0` at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NumericFilter {
    pub op: CompareOp,
    pub value: String,
}

/// An inclusive date-range constraint on one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DateRangeFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// The category-partitioned advanced filter set
///
/// Four categories keyed by record attribute: numeric comparisons, date
/// ranges, free-text containment and multi-select membership. An empty entry
/// in any category imposes no constraint; categories and fields combine
/// conjunctively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AdvancedFilters {
    #[serde(default)]
    pub numeric: HashMap<String, NumericFilter>,

    #[serde(default)]
    pub dates: HashMap<String, DateRangeFilter>,

    #[serde(default)]
    pub text: HashMap<String, String>,

    #[serde(default)]
    pub selections: HashMap<String, Vec<String>>,
}

impl AdvancedFilters {
    /// Set a numeric constraint on an attribute
    pub fn set_numeric(
        &mut self,
        attribute: impl Into<String>,
        op: CompareOp,
        value: impl Into<String>,
    ) {
        self.numeric.insert(
            attribute.into(),
            NumericFilter {
                op,
                value: value.into(),
            },
        );
    }

    /// Set an inclusive date range on an attribute
    pub fn set_date_range(
        &mut self,
        attribute: impl Into<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) {
        self.dates
            .insert(attribute.into(), DateRangeFilter { from, to });
    }

    /// Set a text containment constraint on an attribute
    pub fn set_text(&mut self, attribute: impl Into<String>, needle: impl Into<String>) {
        self.text.insert(attribute.into(), needle.into());
    }

    /// Set a multi-select membership constraint on an attribute
    pub fn set_selection(&mut self, attribute: impl Into<String>, allowed: Vec<String>) {
        self.selections.insert(attribute.into(), allowed);
    }

    /// Remove every constraint
    pub fn clear(&mut self) {
        self.numeric.clear();
        self.dates.clear();
        self.text.clear();
        self.selections.clear();
    }

    /// Whether any constraint is present at all
    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty()
            && self.dates.is_empty()
            && self.text.is_empty()
            && self.selections.is_empty()
    }

    /// Test a record against every category
    pub fn matches(&self, record: &Record) -> bool {
        self.numeric
            .iter()
            .all(|(attr, f)| numeric_matches(&record.get(attr), f.op, &f.value))
            && self
                .dates
                .iter()
                .all(|(attr, f)| date_range_matches(&record.get(attr), f.from, f.to))
            && self
                .text
                .iter()
                .all(|(attr, needle)| text_matches(&record.get(attr), needle))
            && self
                .selections
                .iter()
                .all(|(attr, allowed)| selection_matches(&record.get(attr), allowed))
    }
}

/// Free-text search: true when any of the screen's search fields contains
/// the term (case-insensitive); a blank term matches everything
pub fn search_matches(record: &Record, term: &str, fields: &[String]) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|attr| text_matches(&record.get(attr), term))
}

/// The final inclusion test of the filter pipeline
///
/// search AND advanced filters AND clause list. The clause list evaluates
/// as a whole so its internal OR semantics stay intact before the result is
/// AND-ed with the other two stages.
pub fn record_matches(
    record: &Record,
    search: &str,
    search_fields: &[String],
    advanced: &AdvancedFilters,
    clauses: &[Clause],
    schema: &Schema,
) -> bool {
    search_matches(record, search, search_fields)
        && advanced.matches(record)
        && evaluate_clauses(clauses, record, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::FieldDef;
    use crate::query::clause::LogicalOp;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn laptop() -> Record {
        Record::new()
            .field("name", "Dell Latitude")
            .field("category", "laptop")
            .field("amount", 1200i64)
            .field("purchase_date", "2024-01-15")
    }

    // === AdvancedFilters ===

    #[test]
    fn test_empty_filters_match_everything() {
        let filters = AdvancedFilters::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&laptop()));
        assert!(filters.matches(&Record::new()));
    }

    #[test]
    fn test_numeric_category() {
        let mut filters = AdvancedFilters::default();
        filters.set_numeric("amount", CompareOp::Ge, "1000");
        assert!(filters.matches(&laptop()));

        filters.set_numeric("amount", CompareOp::Lt, "1000");
        assert!(!filters.matches(&laptop()));
    }

    #[test]
    fn test_blank_numeric_value_imposes_nothing() {
        let mut filters = AdvancedFilters::default();
        filters.set_numeric("amount", CompareOp::Gt, "");
        assert!(filters.matches(&laptop()));
    }

    #[test]
    fn test_date_category() {
        let mut filters = AdvancedFilters::default();
        filters.set_date_range("purchase_date", Some(date(2024, 1, 1)), Some(date(2024, 1, 31)));
        assert!(filters.matches(&laptop()));

        filters.set_date_range("purchase_date", Some(date(2024, 2, 1)), None);
        assert!(!filters.matches(&laptop()));
    }

    #[test]
    fn test_text_category() {
        let mut filters = AdvancedFilters::default();
        filters.set_text("name", "latitude");
        assert!(filters.matches(&laptop()));

        filters.set_text("name", "thinkpad");
        assert!(!filters.matches(&laptop()));
    }

    #[test]
    fn test_selection_category() {
        let mut filters = AdvancedFilters::default();
        filters.set_selection("category", vec!["laptop".to_string(), "desktop".to_string()]);
        assert!(filters.matches(&laptop()));

        filters.set_selection("category", vec!["printer".to_string()]);
        assert!(!filters.matches(&laptop()));
    }

    #[test]
    fn test_categories_combine_conjunctively() {
        let mut filters = AdvancedFilters::default();
        filters.set_numeric("amount", CompareOp::Gt, "1000");
        filters.set_text("name", "dell");
        assert!(filters.matches(&laptop()));

        // One failing category fails the record
        filters.set_text("name", "hp");
        assert!(!filters.matches(&laptop()));
    }

    #[test]
    fn test_clear_removes_all_constraints() {
        let mut filters = AdvancedFilters::default();
        filters.set_text("name", "hp");
        filters.set_numeric("amount", CompareOp::Lt, "1");
        assert!(!filters.matches(&laptop()));

        filters.clear();
        assert!(filters.is_empty());
        assert!(filters.matches(&laptop()));
    }

    // === search_matches ===

    fn search_fields() -> Vec<String> {
        vec!["name".to_string(), "category".to_string()]
    }

    #[test]
    fn test_search_blank_term_matches() {
        assert!(search_matches(&laptop(), "", &search_fields()));
        assert!(search_matches(&laptop(), "  ", &search_fields()));
    }

    #[test]
    fn test_search_any_field_may_match() {
        assert!(search_matches(&laptop(), "dell", &search_fields()));
        assert!(search_matches(&laptop(), "LAPTOP", &search_fields()));
        assert!(!search_matches(&laptop(), "dell", &["category".to_string()]));
    }

    // === record_matches pipeline ===

    #[test]
    fn test_pipeline_identity_on_empty_state() {
        let schema = Schema::new(vec![FieldDef::numeric("Amount", "amount")]);
        assert!(record_matches(
            &laptop(),
            "",
            &search_fields(),
            &AdvancedFilters::default(),
            &[],
            &schema
        ));
    }

    #[test]
    fn test_pipeline_stages_are_conjunctive() {
        let schema = Schema::new(vec![FieldDef::numeric("Amount", "amount")]);
        let mut advanced = AdvancedFilters::default();
        advanced.set_text("category", "laptop");
        let clauses = vec![Clause::seed("Amount", CompareOp::Gt, "1000")];

        assert!(record_matches(
            &laptop(),
            "dell",
            &search_fields(),
            &advanced,
            &clauses,
            &schema
        ));

        // Failing the search stage fails the whole pipeline
        assert!(!record_matches(
            &laptop(),
            "lenovo",
            &search_fields(),
            &advanced,
            &clauses,
            &schema
        ));
    }

    #[test]
    fn test_clause_or_semantics_survive_the_pipeline() {
        let schema = Schema::new(vec![
            FieldDef::text("Name", "name"),
            FieldDef::numeric("Amount", "amount"),
        ]);
        let clauses = vec![
            Clause::seed("Amount", CompareOp::Gt, "9999"),
            Clause::linked(LogicalOp::Or, "Name", CompareOp::Eq, "dell latitude"),
        ];
        assert!(record_matches(
            &laptop(),
            "",
            &search_fields(),
            &AdvancedFilters::default(),
            &clauses,
            &schema
        ));
    }
}
