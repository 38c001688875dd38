//! Column sort stage

use crate::core::record::Record;
use crate::core::schema::{FieldKind, Schema};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Current sort: which attribute, which direction
///
/// `field: None` means no ordering is applied and the input order is
/// preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SortState {
    #[serde(default)]
    pub field: Option<String>,

    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    /// Sort by an attribute in a direction
    pub fn by(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: Some(field.into()),
            direction,
        }
    }

    /// Column-header click: same field flips the direction, a new field
    /// restarts ascending
    pub fn toggle(&mut self, field: &str) {
        if self.field.as_deref() == Some(field) {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Asc;
        }
    }
}

/// Sort records in place by the sort state
///
/// Comparison dispatches on the attribute's declared kind: floats for
/// `Numeric` (unparseable coerces to 0), calendar dates for `Date`
/// (unparseable dates order first), case-insensitive strings otherwise.
/// `sort_by` is stable, so records with equal keys keep their relative
/// input order in both directions.
pub fn sort_records(records: &mut [Record], state: &SortState, schema: &Schema) {
    let Some(attr) = state.field.as_deref() else {
        return;
    };
    let kind = schema.kind_of(attr);

    records.sort_by(|a, b| {
        let ordering = compare_by_kind(a, b, attr, kind);
        match state.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by_kind(a: &Record, b: &Record, attr: &str, kind: FieldKind) -> Ordering {
    match kind {
        FieldKind::Numeric => a.number(attr).total_cmp(&b.number(attr)),
        FieldKind::Date => a.date(attr).cmp(&b.date(attr)),
        FieldKind::Text | FieldKind::Enum => {
            a.text(attr).to_lowercase().cmp(&b.text(attr).to_lowercase())
        }
    }
}
