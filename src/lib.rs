//! # Rowset
//!
//! An in-memory tabular query engine for table screens: schema-driven
//! filtering, sorting, pagination and CSV export over open record
//! collections.
//!
//! ## Features
//!
//! - **Open Records**: rows are open attribute mappings, no fixed schema
//! - **Declarative Schemas**: one field table per screen drives label
//!   resolution, typed comparison and search
//! - **Query Editor Clauses**: ordered field/operator/value rows combined
//!   left-to-right with AND/OR links
//! - **Advanced Filters**: numeric, date-range, text and multi-select
//!   categories, conjunctive by default
//! - **Stable Sort**: type-aware comparison, ties keep input order
//! - **Pagination**: clamped page state with footer button windows
//! - **Total Evaluation**: malformed filter input degrades to "no
//!   constraint", never an error
//! - **Store Boundary**: async CRUD trait with an in-memory implementation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rowset::prelude::*;
//!
//! let schema = Schema::new(vec![
//!     FieldDef::text("Asset Name", "name").searchable(),
//!     FieldDef::numeric("Amount", "amount"),
//!     FieldDef::date("Purchase Date", "purchase_date"),
//! ]);
//!
//! let mut engine = QueryEngine::with_records(schema, records);
//! engine.add_clause(Clause::seed("Amount", CompareOp::Gt, "15"));
//! engine.toggle_sort("amount");
//! engine.set_page(2);
//!
//! for record in engine.rows() {
//!     println!("{}", record.text("name"));
//! }
//! ```

pub mod config;
pub mod core;
pub mod export;
pub mod query;
pub mod store;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{ConfigError, RowsetError, RowsetResult, StoreError, ValidationError},
        field::FieldValue,
        record::Record,
        schema::{FieldDef, FieldKind, Schema},
        validation::{RecordValidator, validators},
    };

    // === Query Engine ===
    pub use crate::query::{
        AdvancedFilters, Clause, ClauseValue, CompareOp, LogicalOp, Page, PageMeta, PageState,
        QueryEngine, QueryState, SortDirection, SortState, apply_query,
    };

    // === Export ===
    pub use crate::export::{CsvColumn, CsvExporter};

    // === Store ===
    pub use crate::store::{InMemoryRecordStore, RecordStore};

    // === Config ===
    pub use crate::config::{ConsoleConfig, ScreenConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
