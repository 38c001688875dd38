//! Core module containing the record model, schema and error types

pub mod error;
pub mod field;
pub mod record;
pub mod schema;
pub mod validation;

pub use error::{RowsetError, RowsetResult, StoreError, ValidationError};
pub use field::FieldValue;
pub use record::Record;
pub use schema::{FieldDef, FieldKind, Schema};
pub use validation::RecordValidator;
