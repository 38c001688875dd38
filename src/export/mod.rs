//! Export of filtered collections

pub mod csv;

pub use csv::{CsvColumn, CsvExporter};
