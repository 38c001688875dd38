//! CSV export of a filtered collection

use crate::core::record::Record;
use crate::core::schema::Schema;

/// One exported column: header text and the attribute it reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvColumn {
    pub header: String,
    pub attribute: String,
}

impl CsvColumn {
    pub fn new(header: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            attribute: attribute.into(),
        }
    }
}

/// Builds the CSV text blob a screen's export button downloads
///
/// The default output joins raw values with commas and does not escape
/// embedded delimiters or quotes: a value containing a comma will shift
/// every column after it. That format is what existing consumers of the
/// console's exports parse, so it stays the default; call [`quoted`] for
/// RFC 4180-style escaping instead.
///
/// [`quoted`]: CsvExporter::quoted
#[derive(Debug, Clone)]
pub struct CsvExporter {
    columns: Vec<CsvColumn>,
    quote_values: bool,
}

impl CsvExporter {
    /// Create an exporter with a fixed column list
    pub fn new(columns: Vec<CsvColumn>) -> Self {
        Self {
            columns,
            quote_values: false,
        }
    }

    /// Create an exporter with one column per schema field, labels as
    /// headers
    pub fn from_schema(schema: &Schema) -> Self {
        Self::new(
            schema
                .fields()
                .iter()
                .map(|f| CsvColumn::new(f.label.clone(), f.attribute.clone()))
                .collect(),
        )
    }

    /// Switch to RFC 4180-style escaping of delimiters and quotes
    pub fn quoted(mut self) -> Self {
        self.quote_values = true;
        self
    }

    /// The configured columns
    pub fn columns(&self) -> &[CsvColumn] {
        &self.columns
    }

    /// Render the collection: one header row, one line per record
    ///
    /// Callers export the filtered collection, not the current page.
    pub fn export(&self, records: &[Record]) -> String {
        let mut csv = String::new();

        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|c| self.render(&c.header))
            .collect();
        csv.push_str(&headers.join(","));
        csv.push('\n');

        for record in records {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|c| self.render(&record.text(&c.attribute)))
                .collect();
            csv.push_str(&values.join(","));
            csv.push('\n');
        }

        csv
    }

    fn render(&self, value: &str) -> String {
        if self.quote_values && (value.contains(',') || value.contains('"') || value.contains('\n'))
        {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}
