//! Screen configuration loading and management

use crate::core::error::ConfigError;
use crate::core::schema::{FieldDef, FieldKind, Schema};
use crate::core::validation::RecordValidator;
use crate::core::validation::validators::{date_format, in_list, required};
use crate::export::csv::{CsvColumn, CsvExporter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for one table screen
///
/// Everything the engine needs to know about a screen is declared here:
/// the field table (labels, attributes, kinds, search flags), which fields a
/// record must carry, the allowed options of enumerated fields, and the
/// column list of the CSV export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScreenConfig {
    /// Screen identifier (e.g. "assets", "service-logs")
    pub name: String,

    /// The screen's field table
    pub fields: Vec<FieldDef>,

    /// Attributes a record must carry to be saved
    #[serde(default)]
    pub required_fields: Vec<String>,

    /// Allowed values per enumerated attribute
    #[serde(default)]
    pub options: HashMap<String, Vec<String>>,

    /// Attributes exported to CSV, in order; empty means every field
    #[serde(default)]
    pub export_columns: Vec<String>,
}

impl ScreenConfig {
    /// Build the screen's schema
    pub fn schema(&self) -> Schema {
        Schema::new(self.fields.clone())
    }

    /// Build the screen's CSV exporter
    ///
    /// Headers come from field labels; an export column without a field
    /// definition uses the attribute name as its header.
    pub fn exporter(&self) -> CsvExporter {
        let schema = self.schema();
        if self.export_columns.is_empty() {
            return CsvExporter::from_schema(&schema);
        }
        CsvExporter::new(
            self.export_columns
                .iter()
                .map(|attr| {
                    let header = schema
                        .by_attribute(attr)
                        .map(|f| f.label.clone())
                        .unwrap_or_else(|| attr.clone());
                    CsvColumn::new(header, attr.clone())
                })
                .collect(),
        )
    }

    /// Build the screen's pre-mutation validator
    ///
    /// Required fields must be present, date fields must parse, enumerated
    /// fields must hold one of their declared options.
    pub fn validator(&self) -> RecordValidator {
        let mut validator = RecordValidator::new();
        for field in &self.required_fields {
            validator = validator.rule(field.clone(), required());
        }
        for field in &self.fields {
            if field.kind == FieldKind::Date {
                validator = validator.rule(field.attribute.clone(), date_format());
            }
        }
        for (attribute, allowed) in &self.options {
            validator = validator.rule(attribute.clone(), in_list(allowed.clone()));
        }
        validator
    }
}

/// Complete configuration for the console's screens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsoleConfig {
    /// List of screen configurations
    pub screens: Vec<ScreenConfig>,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string(),
                }
            } else {
                ConfigError::IoError {
                    message: e.to_string(),
                }
            }
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Find a screen by name
    pub fn find_screen(&self, name: &str) -> Option<&ScreenConfig> {
        self.screens.iter().find(|s| s.name == name)
    }

    /// Get a screen by name, erroring when it is not configured
    pub fn screen(&self, name: &str) -> Result<&ScreenConfig, ConfigError> {
        self.find_screen(name).ok_or(ConfigError::UnknownScreen {
            name: name.to_string(),
        })
    }

    /// Create a default configuration covering the console's screens
    pub fn default_config() -> Self {
        Self {
            screens: vec![
                ScreenConfig {
                    name: "assets".to_string(),
                    fields: vec![
                        FieldDef::text("Asset Name", "name").searchable(),
                        FieldDef::text("Serial Number", "serial_number").searchable(),
                        FieldDef::enumerated("Category", "category"),
                        FieldDef::numeric("Amount", "amount"),
                        FieldDef::date("Purchase Date", "purchase_date"),
                        FieldDef::date("Warranty Expiry", "warranty_expiry"),
                        FieldDef::enumerated("Status", "status"),
                    ],
                    required_fields: vec!["name".to_string(), "category".to_string()],
                    options: HashMap::from([(
                        "status".to_string(),
                        vec![
                            "active".to_string(),
                            "in-repair".to_string(),
                            "retired".to_string(),
                        ],
                    )]),
                    export_columns: vec![
                        "name".to_string(),
                        "serial_number".to_string(),
                        "category".to_string(),
                        "amount".to_string(),
                        "purchase_date".to_string(),
                        "status".to_string(),
                    ],
                },
                ScreenConfig {
                    name: "service-logs".to_string(),
                    fields: vec![
                        FieldDef::text("Asset", "asset_name").searchable(),
                        FieldDef::text("Description", "description").searchable(),
                        FieldDef::numeric("Cost", "cost"),
                        FieldDef::date("Service Date", "service_date"),
                        FieldDef::enumerated("Technician", "technician"),
                    ],
                    required_fields: vec!["asset_name".to_string(), "service_date".to_string()],
                    options: HashMap::new(),
                    export_columns: Vec::new(),
                },
                ScreenConfig {
                    name: "products".to_string(),
                    fields: vec![
                        FieldDef::text("Product", "name").searchable(),
                        FieldDef::enumerated("Category", "category"),
                        FieldDef::numeric("Unit Price", "unit_price"),
                    ],
                    required_fields: vec!["name".to_string()],
                    options: HashMap::new(),
                    export_columns: Vec::new(),
                },
                ScreenConfig {
                    name: "categories".to_string(),
                    fields: vec![FieldDef::text("Category", "name").searchable()],
                    required_fields: vec!["name".to_string()],
                    options: HashMap::new(),
                    export_columns: Vec::new(),
                },
                ScreenConfig {
                    name: "payment-methods".to_string(),
                    fields: vec![FieldDef::text("Payment Method", "name").searchable()],
                    required_fields: vec!["name".to_string()],
                    options: HashMap::new(),
                    export_columns: Vec::new(),
                },
            ],
        }
    }
}
