//! Typed error handling for the rowset engine
//!
//! The query pipeline itself is total and never returns an error: malformed
//! filter input degrades to "no constraint" and unknown fields to the empty
//! value. Errors only arise at the edges: validating a record before a
//! mutation, loading screen configuration, and talking to a record store.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a record failed pre-mutation validation
//! - [`ConfigError`]: screen configuration could not be loaded or parsed
//! - [`StoreError`]: a record store operation failed

use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the rowset crate
#[derive(Debug)]
pub enum RowsetError {
    /// Record validation errors
    Validation(ValidationError),

    /// Configuration errors
    Config(ConfigError),

    /// Record store errors
    Store(StoreError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for RowsetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowsetError::Validation(e) => write!(f, "{}", e),
            RowsetError::Config(e) => write!(f, "{}", e),
            RowsetError::Store(e) => write!(f, "{}", e),
            RowsetError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RowsetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RowsetError::Validation(e) => Some(e),
            RowsetError::Config(e) => Some(e),
            RowsetError::Store(e) => Some(e),
            RowsetError::Internal(_) => None,
        }
    }
}

impl RowsetError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RowsetError::Validation(_) => "VALIDATION_ERROR",
            RowsetError::Config(_) => "CONFIG_ERROR",
            RowsetError::Store(e) => e.error_code(),
            RowsetError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised when a record fails validation before a mutation
#[derive(Debug)]
pub enum ValidationError {
    /// Single field validation error
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON payload
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for RowsetError {
    fn from(err: ValidationError) -> Self {
        RowsetError::Validation(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to screen configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// Screen is not defined in the configuration
    UnknownScreen { name: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::UnknownScreen { name } => {
                write!(f, "Unknown screen: {}", name)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for RowsetError {
    fn from(err: ConfigError) -> Self {
        RowsetError::Config(err)
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors related to record store operations
#[derive(Debug)]
pub enum StoreError {
    /// Record was not found
    NotFound { id: Uuid },

    /// Store operation failed
    OperationFailed { operation: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { id } => {
                write!(f, "Record with id '{}' not found", id)
            }
            StoreError::OperationFailed { operation, message } => {
                write!(f, "Store {} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "RECORD_NOT_FOUND",
            StoreError::OperationFailed { .. } => "STORE_OPERATION_FAILED",
        }
    }
}

impl From<StoreError> for RowsetError {
    fn from(err: StoreError) -> Self {
        RowsetError::Store(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for RowsetError {
    fn from(err: serde_json::Error) -> Self {
        RowsetError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for RowsetError {
    fn from(err: serde_yaml::Error) -> Self {
        RowsetError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for RowsetError {
    fn from(err: std::io::Error) -> Self {
        RowsetError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error for store boundary interop
impl From<anyhow::Error> for RowsetError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StoreError>() {
            Ok(store_err) => RowsetError::Store(store_err),
            Err(other) => RowsetError::Internal(other.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for rowset operations
pub type RowsetResult<T> = Result<T, RowsetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::FieldError {
            field: "amount".to_string(),
            message: "must be positive".to_string(),
        };
        assert!(err.to_string().contains("amount"));
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "name".to_string(),
                message: "required".to_string(),
            },
            FieldValidationError {
                field: "amount".to_string(),
                message: "invalid".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("name"));
        assert!(display.contains("amount"));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound { id: Uuid::nil() };
        assert!(err.to_string().contains("not found"));
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_rowset_error_conversion() {
        let err: RowsetError = StoreError::NotFound { id: Uuid::nil() }.into();
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");

        let err: RowsetError = ConfigError::FileNotFound {
            path: "/etc/screens.yaml".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_from_anyhow_downcasts_store_errors() {
        let store_err: anyhow::Error = StoreError::NotFound { id: Uuid::nil() }.into();
        let err: RowsetError = store_err.into();
        assert!(matches!(err, RowsetError::Store(StoreError::NotFound { .. })));

        let plain: anyhow::Error = anyhow::anyhow!("boom");
        let err: RowsetError = plain.into();
        assert!(matches!(err, RowsetError::Internal(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RowsetError = json_err.into();
        assert!(matches!(
            err,
            RowsetError::Validation(ValidationError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::FileNotFound {
            path: "/etc/screens.yaml".to_string(),
        };
        assert!(err.to_string().contains("/etc/screens.yaml"));
    }
}
