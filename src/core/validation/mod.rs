//! Record validation
//!
//! Validation runs before any store mutation: a record that fails its
//! screen's rules never reaches the network. Failures for every field are
//! collected into one [`ValidationError::FieldErrors`] so a form can show
//! all problems at once.

pub mod validators;

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::FieldValue;
use crate::core::record::Record;

/// A field validator: receives the field name and its value, returns a
/// human-readable message on failure
pub type FieldValidator = Box<dyn Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync>;

/// Collects per-field validation rules for one screen
///
/// Missing attributes are validated as [`FieldValue::Null`], which is what
/// lets `required` catch them.
#[derive(Default)]
pub struct RecordValidator {
    rules: Vec<(String, FieldValidator)>,
}

impl RecordValidator {
    /// Create an empty validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule for a field, builder style
    pub fn rule<F>(mut self, field: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.push((field.into(), Box::new(validator)));
        self
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether any rules are registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validate a record against every rule
    ///
    /// All rules run even after the first failure so the caller gets the
    /// complete picture in one pass.
    pub fn validate(&self, record: &Record) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        for (field, validator) in &self.rules {
            let value = record.get(field);
            if let Err(message) = validator(field, &value) {
                errors.push(FieldValidationError {
                    field: field.clone(),
                    message,
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

impl std::fmt::Debug for RecordValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordValidator")
            .field("rules", &self.rules.iter().map(|(f, _)| f).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::validators::{in_list, positive, required};
    use super::*;

    fn validator() -> RecordValidator {
        RecordValidator::new()
            .rule("name", required())
            .rule("amount", required())
            .rule("amount", positive())
            .rule(
                "status",
                in_list(vec!["active".to_string(), "retired".to_string()]),
            )
    }

    #[test]
    fn test_valid_record_passes() {
        let record = Record::new()
            .field("name", "Laptop")
            .field("amount", 1200i64)
            .field("status", "active");
        assert!(validator().validate(&record).is_ok());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let record = Record::new().field("amount", 10i64);
        let err = validator().validate(&record).unwrap_err();
        match err {
            ValidationError::FieldErrors(errors) => {
                assert!(errors.iter().any(|e| e.field == "name"));
            }
            other => panic!("expected FieldErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_all_failures_collected() {
        let record = Record::new()
            .field("amount", -5i64)
            .field("status", "unknown");
        let err = validator().validate(&record).unwrap_err();
        match err {
            ValidationError::FieldErrors(errors) => {
                // name missing, amount negative, status not in list
                assert_eq!(errors.len(), 3);
            }
            other => panic!("expected FieldErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_validator_accepts_anything() {
        let record = Record::new();
        assert!(RecordValidator::new().validate(&record).is_ok());
    }
}
