//! Reusable field validators
//!
//! Each validator checks one aspect of a field value and stays permissive
//! about everything else: a non-numeric value passes `positive` so that the
//! type mismatch is reported by whichever validator owns that concern.

use crate::core::field::{FieldValue, parse_date};
use regex::Regex;

/// Validator: field is required (not null, not blank)
pub fn required() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &FieldValue| {
        if value.is_blank() {
            Err(format!("Field '{}' is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be positive
pub fn positive() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &FieldValue| match value {
        FieldValue::Integer(_) | FieldValue::Float(_) => {
            let num = value.as_number();
            if num <= 0.0 {
                Err(format!(
                    "Field '{}' must be positive (value: {})",
                    field, num
                ))
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

/// Validator: number must not exceed maximum
pub fn max_value(max: f64) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone
{
    move |field: &str, value: &FieldValue| match value {
        FieldValue::Integer(_) | FieldValue::Float(_) => {
            let num = value.as_number();
            if num > max {
                Err(format!(
                    "Field '{}' must not exceed {} (value: {})",
                    field, max, num
                ))
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

/// Validator: string length must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| {
        if let Some(s) = value.as_string() {
            let len = s.len();
            if len < min {
                Err(format!(
                    "Field '{}' must have at least {} characters (currently: {})",
                    field, min, len
                ))
            } else if len > max {
                Err(format!(
                    "Field '{}' must not exceed {} characters (currently: {})",
                    field, max, len
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| {
        if value.is_blank() {
            return Ok(());
        }
        let text = value.as_text();
        if !allowed.contains(&text) {
            Err(format!(
                "Field '{}' must be one of: {:?} (current value: {})",
                field, allowed, text
            ))
        } else {
            Ok(())
        }
    }
}

/// Validator: value must parse as a date
pub fn date_format() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &FieldValue| {
        if value.is_blank() || matches!(value, FieldValue::Date(_)) {
            return Ok(());
        }
        match value.as_string() {
            Some(s) if parse_date(s).is_none() => Err(format!(
                "Field '{}' must be a date in YYYY-MM-DD format (current value: {})",
                field, s
            )),
            _ => Ok(()),
        }
    }
}

/// Validator: string must match a pattern (asset tags, serial numbers)
pub fn matches_pattern(
    pattern: Regex,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| {
        if value.is_blank() {
            return Ok(());
        }
        if let Some(s) = value.as_string() {
            if !pattern.is_match(s) {
                return Err(format!(
                    "Field '{}' does not match the expected format (value: {})",
                    field, s
                ));
            }
        }
        Ok(())
    }
}
