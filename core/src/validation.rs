//! Rule-driven request validation.
//!
//! # Design
//! `validate` walks `RequestSchema::FIELDS` and applies each field's
//! `ValidationRule` with one generic routine. Every violation is collected;
//! the caller gets all of them in a single `ValidationError` rather than
//! only the first.

use thiserror::Error;
use tracing::debug;

use crate::formats::StringFormat;
use crate::schema::{format_float, ParamType, ParamValue, RequestSchema, ValidationRule};

/// One or more rule violations, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", .errors.join("; "))]
pub struct ValidationError {
    pub errors: Vec<String>,
}

/// Check `request` against its declared rules.
pub fn validate<T: RequestSchema>(request: &T) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    for field in T::FIELDS {
        check_field(field.name, (field.value)(request), &field.rule, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(violations = errors.len(), "request failed validation");
        Err(ValidationError { errors })
    }
}

fn check_field(name: &str, value: ParamValue<'_>, rule: &ValidationRule, errors: &mut Vec<String>) {
    if value.is_zero() {
        if rule.required {
            errors.push(format!("Required parameter [{name}] is missing"));
        }
        return;
    }

    match rule.kind {
        ParamType::Number | ParamType::Integer => {
            if let Some(n) = value.as_f64() {
                if let Some(min) = rule.min.filter(|min| n < *min) {
                    errors.push(format!("Parameter [{name}] must be at least {}", format_float(min)));
                }
                if let Some(max) = rule.max.filter(|max| n > *max) {
                    errors.push(format!("Parameter [{name}] must be at most {}", format_float(max)));
                }
            }
        }
        ParamType::String => {
            let text = value.to_string();
            let len = text.chars().count();
            if let Some(min) = rule.min_length.filter(|min| len < *min) {
                errors.push(format!("Parameter [{name}] must be at least {min} characters"));
            }
            if let Some(max) = rule.max_length.filter(|max| len > *max) {
                errors.push(format!("Parameter [{name}] must be at most {max} characters"));
            }
            if let Some(format) = rule.format.and_then(StringFormat::from_name) {
                if !format.matches(&text) {
                    errors.push(format!("Parameter [{name}] must be a valid {}", format.name()));
                }
            }
        }
    }

    if !rule.allowed.is_empty() {
        let text = value.to_string();
        if !rule.allowed.iter().any(|allowed| *allowed == text) {
            errors.push(format!(
                "Parameter [{name}] must be one of: {}",
                rule.allowed.join(", ")
            ));
        }
    }
}
