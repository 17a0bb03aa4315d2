//! Field-level validation errors shared by the HTML forms.

use serde::Serialize;
use std::collections::BTreeMap;

/// Key under which errors not tied to one field are stored.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Message for a required field left blank.
pub const REQUIRED: &str = "Обязательное поле.";

/// Message for a value that exceeds a field's length limit.
pub fn max_length_message(max: usize, actual: usize) -> String {
    format!("Убедитесь, что это значение содержит не более {max} символов (сейчас {actual}).")
}

/// Errors collected while validating a submitted form, keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}` for templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Records an error that is not tied to a single field.
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// Messages recorded for `field`, empty if none.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trims `value` and checks it is present and at most `max` characters.
///
/// Returns the trimmed value, or records an error and returns `None`.
pub fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    max: Option<usize>,
) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, REQUIRED);
        return None;
    }
    if let Some(max) = max {
        let length = trimmed.chars().count();
        if length > max {
            errors.add(field, max_length_message(max, length));
            return None;
        }
    }
    Some(trimmed.to_string())
}
