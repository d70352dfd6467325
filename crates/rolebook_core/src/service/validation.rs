//! Field-level validation helpers.
//!
//! Checks append to a `ValidationErrors` accumulator instead of returning
//! early, so one pass reports every violated rule.

use super::messages::render;
use std::fmt::{Display, Formatter};

pub const NOT_EMPTY_KEY: &str = "validation.message.notEmpty";
pub const MAX_LENGTH_KEY: &str = "validation.message.maxLength";

/// One rejected field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message_key: &'static str,
    pub args: Vec<String>,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(self.message_key, &self.args))
    }
}

/// Accumulated field errors for one validated object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &'static str, message_key: &'static str, args: Vec<String>) {
        self.errors.push(FieldError {
            field,
            message_key,
            args,
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn field_errors<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> {
        self.errors.iter().filter(move |error| error.field == field)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        f.write_str(&messages.join(" "))
    }
}

/// Rejects `value` when it is empty or whitespace only.
pub fn test_not_empty(value: &str, field: &'static str, errors: &mut ValidationErrors, label: &str) {
    if value.trim().is_empty() {
        errors.reject(field, NOT_EMPTY_KEY, vec![label.to_string()]);
    }
}

/// Rejects `value` when it has more than `max` characters.
pub fn test_max_length(
    value: &str,
    field: &'static str,
    errors: &mut ValidationErrors,
    max: usize,
    label: &str,
) {
    if value.chars().count() > max {
        errors.reject(
            field,
            MAX_LENGTH_KEY,
            vec![label.to_string(), max.to_string()],
        );
    }
}
