use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Represents a validation error body returned by the directory API.
///
/// The API answers rejected form submissions with a top-level message and a
/// map of field name to the messages raised for that field.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// The main error message
    #[serde(default)]
    pub message: String,
    /// Per-field validation messages, keyed by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorResponse {
    /// Creates a new error response with just a message.
    ///
    /// # Arguments
    /// * `message` - The error message
    ///
    /// # Returns
    /// A new [`ErrorResponse`] with the provided message and no field errors.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: BTreeMap::new(),
        }
    }

    /// Adds a validation message for `field`.
    #[must_use]
    pub fn with_field_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }

    /// Checks if this error response carries field errors.
    pub fn has_field_errors(&self) -> bool {
        self.errors.values().any(|messages| !messages.is_empty())
    }

    /// The first field message in field-name order, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .values()
            .flat_map(|messages| messages.iter())
            .map(String::as_str)
            .next()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.first_error() {
            Some(detail) if detail != self.message => write!(f, "{}: {}", self.message, detail),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}
