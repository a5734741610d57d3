//! Error types shared by the store and the HTTP layer.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: &'static str,
    pub message: String,
}

impl FieldError {
    pub(crate) fn required(path: &'static str) -> Self {
        Self {
            path,
            message: format!("Path `{path}` is required."),
        }
    }

    pub(crate) fn cast(path: &'static str, kind: &str, value: &Value) -> Self {
        Self {
            path,
            message: format!(
                "Cast to {kind} failed for value {value} (type {}) at path \"{path}\"",
                json_type(value)
            ),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Todo fields failed validation. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Todo validation failed: {}", join_fields(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures a [`TodoStore`](crate::store::TodoStore) can report.
///
/// Absence is not an error: lookups return `Ok(None)` for an unknown id.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The identifier is not one the store could ever have issued.
    #[error("Cast to UUID failed for value \"{0}\" at path \"id\"")]
    InvalidId(String),

    /// The backing storage could not complete the round-trip.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
