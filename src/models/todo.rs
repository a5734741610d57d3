use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{FieldError, ValidationError};

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub done: bool,
}

/// Raw fields supplied by a caller for create or update.
///
/// Both fields are kept as loose JSON so that missing and mistyped values reach
/// [`TodoFields::validate`] instead of failing body extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<Value>,
}

/// Validated fields, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub done: bool,
}

impl TodoFields {
    pub fn new(title: impl Into<String>, done: bool) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            done: Some(Value::Bool(done)),
        }
    }

    /// Check required fields and types. Errors are reported in field order.
    pub fn validate(self) -> Result<NewTodo, ValidationError> {
        let mut errors = Vec::new();

        let title = match self.title {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            None | Some(Value::Null) | Some(Value::String(_)) => {
                errors.push(FieldError::required("title"));
                None
            }
            Some(other) => {
                errors.push(FieldError::cast("title", "string", &other));
                None
            }
        };

        let done = match self.done {
            Some(Value::Bool(b)) => Some(b),
            None | Some(Value::Null) => {
                errors.push(FieldError::required("done"));
                None
            }
            Some(other) => {
                errors.push(FieldError::cast("done", "Boolean", &other));
                None
            }
        };

        match (title, done) {
            (Some(title), Some(done)) => Ok(NewTodo { title, done }),
            _ => Err(ValidationError::new(errors)),
        }
    }
}

impl NewTodo {
    pub(crate) fn into_todo(self, id: Uuid) -> Todo {
        Todo {
            id,
            title: self.title,
            done: self.done,
        }
    }
}
