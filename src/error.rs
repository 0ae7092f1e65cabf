use serde::Serialize;
use thiserror::Error;

use crate::form::FieldName;

/// User-facing field errors. None is fatal: a required field is flagged
/// inline and a rejected edit is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: FieldName },
    #[error("`{input}` is not a number")]
    Unparseable { input: String },
    #[error("`{label}` is not a mortgage type")]
    UnknownMortgageType { label: String },
}

impl FieldError {
    /// Field the error belongs to, if it is tied to one.
    pub fn field(&self) -> Option<FieldName> {
        match self {
            FieldError::Required { field } => Some(*field),
            FieldError::UnknownMortgageType { .. } => Some(FieldName::Type),
            FieldError::Unparseable { .. } => None,
        }
    }
}
