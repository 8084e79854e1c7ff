//! Validate-time structural errors.

use crate::core::FieldRef;
use thiserror::Error;

/// Errors that abort a validate call before any violation is reported.
///
/// These signal misuse of a validator, not invalid data; invalid data is
/// reported as [`ValidationError`](crate::rules::ValidationError)s.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidateError {
    #[error("Instance of type {found} is not in the type hierarchy of {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field {field} holds a {found} value, expected {expected}")]
    ValueTypeMismatch {
        field: FieldRef,
        expected: &'static str,
        found: &'static str,
    },
}
