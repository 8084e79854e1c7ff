//! Registration errors for validators and rules.

use crate::core::FieldRef;
use thiserror::Error;

/// Errors that can occur while registering fields on rules and validators.
///
/// These describe a malformed validator setup and are raised at
/// registration time, never while validating data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Field {field:?} is not declared in the type hierarchy of {target}")]
    FieldNotInTypeHierarchy {
        field: FieldRef,
        target: &'static str,
    },

    #[error("Type {type_name} has no field named {name:?}")]
    UnknownField {
        type_name: &'static str,
        name: String,
    },

    #[error("Expression {expression:?} is not a plain field reference")]
    InvalidFieldExpression { expression: String },
}
