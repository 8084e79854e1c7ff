//! Builder API for ergonomic validator construction.
//!
//! This module provides fluent builders and macros for declaring validated
//! records and the rules that apply to them:
//! - [`ValidatorBuilder`] registers fields by [`FieldRef`](crate::core::FieldRef)
//!   or by name, with registration-time checks
//! - [`RecordValidatorBuilder`] registers fields through typed accessors
//! - [`record!`](crate::record) and [`field!`](crate::field) declare records
//!   and refer to their fields

pub mod error;
pub mod macros;
pub mod record;
pub mod validator;

pub use error::BuildError;
pub use record::RecordValidatorBuilder;
pub use validator::ValidatorBuilder;
