//! Core field model shared by rules and validators.
//!
//! This module contains the data the engine reasons about:
//! - Field identity via `TypeInfo` and `FieldRef`
//! - Field values and the `FieldValueMap` snapshot
//! - Value sources: full records and sparse `Tracked` assignments
//!
//! Nothing in this module validates anything; rules only read from it.

mod field;
mod record;
mod value;

pub use field::{AnyField, Field, FieldRef, TypeInfo};
pub use record::{PropertySource, Record, Tracked};
pub use value::{FieldType, FieldValueMap, FromValue, Value};
