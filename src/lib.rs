//! Fieldcheck: declarative, composable field validation
//!
//! Fieldcheck decides which fields of a record violate a set of rules and
//! returns every violation as plain data. It works on fully built records
//! and on sparse, partially assigned ones alike, without materializing the
//! missing fields.
//!
//! # Core Concepts
//!
//! - **Fields**: `TypeInfo` describes a type, `FieldRef` names one of its
//!   fields, and `field!` produces compile-time checked references
//! - **Values**: a `FieldValueMap` snapshot, where a missing key means
//!   "not supplied" and `Value::Null` means "supplied as null"
//! - **Rules**: required, not-null, string length, date range and
//!   annotation rules, plus any custom `Rule`
//! - **Validators**: immutable compositions of rules built once and reused
//!
//! Violations are returned, never raised. Only a malformed setup
//! (`BuildError`) or misuse at validate time (`ValidateError`) is an error.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck::core::Tracked;
//! use fieldcheck::{field, record};
//! use chrono::{DateTime, Utc};
//!
//! record! {
//!     #[derive(Clone, Debug)]
//!     pub struct Profile {
//!         pub handle: String,
//!         pub age: i64,
//!         pub last_seen: DateTime<Utc>,
//!     }
//! }
//!
//! let mut draft = Tracked::<Profile>::new();
//! draft.set(field!(Profile, handle), "ada".to_string());
//!
//! let errors = draft
//!     .validate_with(|v| v.required(field!(Profile, handle)).required(field!(Profile, age)))
//!     .unwrap();
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].to_string(), "age: Required field was omitted.");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod rules;
pub mod validator;

// Re-export commonly used types
pub use builder::{BuildError, RecordValidatorBuilder, ValidatorBuilder};
pub use config::{ConfigError, ValidatorConfig};
pub use crate::core::{AnyField, Field, FieldRef, FieldValueMap, PropertySource, Record, Tracked, TypeInfo, Value};
pub use rules::{DateBound, Rule, ValidationError};
pub use validator::{RecordValidator, ValidateError, Validator};
