//! Composed, immutable validators.
//!
//! A [`Validator`] always runs its required rule first, its not-null rule
//! second, then every other rule in registration order, and concatenates
//! the results. It holds no per-call state, so one instance can be built
//! once and shared across threads.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck::{field, record, RecordValidator};
//!
//! record! {
//!     pub struct Signup {
//!         pub login: String,
//!         pub referrer: Option<String>,
//!     }
//! }
//!
//! let validator = RecordValidator::<Signup>::builder()
//!     .required_and_not_null(field!(Signup, login))
//!     .string_length(Some(3), Some(16), field!(Signup, login))
//!     .string_length(None, Some(32), field!(Signup, referrer))
//!     .build();
//!
//! let signup = Signup { login: "ab".to_string(), referrer: None };
//! let errors = validator.validate(&signup).unwrap();
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].to_string(), "login: Minimum length was not fulfilled.");
//! ```

pub mod error;

pub use error::ValidateError;

use crate::builder::{RecordValidatorBuilder, ValidatorBuilder};
use crate::core::{FieldValueMap, PropertySource, Record, Tracked, TypeInfo};
use crate::rules::{NotNullRule, RequiredRule, Rule, ValidationError};
use std::fmt;
use std::marker::PhantomData;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Immutable set of rules for one target type.
pub struct Validator {
    pub(crate) target: &'static TypeInfo,
    pub(crate) required: RequiredRule,
    pub(crate) not_null: NotNullRule,
    pub(crate) rules: Vec<Box<dyn Rule>>,
}

impl Validator {
    pub fn builder(target: &'static TypeInfo) -> ValidatorBuilder {
        ValidatorBuilder::new(target)
    }

    pub fn target(&self) -> &'static TypeInfo {
        self.target
    }

    pub fn required(&self) -> &RequiredRule {
        &self.required
    }

    pub fn not_null(&self) -> &NotNullRule {
        &self.not_null
    }

    /// Rules registered after the built-in required and not-null rules.
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Validate the fields set on `instance`.
    ///
    /// Fails with [`ValidateError::TypeMismatch`] unless the instance's
    /// type is the target type or extends it.
    pub fn validate(
        &self,
        instance: &dyn PropertySource,
    ) -> Result<Vec<ValidationError>, ValidateError> {
        let found = instance.type_info();
        if !found.is(self.target) {
            return Err(ValidateError::TypeMismatch {
                expected: self.target.name(),
                found: found.name(),
            });
        }
        self.validate_values(&instance.values())
    }

    /// Validate an already resolved field snapshot.
    pub fn validate_values(
        &self,
        values: &FieldValueMap,
    ) -> Result<Vec<ValidationError>, ValidateError> {
        let mut errors = Vec::new();
        self.run(&self.required, values, &mut errors)?;
        self.run(&self.not_null, values, &mut errors)?;
        for rule in &self.rules {
            self.run(rule.as_ref(), values, &mut errors)?;
        }

        tracing::debug!(
            type_name = self.target.name(),
            fields = values.len(),
            violations = errors.len(),
            "validated field values"
        );
        Ok(errors)
    }

    fn run(
        &self,
        rule: &dyn Rule,
        values: &FieldValueMap,
        errors: &mut Vec<ValidationError>,
    ) -> Result<(), ValidateError> {
        let found = rule.evaluate(values)?;
        tracing::trace!(
            rule = rule.name(),
            type_name = self.target.name(),
            violations = found.len(),
            "evaluated rule"
        );
        errors.extend(found);
        Ok(())
    }

    /// Validate and accumulate every violation into a single
    /// [`Validation`].
    pub fn check(
        &self,
        values: &FieldValueMap,
    ) -> Result<Validation<(), NonEmptyVec<ValidationError>>, ValidateError> {
        let checks: Vec<Validation<(), NonEmptyVec<ValidationError>>> = self
            .validate_values(values)?
            .into_iter()
            .map(Validation::fail)
            .collect();

        Ok(Validation::all_vec(checks).map(|_| ()))
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("target", &self.target.name())
            .field("required", &self.required.fields().len())
            .field("not_null", &self.not_null.fields().len())
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// [`Validator`] bound at compile time to the record type `T`.
pub struct RecordValidator<T: Record> {
    inner: Validator,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordValidator<T> {
    pub fn builder() -> RecordValidatorBuilder<T> {
        RecordValidatorBuilder::new()
    }

    pub(crate) fn from_validator(inner: Validator) -> Self {
        Self {
            inner,
            _record: PhantomData,
        }
    }

    /// Validate every field of a fully built record.
    pub fn validate(&self, instance: &T) -> Result<Vec<ValidationError>, ValidateError> {
        self.inner.validate(instance)
    }

    /// Validate only the fields assigned on a tracked record.
    pub fn validate_tracked(
        &self,
        tracked: &Tracked<T>,
    ) -> Result<Vec<ValidationError>, ValidateError> {
        self.inner.validate(tracked)
    }

    pub fn validate_values(
        &self,
        values: &FieldValueMap,
    ) -> Result<Vec<ValidationError>, ValidateError> {
        self.inner.validate_values(values)
    }

    pub fn check(
        &self,
        instance: &T,
    ) -> Result<Validation<(), NonEmptyVec<ValidationError>>, ValidateError> {
        self.inner.check(&instance.values())
    }

    pub fn as_validator(&self) -> &Validator {
        &self.inner
    }

    pub fn into_validator(self) -> Validator {
        self.inner
    }
}

impl<T: Record> fmt::Debug for RecordValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordValidator").field(&self.inner).finish()
    }
}
