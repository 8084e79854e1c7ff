//! Typed builder for validators of a [`Record`] type.

use crate::builder::validator::ValidatorBuilder;
use crate::config::{ConfigError, ValidatorConfig};
use crate::core::{AnyField, Field, FieldRef, FieldType, Record};
use crate::rules::{
    AnnotationSource, DateBound, DateRange, DateRangeRule, Rule, StringLength, StringLengthRule,
};
use crate::validator::RecordValidator;
use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use std::sync::Arc;

/// Builder for [`RecordValidator`]s, registering fields through
/// compile-time checked [`Field`] accessors.
///
/// Accessors are already scoped to `T`, so registration cannot fail and
/// no hierarchy check is performed.
pub struct RecordValidatorBuilder<T: Record> {
    inner: ValidatorBuilder,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RecordValidatorBuilder<T> {
    pub fn new() -> Self {
        Self {
            inner: ValidatorBuilder::new(T::TYPE),
            _record: PhantomData,
        }
    }

    /// Mark fields as required (present in the values).
    pub fn required<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyField<T>>,
    {
        self.inner.required.fields_mut().extend(refs::<T, _>(fields));
        self
    }

    /// Mark fields as non-nullable (not null when present).
    pub fn not_null<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyField<T>>,
    {
        self.inner.not_null.fields_mut().extend(refs::<T, _>(fields));
        self
    }

    pub fn required_and_not_null<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyField<T>>,
    {
        let fields = refs::<T, _>(fields);
        self.inner.required.fields_mut().extend(fields.iter().copied());
        self.inner.not_null.fields_mut().extend(fields);
        self
    }

    /// Bound the character count of text fields.
    pub fn string_length<V, I>(self, min: Option<usize>, max: Option<usize>, fields: I) -> Self
    where
        V: FieldType<Target = String>,
        I: IntoIterator<Item = Field<T, V>>,
    {
        let mut rule = StringLengthRule::new(T::TYPE, StringLength::new(min, max));
        rule.fields_mut().extend(fields.into_iter().map(|f| f.field_ref()));
        self.add_rule(rule)
    }

    /// Bound timestamp fields.
    pub fn date_range<V, I>(self, min: Option<DateBound>, max: Option<DateBound>, fields: I) -> Self
    where
        V: FieldType<Target = DateTime<Utc>>,
        I: IntoIterator<Item = Field<T, V>>,
    {
        let mut rule = DateRangeRule::new(T::TYPE, DateRange::new(min, max));
        rule.fields_mut().extend(fields.into_iter().map(|f| f.field_ref()));
        self.add_rule(rule)
    }

    pub fn honor_annotations(self, source: Arc<dyn AnnotationSource>) -> Self {
        self.map(|inner| inner.honor_annotations(source))
    }

    pub fn add_rule<R: Rule + 'static>(self, rule: R) -> Self {
        self.map(|inner| inner.add_rule(rule))
    }

    pub fn add_rules<I>(self, rules: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Rule>>,
    {
        self.map(|inner| inner.add_rules(rules))
    }

    /// Register the rules described by `config`, resolving its field names
    /// on `T`.
    pub fn apply_config(self, config: &ValidatorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: config.apply(self.inner)?,
            _record: PhantomData,
        })
    }

    pub fn build(self) -> RecordValidator<T> {
        RecordValidator::from_validator(self.inner.build())
    }

    fn map(self, f: impl FnOnce(ValidatorBuilder) -> ValidatorBuilder) -> Self {
        Self {
            inner: f(self.inner),
            _record: PhantomData,
        }
    }
}

impl<T: Record> Default for RecordValidatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn refs<T: Record, I>(fields: I) -> Vec<FieldRef>
where
    I: IntoIterator,
    I::Item: Into<AnyField<T>>,
{
    fields
        .into_iter()
        .map(|f| Into::<AnyField<T>>::into(f).field_ref())
        .collect()
}
