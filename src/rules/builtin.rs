//! Built-in rules: required, not-null, string length and date range.

use super::{EachField, FieldCheck, FieldList, Rule, ValidationError};
use crate::core::{FieldRef, FieldValueMap, TypeInfo, Value};
use crate::validator::ValidateError;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Arc;

/// Reports every governed field that is missing from the supplied values.
///
/// A field supplied as null counts as present.
#[derive(Clone, Debug)]
pub struct RequiredRule {
    fields: FieldList,
}

impl RequiredRule {
    pub fn new(target: &'static TypeInfo) -> Self {
        Self {
            fields: FieldList::new(target),
        }
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldList {
        &mut self.fields
    }
}

impl Rule for RequiredRule {
    fn name(&self) -> &'static str {
        "required"
    }

    fn target(&self) -> &'static TypeInfo {
        self.fields.target()
    }

    fn governed_fields(&self) -> Vec<FieldRef> {
        self.fields.iter().copied().collect()
    }

    fn evaluate(&self, values: &FieldValueMap) -> Result<Vec<ValidationError>, ValidateError> {
        Ok(self
            .fields
            .iter()
            .filter(|field| !values.contains_key(field))
            .map(|field| ValidationError::RequiredFieldOmitted { field: *field })
            .collect())
    }
}

/// Reports fields supplied as null.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotNull;

impl FieldCheck for NotNull {
    type Value = Value;

    const NAME: &'static str = "not_null";

    fn check(&self, field: FieldRef, value: Option<&Value>) -> Vec<ValidationError> {
        match value {
            None => vec![ValidationError::NullFieldDetected { field }],
            Some(_) => Vec::new(),
        }
    }
}

pub type NotNullRule = EachField<NotNull>;

/// Bounds on the number of characters in a text field.
///
/// Either bound may be unset. Null values always pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StringLength {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl StringLength {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }

    fn accepts(&self, text: &str) -> bool {
        let len = text.chars().count();
        !(self.min.is_some_and(|min| len < min) || self.max.is_some_and(|max| len > max))
    }
}

impl FieldCheck for StringLength {
    type Value = String;

    const NAME: &'static str = "string_length";

    fn check(&self, field: FieldRef, value: Option<&String>) -> Vec<ValidationError> {
        match value {
            Some(text) if !self.accepts(text) => {
                vec![ValidationError::MinLengthNotFulfilled { field }]
            }
            _ => Vec::new(),
        }
    }
}

pub type StringLengthRule = EachField<StringLength>;

/// One end of a date range: a fixed instant, or a function evaluated each
/// time the rule runs.
#[derive(Clone)]
pub enum DateBound {
    Fixed(DateTime<Utc>),
    Rolling(Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>),
}

impl DateBound {
    pub fn rolling<F>(bound: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self::Rolling(Arc::new(bound))
    }

    /// Rolling bound at `days` days from the moment of evaluation.
    /// Negative values point into the past.
    ///
    /// Offsets beyond the representable range saturate to `MIN_UTC` or
    /// `MAX_UTC`.
    pub fn days_from_now(days: i64) -> Self {
        Self::rolling(move || {
            shift_days(Utc::now(), days).unwrap_or(if days < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
        })
    }

    /// Like [`DateBound::days_from_now`], but `None` when the offset does
    /// not land on a representable instant today.
    pub fn checked_days_from_now(days: i64) -> Option<Self> {
        shift_days(Utc::now(), days).map(|_| Self::days_from_now(days))
    }

    /// Current value of the bound.
    pub fn resolve(&self) -> DateTime<Utc> {
        match self {
            Self::Fixed(at) => *at,
            Self::Rolling(bound) => bound(),
        }
    }
}

fn shift_days(from: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    Duration::try_days(days).and_then(|offset| from.checked_add_signed(offset))
}

impl From<DateTime<Utc>> for DateBound {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }
}

impl fmt::Debug for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(at) => f.debug_tuple("Fixed").field(at).finish(),
            Self::Rolling(_) => f.write_str("Rolling(..)"),
        }
    }
}

/// Inclusive range for timestamp fields. Null values always pass.
#[derive(Clone, Debug, Default)]
pub struct DateRange {
    pub min: Option<DateBound>,
    pub max: Option<DateBound>,
}

impl DateRange {
    pub fn new(min: Option<DateBound>, max: Option<DateBound>) -> Self {
        Self { min, max }
    }

    fn accepts(&self, at: &DateTime<Utc>) -> bool {
        let too_early = self.min.as_ref().is_some_and(|min| min.resolve() > *at);
        let too_late = self.max.as_ref().is_some_and(|max| max.resolve() < *at);
        !(too_early || too_late)
    }
}

impl FieldCheck for DateRange {
    type Value = DateTime<Utc>;

    const NAME: &'static str = "date_range";

    fn check(&self, field: FieldRef, value: Option<&DateTime<Utc>>) -> Vec<ValidationError> {
        match value {
            Some(at) if !self.accepts(at) => vec![ValidationError::DateOutOfRange { field }],
            _ => Vec::new(),
        }
    }
}

pub type DateRangeRule = EachField<DateRange>;
