//! Rules: units of validation scoped to a target type and a set of fields.
//!
//! Two execution shapes exist:
//! - Whole-map rules implement [`Rule`] directly and inspect the full
//!   [`FieldValueMap`] (e.g. "is this field present at all").
//! - Single-field rules implement [`FieldCheck`] and are wrapped in
//!   [`EachField`], which casts each governed field's value and checks it
//!   independently.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck::core::{FieldRef, FieldValueMap, TypeInfo, Value};
//! use fieldcheck::rules::{Rule, StringLength, StringLengthRule};
//!
//! static PERSON: TypeInfo = TypeInfo::new("Person", &["name"]);
//!
//! let mut rule = StringLengthRule::new(&PERSON, StringLength::new(Some(3), Some(5)));
//! rule.fields_mut().add([FieldRef::new("Person", "name")], true).unwrap();
//!
//! let mut values = FieldValueMap::new();
//! values.insert(FieldRef::new("Person", "name"), Value::from("ab"));
//!
//! assert_eq!(rule.evaluate(&values).unwrap().len(), 1);
//! ```

pub mod annotations;
pub mod builtin;
pub mod violations;

pub use annotations::{
    Annotation, AnnotationRegistry, AnnotationRule, AnnotationSource, HonorAnnotations, Predicate,
};
pub use builtin::{
    DateBound, DateRange, DateRangeRule, NotNull, NotNullRule, RequiredRule, StringLength,
    StringLengthRule,
};
pub use violations::ValidationError;

use crate::builder::BuildError;
use crate::core::{FieldRef, FieldValueMap, FromValue, TypeInfo};
use crate::validator::ValidateError;
use std::collections::HashSet;

/// A validation rule over the fields of one target type.
pub trait Rule: Send + Sync {
    /// Short name of the rule kind, used for diagnostics.
    fn name(&self) -> &'static str;

    /// Type whose fields the rule examines.
    fn target(&self) -> &'static TypeInfo;

    /// Fields the rule applies to. Order is unspecified.
    fn governed_fields(&self) -> Vec<FieldRef>;

    /// Check the supplied values, returning every violation found.
    fn evaluate(&self, values: &FieldValueMap) -> Result<Vec<ValidationError>, ValidateError>;
}

/// Growable set of fields governed by a list rule.
#[derive(Clone, Debug)]
pub struct FieldList {
    target: &'static TypeInfo,
    fields: HashSet<FieldRef>,
}

impl FieldList {
    pub fn new(target: &'static TypeInfo) -> Self {
        Self {
            target,
            fields: HashSet::new(),
        }
    }

    pub fn target(&self) -> &'static TypeInfo {
        self.target
    }

    /// Add fields to the set. Duplicates are ignored.
    ///
    /// With `verify_type`, every field must be declared on the target type
    /// or one of its supertypes. The first field that is not aborts the
    /// call; fields accepted before it stay in the set.
    pub fn add<I>(&mut self, fields: I, verify_type: bool) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = FieldRef>,
    {
        if !verify_type {
            return Ok(self.extend(fields));
        }
        for field in fields {
            if !self.target.lineage_contains(field.declaring_type()) {
                return Err(BuildError::FieldNotInTypeHierarchy {
                    field,
                    target: self.target.name(),
                });
            }
            self.fields.insert(field);
        }
        Ok(self)
    }

    /// Add fields without the hierarchy check.
    pub fn extend<I>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = FieldRef>,
    {
        self.fields.extend(fields);
        self
    }

    /// Add fields by name, resolved on the target type.
    pub fn add_named(&mut self, names: &[&str]) -> Result<&mut Self, BuildError> {
        let target = self.target;
        for name in names {
            let field = target.resolve(name)?;
            self.fields.insert(field);
        }
        Ok(self)
    }

    pub fn contains(&self, field: &FieldRef) -> bool {
        self.fields.contains(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRef> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Check applied to one field's value at a time.
///
/// `value` is `None` when the field was supplied as null.
pub trait FieldCheck: Send + Sync {
    type Value: FromValue;

    const NAME: &'static str;

    fn check(&self, field: FieldRef, value: Option<&Self::Value>) -> Vec<ValidationError>;
}

/// List rule that runs a [`FieldCheck`] on each governed field present in
/// the supplied values. Absent fields are skipped.
pub struct EachField<C> {
    fields: FieldList,
    check: C,
}

impl<C: FieldCheck> EachField<C> {
    pub fn new(target: &'static TypeInfo, check: C) -> Self {
        Self {
            fields: FieldList::new(target),
            check,
        }
    }

    pub fn fields(&self) -> &FieldList {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldList {
        &mut self.fields
    }

    pub fn field_check(&self) -> &C {
        &self.check
    }
}

impl<C: FieldCheck> Rule for EachField<C> {
    fn name(&self) -> &'static str {
        C::NAME
    }

    fn target(&self) -> &'static TypeInfo {
        self.fields.target()
    }

    fn governed_fields(&self) -> Vec<FieldRef> {
        self.fields.iter().copied().collect()
    }

    fn evaluate(&self, values: &FieldValueMap) -> Result<Vec<ValidationError>, ValidateError> {
        let mut errors = Vec::new();
        for field in self.fields.iter() {
            let Some(value) = values.get(field) else {
                continue;
            };
            if value.is_null() {
                errors.extend(self.check.check(*field, None));
                continue;
            }
            let typed = C::Value::from_value(value).ok_or(ValidateError::ValueTypeMismatch {
                field: *field,
                expected: <C::Value as FromValue>::KIND,
                found: value.kind(),
            })?;
            errors.extend(self.check.check(*field, Some(&typed)));
        }
        Ok(errors)
    }
}
