//! Sources of field values: full records and sparse, tracked assignments.

use super::field::{Field, TypeInfo};
use super::value::{FieldValueMap, Value};
use crate::builder::RecordValidatorBuilder;
use crate::rules::ValidationError;
use crate::validator::ValidateError;
use std::fmt;

/// Anything that can report which fields are set and to what.
///
/// Implementations must omit unset fields entirely rather than mapping
/// them to [`Value::Null`], so that omission and null stay distinguishable.
pub trait PropertySource {
    /// Runtime type of the source.
    fn type_info(&self) -> &'static TypeInfo;

    /// Values of every field that is set on the source.
    fn values(&self) -> FieldValueMap;
}

/// A fully materialized validated type.
///
/// Usually implemented through the [`record!`](crate::record) macro.
pub trait Record: PropertySource + 'static {
    const TYPE: &'static TypeInfo;
}

/// Sparse set of field assignments on a `T` that was never fully built.
///
/// Only fields passed to [`Tracked::set`] are reported by
/// [`PropertySource::values`].
///
/// # Example
///
/// ```rust
/// use fieldcheck::core::{PropertySource, Tracked};
/// use fieldcheck::{field, record};
///
/// record! {
///     pub struct Account {
///         pub login: String,
///         pub display_name: Option<String>,
///     }
/// }
///
/// let mut tracked = Tracked::<Account>::new();
/// tracked.set(field!(Account, login), "ada".to_string());
///
/// assert!(tracked.is_set(field!(Account, login)));
/// assert!(!tracked.is_set(field!(Account, display_name)));
/// assert_eq!(tracked.values().len(), 1);
/// ```
pub struct Tracked<T: Record> {
    assigned: FieldValueMap,
    _record: std::marker::PhantomData<fn() -> T>,
}

impl<T: Record> Tracked<T> {
    pub fn new() -> Self {
        Self {
            assigned: FieldValueMap::new(),
            _record: std::marker::PhantomData,
        }
    }

    /// Assign a field, replacing any earlier assignment.
    pub fn set<V: Into<Value>>(&mut self, field: Field<T, V>, value: V) -> &mut Self {
        self.assigned.insert(field.field_ref(), value.into());
        self
    }

    /// Forget an assignment so the field reads as omitted again.
    pub fn unset<V>(&mut self, field: Field<T, V>) -> &mut Self {
        self.assigned.remove(&field.field_ref());
        self
    }

    pub fn is_set<V>(&self, field: Field<T, V>) -> bool {
        self.assigned.contains_key(&field.field_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Build a one-off validator for `T` and run it over the assignments.
    pub fn validate_with<F>(&self, configure: F) -> Result<Vec<ValidationError>, ValidateError>
    where
        F: FnOnce(RecordValidatorBuilder<T>) -> RecordValidatorBuilder<T>,
    {
        configure(RecordValidatorBuilder::new())
            .build()
            .validate_tracked(self)
    }
}

impl<T: Record> Default for Tracked<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        Self {
            assigned: self.assigned.clone(),
            _record: std::marker::PhantomData,
        }
    }
}

impl<T: Record> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracked")
            .field("type", &T::TYPE.name())
            .field("assigned", &self.assigned)
            .finish()
    }
}

impl<T: Record> PropertySource for Tracked<T> {
    fn type_info(&self) -> &'static TypeInfo {
        T::TYPE
    }

    fn values(&self) -> FieldValueMap {
        self.assigned.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldRef;
    use crate::{field, record};

    record! {
        #[derive(Clone, Debug)]
        struct Note {
            title: String,
            body: Option<String>,
            pinned: bool,
        }
    }

    #[test]
    fn record_reports_every_field() {
        let note = Note {
            title: "groceries".to_string(),
            body: None,
            pinned: true,
        };

        let values = note.values();
        assert_eq!(values.len(), 3);
        assert_eq!(values[&FieldRef::new("Note", "body")], Value::Null);
        assert_eq!(values[&FieldRef::new("Note", "pinned")], Value::Bool(true));
        assert_eq!(note.type_info().name(), "Note");
    }

    #[test]
    fn tracked_reports_only_assigned_fields() {
        let mut tracked = Tracked::<Note>::new();
        assert!(tracked.is_empty());

        tracked
            .set(field!(Note, body), None)
            .set(field!(Note, pinned), false);

        let values = tracked.values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[&FieldRef::new("Note", "body")], Value::Null);
        assert!(!values.contains_key(&FieldRef::new("Note", "title")));
    }

    #[test]
    fn unset_restores_omission() {
        let mut tracked = Tracked::<Note>::new();
        tracked.set(field!(Note, title), "draft".to_string());
        tracked.unset(field!(Note, title));

        assert!(!tracked.is_set(field!(Note, title)));
        assert!(tracked.values().is_empty());
    }
}
