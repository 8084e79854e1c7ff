//! Constraints attached to fields from outside the validator.
//!
//! The validator does not know what an annotation checks. It asks an
//! [`AnnotationSource`] for the messages of every annotation a value
//! violates and reports them verbatim.

use super::{EachField, FieldCheck, ValidationError};
use crate::core::{FieldRef, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Capability that knows which constraints are attached to which field.
pub trait AnnotationSource: Send + Sync {
    /// Messages of every constraint on `field` that `value` violates.
    fn violations_for(&self, field: FieldRef, value: &Value) -> Vec<String>;
}

/// A single externally declared constraint.
pub trait Annotation: Send + Sync {
    fn is_valid(&self, value: &Value) -> bool;

    /// Message reported when the constraint is violated.
    fn format_message(&self, field_name: &str) -> String;
}

/// Annotation built from a predicate and a message template.
///
/// `{field}` in the template is replaced with the field name.
pub struct Predicate<F> {
    predicate: F,
    template: String,
}

impl<F> Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    pub fn new(template: impl Into<String>, predicate: F) -> Self {
        Self {
            predicate,
            template: template.into(),
        }
    }
}

impl<F> Annotation for Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn is_valid(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn format_message(&self, field_name: &str) -> String {
        self.template.replace("{field}", field_name)
    }
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// In-memory table of annotations per field.
///
/// # Example
///
/// ```rust
/// use fieldcheck::core::{FieldRef, Value};
/// use fieldcheck::rules::{AnnotationRegistry, AnnotationSource, Predicate};
///
/// const AGE: FieldRef = FieldRef::new("Person", "age");
///
/// let registry = AnnotationRegistry::new().annotate(
///     AGE,
///     Predicate::new("The field {field} must be between 1 and 19.", |v: &Value| {
///         v.as_int().is_some_and(|n| (1..=19).contains(&n))
///     }),
/// );
///
/// assert!(registry.violations_for(AGE, &Value::Int(5)).is_empty());
/// assert_eq!(
///     registry.violations_for(AGE, &Value::Int(25)),
///     vec!["The field age must be between 1 and 19.".to_string()]
/// );
/// ```
#[derive(Clone, Default)]
pub struct AnnotationRegistry {
    annotations: HashMap<FieldRef, Vec<Arc<dyn Annotation>>>,
}

impl AnnotationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an annotation to a field. Annotations on the same field are
    /// checked in the order they were attached.
    pub fn annotate<A: Annotation + 'static>(mut self, field: FieldRef, annotation: A) -> Self {
        self.annotations
            .entry(field)
            .or_default()
            .push(Arc::new(annotation));
        self
    }

    pub fn annotations_for(&self, field: &FieldRef) -> &[Arc<dyn Annotation>] {
        self.annotations
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl AnnotationSource for AnnotationRegistry {
    fn violations_for(&self, field: FieldRef, value: &Value) -> Vec<String> {
        self.annotations_for(&field)
            .iter()
            .filter(|annotation| !annotation.is_valid(value))
            .map(|annotation| annotation.format_message(field.name()))
            .collect()
    }
}

impl fmt::Debug for AnnotationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .annotations
            .iter()
            .map(|(field, list)| (field.name(), list.len()))
            .collect();
        f.debug_struct("AnnotationRegistry")
            .field("annotations", &counts)
            .finish()
    }
}

/// Field check that defers to an [`AnnotationSource`].
#[derive(Clone)]
pub struct HonorAnnotations {
    source: Arc<dyn AnnotationSource>,
}

impl HonorAnnotations {
    pub fn new(source: Arc<dyn AnnotationSource>) -> Self {
        Self { source }
    }
}

impl FieldCheck for HonorAnnotations {
    type Value = Value;

    const NAME: &'static str = "annotations";

    fn check(&self, field: FieldRef, value: Option<&Value>) -> Vec<ValidationError> {
        let messages = match value {
            Some(value) => self.source.violations_for(field, value),
            None => self.source.violations_for(field, &Value::Null),
        };
        messages
            .into_iter()
            .map(|message| ValidationError::Annotation { field, message })
            .collect()
    }
}

pub type AnnotationRule = EachField<HonorAnnotations>;
