//! Builder for validators addressed by [`FieldRef`] or field name.

use crate::builder::error::BuildError;
use crate::core::{FieldRef, TypeInfo};
use crate::rules::{
    AnnotationRule, AnnotationSource, DateBound, DateRange, DateRangeRule, HonorAnnotations,
    NotNull, NotNullRule, RequiredRule, Rule, StringLength, StringLengthRule,
};
use crate::validator::Validator;
use std::sync::Arc;

/// Builder for constructing a [`Validator`] with a fluent API.
///
/// Methods taking [`FieldRef`]s check that each field belongs to the
/// target type's hierarchy. The `*_named` variants resolve names on the
/// target type instead and skip that check.
///
/// # Example
///
/// ```rust
/// use fieldcheck::core::{FieldRef, TypeInfo};
/// use fieldcheck::{BuildError, Validator};
///
/// static USER: TypeInfo = TypeInfo::new("User", &["login", "email"]);
///
/// let validator = Validator::builder(&USER)
///     .required([FieldRef::new("User", "login")])?
///     .not_null_named(&["email"])?
///     .string_length_named(Some(3), None, &["login"])?
///     .build();
///
/// assert_eq!(validator.rules().len(), 1);
/// # Ok::<(), BuildError>(())
/// ```
pub struct ValidatorBuilder {
    pub(crate) target: &'static TypeInfo,
    pub(crate) required: RequiredRule,
    pub(crate) not_null: NotNullRule,
    pub(crate) rules: Vec<Box<dyn Rule>>,
}

impl ValidatorBuilder {
    /// Create a builder for validators of `target`.
    pub fn new(target: &'static TypeInfo) -> Self {
        Self {
            target,
            required: RequiredRule::new(target),
            not_null: NotNullRule::new(target, NotNull),
            rules: Vec::new(),
        }
    }

    pub fn target(&self) -> &'static TypeInfo {
        self.target
    }

    /// Mark fields as required: they must be present in the values.
    pub fn required<I>(mut self, fields: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = FieldRef>,
    {
        self.required.fields_mut().add(fields, true)?;
        self.registered("required", self.required.fields().len());
        Ok(self)
    }

    pub fn required_named(mut self, names: &[&str]) -> Result<Self, BuildError> {
        self.required.fields_mut().add_named(names)?;
        self.registered("required", self.required.fields().len());
        Ok(self)
    }

    /// Mark fields as non-nullable: when present, they must not be null.
    pub fn not_null<I>(mut self, fields: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = FieldRef>,
    {
        self.not_null.fields_mut().add(fields, true)?;
        self.registered("not_null", self.not_null.fields().len());
        Ok(self)
    }

    pub fn not_null_named(mut self, names: &[&str]) -> Result<Self, BuildError> {
        self.not_null.fields_mut().add_named(names)?;
        self.registered("not_null", self.not_null.fields().len());
        Ok(self)
    }

    /// Bound the character count of text fields. Either bound may be unset.
    pub fn string_length<I>(
        self,
        min: Option<usize>,
        max: Option<usize>,
        fields: I,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = FieldRef>,
    {
        let mut rule = StringLengthRule::new(self.target, StringLength::new(min, max));
        rule.fields_mut().add(fields, true)?;
        Ok(self.add_rule(rule))
    }

    pub fn string_length_named(
        self,
        min: Option<usize>,
        max: Option<usize>,
        names: &[&str],
    ) -> Result<Self, BuildError> {
        let mut rule = StringLengthRule::new(self.target, StringLength::new(min, max));
        rule.fields_mut().add_named(names)?;
        Ok(self.add_rule(rule))
    }

    /// Bound timestamp fields. Rolling bounds are evaluated on every
    /// validate call.
    pub fn date_range<I>(
        self,
        min: Option<DateBound>,
        max: Option<DateBound>,
        fields: I,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = FieldRef>,
    {
        let mut rule = DateRangeRule::new(self.target, DateRange::new(min, max));
        rule.fields_mut().add(fields, true)?;
        Ok(self.add_rule(rule))
    }

    pub fn date_range_named(
        self,
        min: Option<DateBound>,
        max: Option<DateBound>,
        names: &[&str],
    ) -> Result<Self, BuildError> {
        let mut rule = DateRangeRule::new(self.target, DateRange::new(min, max));
        rule.fields_mut().add_named(names)?;
        Ok(self.add_rule(rule))
    }

    /// Check every field of the target type against the annotations
    /// `source` attaches to it.
    pub fn honor_annotations(self, source: Arc<dyn AnnotationSource>) -> Self {
        let mut rule = AnnotationRule::new(self.target, HonorAnnotations::new(source));
        rule.fields_mut().extend(self.target.all_fields());
        self.add_rule(rule)
    }

    /// Append a rule; it runs after every rule added before it.
    pub fn add_rule<R: Rule + 'static>(self, rule: R) -> Self {
        self.add_rules([Box::new(rule) as Box<dyn Rule>])
    }

    /// Append several rules, keeping their order.
    pub fn add_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Rule>>,
    {
        for rule in rules {
            if rule.target() != self.target {
                tracing::warn!(
                    rule = rule.name(),
                    rule_type = rule.target().name(),
                    type_name = self.target.name(),
                    "rule targets a different type than its validator"
                );
            }
            self.registered(rule.name(), rule.governed_fields().len());
            self.rules.push(rule);
        }
        self
    }

    /// Freeze the configuration into an immutable validator.
    pub fn build(self) -> Validator {
        tracing::debug!(
            type_name = self.target.name(),
            required = self.required.fields().len(),
            not_null = self.not_null.fields().len(),
            rules = self.rules.len(),
            "built validator"
        );
        Validator {
            target: self.target,
            required: self.required,
            not_null: self.not_null,
            rules: self.rules,
        }
    }

    fn registered(&self, rule: &str, fields: usize) {
        tracing::debug!(
            rule,
            type_name = self.target.name(),
            fields,
            "registered rule fields"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValueMap, Value};
    use crate::rules::{AnnotationRegistry, Predicate, ValidationError};

    static ENTITY: TypeInfo = TypeInfo::new("Entity", &["id"]);
    static ARTICLE: TypeInfo =
        TypeInfo::new("Article", &["title", "summary", "published"]).extending(&[&ENTITY]);

    const ID: FieldRef = FieldRef::new("Entity", "id");
    const TITLE: FieldRef = FieldRef::new("Article", "title");
    const SUMMARY: FieldRef = FieldRef::new("Article", "summary");

    #[test]
    fn builder_rejects_fields_outside_the_hierarchy() {
        let result = ValidatorBuilder::new(&ARTICLE).required([FieldRef::new("Comment", "text")]);

        assert!(matches!(
            result,
            Err(BuildError::FieldNotInTypeHierarchy { target: "Article", .. })
        ));
    }

    #[test]
    fn builder_accepts_inherited_fields() {
        let validator = ValidatorBuilder::new(&ARTICLE)
            .required([ID, TITLE])
            .unwrap()
            .build();

        assert_eq!(validator.required().fields().len(), 2);
    }

    #[test]
    fn named_registration_reports_unknown_and_malformed_names() {
        assert!(matches!(
            ValidatorBuilder::new(&ARTICLE).not_null_named(&["author"]),
            Err(BuildError::UnknownField { type_name: "Article", .. })
        ));
        assert!(matches!(
            ValidatorBuilder::new(&ARTICLE).string_length_named(None, Some(3), &["title.len()"]),
            Err(BuildError::InvalidFieldExpression { .. })
        ));
    }

    #[test]
    fn each_length_rule_is_a_separate_custom_rule() {
        let validator = ValidatorBuilder::new(&ARTICLE)
            .string_length(Some(1), None, [TITLE])
            .unwrap()
            .string_length_named(None, Some(3), &["summary"])
            .unwrap()
            .build();

        assert_eq!(validator.rules().len(), 2);
        assert_eq!(validator.rules()[0].governed_fields(), vec![TITLE]);
        assert_eq!(validator.rules()[1].governed_fields(), vec![SUMMARY]);
    }

    #[test]
    fn honor_annotations_governs_every_field() {
        let registry = AnnotationRegistry::new().annotate(
            ID,
            Predicate::new("The field {field} must be positive.", |v: &Value| {
                v.as_int().is_some_and(|n| n > 0)
            }),
        );
        let validator = ValidatorBuilder::new(&ARTICLE)
            .honor_annotations(Arc::new(registry))
            .build();

        assert_eq!(validator.rules()[0].governed_fields().len(), 4);

        let values: FieldValueMap = [(ID, Value::Int(0))].into_iter().collect();
        assert_eq!(
            validator.validate_values(&values).unwrap(),
            vec![ValidationError::Annotation {
                field: ID,
                message: "The field id must be positive.".to_string(),
            }]
        );
    }
}
