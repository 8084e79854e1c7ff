//! End-to-end scenarios over tracked and fully built records.

use chrono::{DateTime, Duration, Utc};
use fieldcheck::core::{FieldValueMap, PropertySource, Tracked, TypeInfo, Value};
use fieldcheck::rules::{AnnotationRegistry, Predicate};
use fieldcheck::{
    field, fields, record, BuildError, DateBound, FieldRef, RecordValidator, ValidateError,
    ValidationError, Validator, ValidatorConfig,
};
use std::sync::Arc;
use std::thread;

record! {
    #[derive(Clone, Debug)]
    pub struct Sample {
        pub integer_property: i64,
        pub string_property: Option<String>,
        pub date_time_property: DateTime<Utc>,
    }
}

fn range_annotations() -> Arc<AnnotationRegistry> {
    Arc::new(AnnotationRegistry::new().annotate(
        field!(Sample, integer_property).field_ref(),
        Predicate::new("The field {field} must be between 1 and 19.", |v: &Value| {
            v.as_int().is_some_and(|n| (1..=19).contains(&n))
        }),
    ))
}

#[test]
fn required_reports_only_unassigned_fields() {
    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, string_property), Some("Test string!".to_string()));

    let errors = tracked
        .validate_with(|v| {
            v.required(field!(Sample, string_property))
                .required(field!(Sample, integer_property))
        })
        .unwrap();

    assert_eq!(errors.len(), 1, "Incorrect validation error count!");
    assert_eq!(errors[0].field().name(), "integer_property");
}

#[test]
fn date_range_rejects_values_after_the_maximum() {
    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, date_time_property), Utc::now() - Duration::days(1));

    let errors = tracked
        .validate_with(|v| {
            v.date_range(
                None,
                Some((Utc::now() - Duration::days(2)).into()),
                field!(Sample, date_time_property),
            )
        })
        .unwrap();

    assert_eq!(errors.len(), 1, "Incorrect validation error count!");
    assert_eq!(errors[0].field().name(), "date_time_property");
}

#[test]
fn date_range_accepts_values_before_the_maximum() {
    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, date_time_property), Utc::now() - Duration::days(3));

    let errors = tracked
        .validate_with(|v| {
            v.date_range(
                None,
                Some((Utc::now() - Duration::days(2)).into()),
                field!(Sample, date_time_property),
            )
        })
        .unwrap();

    assert!(errors.is_empty());
}

#[test]
fn annotations_are_honored() {
    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, integer_property), 25);

    let errors = tracked
        .validate_with(|v| v.honor_annotations(range_annotations()))
        .unwrap();

    assert_eq!(errors.len(), 1, "Incorrect validation error count!");
    assert_eq!(errors[0].field().name(), "integer_property");
    assert_eq!(
        errors[0].to_string(),
        "integer_property: The field integer_property must be between 1 and 19."
    );

    tracked.set(field!(Sample, integer_property), 5);

    let errors = tracked
        .validate_with(|v| v.honor_annotations(range_annotations()))
        .unwrap();

    assert!(errors.is_empty(), "Validation error occurred.");
}

#[test]
fn required_comes_before_custom_rule_violations() {
    let validator = RecordValidator::<Sample>::builder()
        .string_length(Some(3), Some(5), field!(Sample, string_property))
        .not_null(field!(Sample, string_property))
        .required(field!(Sample, integer_property))
        .build();

    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, string_property), Some("too long".to_string()));

    let errors = validator.validate_tracked(&tracked).unwrap();

    assert_eq!(
        errors,
        vec![
            ValidationError::RequiredFieldOmitted {
                field: field!(Sample, integer_property).field_ref(),
            },
            ValidationError::MinLengthNotFulfilled {
                field: field!(Sample, string_property).field_ref(),
            },
        ]
    );
}

#[test]
fn null_and_omitted_are_distinguished() {
    let validator = RecordValidator::<Sample>::builder()
        .required_and_not_null(field!(Sample, string_property))
        .build();

    let omitted = validator.validate_tracked(&Tracked::new()).unwrap();

    let mut nulled = Tracked::<Sample>::new();
    nulled.set(field!(Sample, string_property), None);
    let nulled = validator.validate_tracked(&nulled).unwrap();

    assert!(matches!(omitted[..], [ValidationError::RequiredFieldOmitted { .. }]));
    assert!(matches!(nulled[..], [ValidationError::NullFieldDetected { .. }]));
}

#[test]
fn mixed_field_types_register_in_one_call() {
    let validator = RecordValidator::<Sample>::builder()
        .required_and_not_null(fields!(Sample, integer_property, string_property))
        .build();

    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, string_property), None);

    assert_eq!(
        validator.validate_tracked(&tracked).unwrap(),
        vec![
            ValidationError::RequiredFieldOmitted {
                field: FieldRef::new("Sample", "integer_property"),
            },
            ValidationError::NullFieldDetected {
                field: FieldRef::new("Sample", "string_property"),
            },
        ]
    );
}

#[test]
fn far_future_rolling_bounds_do_not_abort_validation() {
    let validator = RecordValidator::<Sample>::builder()
        .date_range(
            Some(DateBound::days_from_now(i64::MIN)),
            Some(DateBound::days_from_now(200_000_000)),
            field!(Sample, date_time_property),
        )
        .build();

    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, date_time_property), Utc::now());

    assert!(validator.validate_tracked(&tracked).unwrap().is_empty());
}

#[test]
fn full_records_supply_every_field() {
    let validator = RecordValidator::<Sample>::builder()
        .required(field!(Sample, integer_property))
        .required(field!(Sample, string_property))
        .not_null(field!(Sample, string_property))
        .build();

    let sample = Sample {
        integer_property: 1,
        string_property: None,
        date_time_property: Utc::now(),
    };

    assert_eq!(
        validator.validate(&sample).unwrap(),
        vec![ValidationError::NullFieldDetected {
            field: FieldRef::new("Sample", "string_property"),
        }]
    );
}

#[test]
fn untyped_validator_rejects_foreign_fields_and_instances() {
    static OTHER: TypeInfo = TypeInfo::new("Other", &["code"]);

    let foreign = Validator::builder(&OTHER).required([FieldRef::new("Sample", "integer_property")]);
    assert!(matches!(
        foreign,
        Err(BuildError::FieldNotInTypeHierarchy { target: "Other", .. })
    ));

    let validator = Validator::builder(&OTHER).build();
    let sample = Tracked::<Sample>::new();
    assert_eq!(
        validator.validate(&sample).unwrap_err(),
        ValidateError::TypeMismatch {
            expected: "Other",
            found: "Sample",
        }
    );
}

#[test]
fn subtype_instances_are_accepted() {
    static BASE: TypeInfo = TypeInfo::new("Base", &["id"]);
    static DERIVED: TypeInfo = TypeInfo::new("Derived", &["label"]).extending(&[&BASE]);

    struct Derived;

    impl PropertySource for Derived {
        fn type_info(&self) -> &'static TypeInfo {
            &DERIVED
        }

        fn values(&self) -> FieldValueMap {
            [(FieldRef::new("Derived", "label"), Value::from("x"))]
                .into_iter()
                .collect()
        }
    }

    let validator = Validator::builder(&BASE)
        .required([FieldRef::new("Base", "id")])
        .unwrap()
        .build();

    assert_eq!(
        validator.validate(&Derived).unwrap(),
        vec![ValidationError::RequiredFieldOmitted {
            field: FieldRef::new("Base", "id"),
        }]
    );
}

#[test]
fn config_and_typed_rules_share_one_validator() {
    let config = ValidatorConfig::from_json(
        r#"{ "required": ["date_time_property"], "string_length": [{ "min": 2, "fields": ["string_property"] }] }"#,
    )
    .unwrap();

    let validator = RecordValidator::<Sample>::builder()
        .apply_config(&config)
        .unwrap()
        .date_range(Some(DateBound::days_from_now(-1)), None, field!(Sample, date_time_property))
        .build();

    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, string_property), Some("x".to_string()));

    let rendered: Vec<String> = validator
        .validate_tracked(&tracked)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        rendered,
        vec![
            "date_time_property: Required field was omitted.",
            "string_property: Minimum length was not fulfilled.",
        ]
    );
}

#[test]
fn violations_serialize_to_a_json_report() {
    let mut tracked = Tracked::<Sample>::new();
    tracked.set(field!(Sample, integer_property), 40);

    let errors = tracked
        .validate_with(|v| {
            v.honor_annotations(range_annotations())
                .required(field!(Sample, date_time_property))
        })
        .unwrap();
    let report = serde_json::to_value(&errors).unwrap();

    assert_eq!(report[0]["kind"], "RequiredFieldOmitted");
    assert_eq!(report[0]["field"]["name"], "date_time_property");
    assert_eq!(report[1]["kind"], "Annotation");
    assert_eq!(
        report[1]["message"],
        "The field integer_property must be between 1 and 19."
    );
}

#[test]
fn one_validator_serves_many_threads() {
    let shared = Arc::new(
        RecordValidator::<Sample>::builder()
            .required_and_not_null(field!(Sample, string_property))
            .string_length(None, Some(4), field!(Sample, string_property))
            .build(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&shared);
            thread::spawn(move || {
                let mut tracked = Tracked::<Sample>::new();
                tracked.set(field!(Sample, string_property), Some("x".repeat(i)));
                validator.validate_tracked(&tracked).unwrap().len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![0, 0, 0, 0, 0, 1, 1, 1]);
}
