//! Violations reported by rules.

use crate::core::FieldRef;
use serde::Serialize;
use thiserror::Error;

const REQUIRED_FIELD_OMITTED: &str = "Required field was omitted.";
const NULL_FIELD_DETECTED: &str = "Non-nullable field was null.";
const MIN_LENGTH_NOT_FULFILLED: &str = "Minimum length was not fulfilled.";
const DATE_OUT_OF_RANGE: &str = "Date was out of the expected range.";

/// A single rule violation, bound to exactly one field.
///
/// Renders as `"<field>: <description>"`.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ValidationError {
    #[error("{field}: {}", REQUIRED_FIELD_OMITTED)]
    RequiredFieldOmitted { field: FieldRef },

    #[error("{field}: {}", NULL_FIELD_DETECTED)]
    NullFieldDetected { field: FieldRef },

    /// Reported for both minimum and maximum length violations.
    #[error("{field}: {}", MIN_LENGTH_NOT_FULFILLED)]
    MinLengthNotFulfilled { field: FieldRef },

    #[error("{field}: {}", DATE_OUT_OF_RANGE)]
    DateOutOfRange { field: FieldRef },

    /// Violation of an externally attached annotation, message verbatim.
    #[error("{field}: {message}")]
    Annotation { field: FieldRef, message: String },
}

impl ValidationError {
    pub fn field(&self) -> FieldRef {
        match self {
            Self::RequiredFieldOmitted { field }
            | Self::NullFieldDetected { field }
            | Self::MinLengthNotFulfilled { field }
            | Self::DateOutOfRange { field }
            | Self::Annotation { field, .. } => *field,
        }
    }

    /// Human-readable description, without the field name.
    pub fn description(&self) -> &str {
        match self {
            Self::RequiredFieldOmitted { .. } => REQUIRED_FIELD_OMITTED,
            Self::NullFieldDetected { .. } => NULL_FIELD_DETECTED,
            Self::MinLengthNotFulfilled { .. } => MIN_LENGTH_NOT_FULFILLED,
            Self::DateOutOfRange { .. } => DATE_OUT_OF_RANGE,
            Self::Annotation { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: FieldRef = FieldRef::new("Person", "email");

    #[test]
    fn renders_field_name_then_description() {
        let errors = [
            ValidationError::RequiredFieldOmitted { field: EMAIL },
            ValidationError::NullFieldDetected { field: EMAIL },
            ValidationError::MinLengthNotFulfilled { field: EMAIL },
            ValidationError::DateOutOfRange { field: EMAIL },
            ValidationError::Annotation {
                field: EMAIL,
                message: "The field email must be a valid address.".to_string(),
            },
        ];

        for error in &errors {
            assert_eq!(error.to_string(), format!("email: {}", error.description()));
            assert_eq!(error.field(), EMAIL);
        }
    }

    #[test]
    fn required_message_matches() {
        let error = ValidationError::RequiredFieldOmitted { field: EMAIL };
        assert_eq!(error.to_string(), "email: Required field was omitted.");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let error = ValidationError::DateOutOfRange { field: EMAIL };
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["kind"], "DateOutOfRange");
        assert_eq!(json["field"]["name"], "email");
        assert_eq!(json["field"]["declaring_type"], "Person");
    }
}
