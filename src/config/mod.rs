//! Validator configuration loaded from data.
//!
//! A [`ValidatorConfig`] names fields as strings, so they are resolved on
//! the target type when the config is applied and any mistake surfaces
//! as a [`ConfigError`] at that point.
//!
//! ```json
//! {
//!   "required": ["login"],
//!   "not_null": ["login", "email"],
//!   "string_length": [{ "min": 3, "max": 16, "fields": ["login"] }],
//!   "date_range": [{
//!     "min": "2020-01-01T00:00:00Z",
//!     "max": { "days_from_now": 0 },
//!     "fields": ["born"]
//!   }]
//! }
//! ```

use crate::builder::ValidatorBuilder;
use crate::core::TypeInfo;
use crate::rules::DateBound;
use crate::validator::Validator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Declarative description of the rules of one validator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Fields that must be present
    #[serde(default)]
    pub required: Vec<String>,

    /// Fields that must not be null when present
    #[serde(default)]
    pub not_null: Vec<String>,

    #[serde(default)]
    pub string_length: Vec<StringLengthConfig>,

    #[serde(default)]
    pub date_range: Vec<DateRangeConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringLengthConfig {
    #[serde(default)]
    pub min: Option<usize>,
    #[serde(default)]
    pub max: Option<usize>,
    pub fields: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRangeConfig {
    #[serde(default)]
    pub min: Option<DateBoundConfig>,
    #[serde(default)]
    pub max: Option<DateBoundConfig>,
    pub fields: Vec<String>,
}

/// A fixed RFC 3339 instant, or an offset in days from the time of
/// validation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateBoundConfig {
    Fixed(DateTime<Utc>),
    Relative { days_from_now: i64 },
}

impl TryFrom<DateBoundConfig> for DateBound {
    type Error = ConfigError;

    fn try_from(config: DateBoundConfig) -> Result<Self, Self::Error> {
        match config {
            DateBoundConfig::Fixed(at) => Ok(DateBound::Fixed(at)),
            DateBoundConfig::Relative { days_from_now } => {
                DateBound::checked_days_from_now(days_from_now)
                    .ok_or(ConfigError::DateBoundOutOfRange { days_from_now })
            }
        }
    }
}

impl ValidatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::DeserializationFailed(e.to_string()))
    }

    /// Register every configured rule on `builder`, in the order required,
    /// not-null, string length entries, date range entries.
    pub fn apply(&self, builder: ValidatorBuilder) -> Result<ValidatorBuilder, ConfigError> {
        let mut builder = builder
            .required_named(&names(&self.required))?
            .not_null_named(&names(&self.not_null))?;

        for entry in &self.string_length {
            builder = builder.string_length_named(entry.min, entry.max, &names(&entry.fields))?;
        }
        for entry in &self.date_range {
            builder = builder.date_range_named(
                entry.min.map(DateBound::try_from).transpose()?,
                entry.max.map(DateBound::try_from).transpose()?,
                &names(&entry.fields),
            )?;
        }

        tracing::debug!(
            type_name = builder.target().name(),
            string_length = self.string_length.len(),
            date_range = self.date_range.len(),
            "applied validator config"
        );
        Ok(builder)
    }

    /// Build a validator for `target` from this config alone.
    pub fn build(&self, target: &'static TypeInfo) -> Result<Validator, ConfigError> {
        Ok(self.apply(ValidatorBuilder::new(target))?.build())
    }
}

fn names(fields: &[String]) -> Vec<&str> {
    fields.iter().map(String::as_str).collect()
}
