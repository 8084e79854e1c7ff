//! Configuration error types.

use crate::builder::BuildError;
use thiserror::Error;

/// Errors that can occur when loading or applying a validator config
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config text is not valid JSON or does not match the schema
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// A relative date bound does not land on a representable instant
    #[error("Date bound {days_from_now} days from now is out of range")]
    DateBoundOutOfRange { days_from_now: i64 },

    /// A field named in the config could not be registered
    #[error("Invalid rule registration: {0}")]
    Build(#[from] BuildError),
}
