//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors raised while building records and time ranges.
///
/// A record that fails validation is never created, so the store is left untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// Hours must be a finite value above zero.
    #[error("hours must be greater than zero, got {value}")]
    NonPositiveHours { value: f64 },

    /// Manually entered hours exceed a single day.
    #[error("hours cannot exceed {max}, got {value}")]
    TooManyHours { value: f64, max: f64 },

    /// A range-based entry was submitted without any ranges.
    #[error("add at least one time range or enter hours")]
    NoTimeRanges,

    /// A clock-out time that does not come after the clock-in time.
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart { start: String, end: String },
}

/// A validated record identifier.
///
/// Record IDs must be non-empty strings. Fresh IDs are random UUIDs, which keeps
/// identity independent of the second-resolution creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::Empty { field: "record ID" });
        }
        Ok(Self(id))
    }

    /// Generates a fresh random ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first six characters, used when listing records.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(6)
            .map_or(self.0.len(), |(idx, _)| idx);
        &self.0[..end]
    }
}

impl TryFrom<String> for RecordId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
