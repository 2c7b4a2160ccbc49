//! The logged work session.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::time_range::{TimeRange, total_hours};
use crate::types::{RecordId, ValidationError};

/// Upper bound for manually entered hours on a single entry.
pub const MAX_MANUAL_HOURS: f64 = 24.0;

/// Label shown for records without a project.
pub const NO_PROJECT_LABEL: &str = "No Project";

/// How the duration of a new entry was supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum Hours {
    /// A number typed in directly.
    ///
    /// Building this variant directly only requires a positive value. The
    /// [`MAX_MANUAL_HOURS`] cap is applied by [`Hours::manual`], which form
    /// input goes through, so stored entries of any positive length still load.
    Manual(f64),
    /// Explicit clock-in/clock-out ranges; the duration is their sum.
    Ranges(Vec<TimeRange>),
}

impl Hours {
    /// Validates manually entered hours: above zero and at most a day.
    pub fn manual(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ValidationError::NonPositiveHours { value });
        }
        if value > MAX_MANUAL_HOURS {
            return Err(ValidationError::TooManyHours {
                value,
                max: MAX_MANUAL_HOURS,
            });
        }
        Ok(Self::Manual(value))
    }
}

/// Field values collected from the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub hours: Hours,
    pub description: String,
    pub project: String,
}

/// One logged work session.
///
/// Records are immutable once created. `hours` always equals the sum of the
/// range durations when `time_ranges` is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    id: RecordId,
    date: NaiveDate,
    hours: f64,
    description: String,
    project: String,
    #[serde(rename = "timestamp", with = "timestamp_format")]
    created_at: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_ranges: Option<Vec<TimeRange>>,
}

impl Record {
    /// Validates form input and builds a record.
    ///
    /// Description and project are trimmed. The description must be non-empty and
    /// the resulting hours must be above zero.
    pub fn create(
        new: NewRecord,
        id: RecordId,
        created_at: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let description = new.description.trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            });
        }

        let (hours, time_ranges) = match new.hours {
            Hours::Manual(value) => (value, None),
            Hours::Ranges(ranges) => {
                if ranges.is_empty() {
                    return Err(ValidationError::NoTimeRanges);
                }
                (total_hours(&ranges), Some(ranges))
            }
        };
        if !hours.is_finite() || hours <= 0.0 {
            return Err(ValidationError::NonPositiveHours { value: hours });
        }

        Ok(Self {
            id,
            date: new.date,
            hours,
            description,
            project: new.project.trim().to_string(),
            created_at,
            time_ranges,
        })
    }

    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub const fn hours(&self) -> f64 {
        self.hours
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The project label; empty when unassigned.
    pub fn project(&self) -> &str {
        &self.project
    }

    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn time_ranges(&self) -> Option<&[TimeRange]> {
        self.time_ranges.as_deref()
    }

    /// Whether the record carries a non-blank project.
    pub fn has_project(&self) -> bool {
        !self.project.trim().is_empty()
    }

    /// The project, or [`NO_PROJECT_LABEL`] when unassigned.
    pub fn project_label(&self) -> &str {
        if self.has_project() {
            &self.project
        } else {
            NO_PROJECT_LABEL
        }
    }
}

/// Whether `date` can be written as `YYYY-MM-DD`: a year from 0000 to 9999.
pub fn is_storable_date(date: NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Serde adapter for record dates: strictly `YYYY-MM-DD`.
///
/// chrono alone accepts signed, wider years such as `+262142-12-31`; those are rejected.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::is_storable_date;

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let date = NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)?;
        if !is_storable_date(date) {
            return Err(serde::de::Error::custom(format!(
                "date {s} is outside 0000-01-01..=9999-12-31"
            )));
        }
        Ok(date)
    }
}

/// Serde adapter for creation timestamps: `YYYY-MM-DD HH:MM:SS`.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
