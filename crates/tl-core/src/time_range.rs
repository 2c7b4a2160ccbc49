//! Clock-in/clock-out arithmetic.
//!
//! Only the time-of-day component matters: ranges never wrap past midnight, so a
//! range whose end is not after its start is rejected rather than treated as overnight.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::types::ValidationError;

/// Storage and display format for a time of day, e.g. `09:00 AM`.
pub const TWELVE_HOUR_FORMAT: &str = "%I:%M %p";

/// Accepted input formats, tried in order. Input is upper-cased before parsing.
///
/// All of them stop at minutes, matching the stored form, so a loaded range
/// writes back unchanged.
const INPUT_FORMATS: &[&str] = &["%I:%M %p", "%I:%M%p", "%H:%M"];

/// Returns the number of hours between `start` and `end`.
///
/// Fails when `end <= start`.
#[allow(clippy::cast_precision_loss)]
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> Result<f64, ValidationError> {
    if end <= start {
        return Err(ValidationError::EndNotAfterStart {
            start: start.format(TWELVE_HOUR_FORMAT).to_string(),
            end: end.format(TWELVE_HOUR_FORMAT).to_string(),
        });
    }
    let seconds = end.signed_duration_since(start).num_seconds();
    Ok(seconds as f64 / 3600.0)
}

/// Sums the precomputed hours of each range.
pub fn total_hours(ranges: &[TimeRange]) -> f64 {
    ranges.iter().map(TimeRange::hours).sum()
}

/// Parses a time of day in either `h:MM AM/PM` or 24-hour `HH:MM` form.
pub fn parse_time_of_day(input: &str) -> Option<NaiveTime> {
    let normalized = input.trim().to_uppercase();
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(&normalized, format).ok())
}

/// Normalizes a time string to 12-hour form for display.
///
/// Strings already carrying an AM/PM marker are returned as-is, 24-hour `HH:MM`
/// strings are rewritten, and anything else is passed through unchanged.
pub fn format_12h(input: &str) -> String {
    let upper = input.to_uppercase();
    if upper.contains("AM") || upper.contains("PM") {
        return input.to_string();
    }
    NaiveTime::parse_from_str(input.trim(), "%H:%M").map_or_else(
        |_| input.to_string(),
        |time| time.format(TWELVE_HOUR_FORMAT).to_string(),
    )
}

/// Joins ranges for display: `09:00 AM-12:00 PM | 01:00 PM-05:00 PM`.
pub fn format_ranges(ranges: &[TimeRange]) -> String {
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// A validated clock-in/clock-out pair with its derived duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange", into = "RawTimeRange")]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
    hours: f64,
}

impl TimeRange {
    /// Creates a range, computing its duration.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        let hours = duration_hours(start, end)?;
        Ok(Self { start, end, hours })
    }

    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    pub const fn hours(&self) -> f64 {
        self.hours
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TWELVE_HOUR_FORMAT),
            self.end.format(TWELVE_HOUR_FORMAT)
        )
    }
}

/// Serialized shape of a [`TimeRange`].
///
/// `hours` is recomputed from the times on the way in; the stored value is
/// only compared against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTimeRange {
    start: String,
    end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hours: Option<f64>,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = String;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        let start = parse_time_of_day(&raw.start)
            .ok_or_else(|| format!("invalid start time: {}", raw.start))?;
        let end = parse_time_of_day(&raw.end)
            .ok_or_else(|| format!("invalid end time: {}", raw.end))?;
        let range = Self::new(start, end).map_err(|e| e.to_string())?;
        if let Some(stored) = raw.hours {
            if (stored - range.hours).abs() > 1e-6 {
                tracing::warn!(
                    stored,
                    computed = range.hours,
                    "stored range hours disagree with clock times; using computed value"
                );
            }
        }
        Ok(range)
    }
}

impl From<TimeRange> for RawTimeRange {
    fn from(range: TimeRange) -> Self {
        Self {
            start: range.start.format(TWELVE_HOUR_FORMAT).to_string(),
            end: range.end.format(TWELVE_HOUR_FORMAT).to_string(),
            hours: Some(range.hours),
        }
    }
}
