//! In-progress time ranges for an entry that has not been submitted yet.

use chrono::NaiveTime;

use crate::time_range::{TimeRange, total_hours};
use crate::types::ValidationError;

/// Time ranges collected while filling in one entry.
///
/// A draft lives only as long as the form session that owns it and is never
/// persisted. Submitting an entry takes the ranges out and leaves it empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeDraft {
    ranges: Vec<TimeRange>,
}

impl RangeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a range, returning the stored value.
    pub fn push(
        &mut self,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<&TimeRange, ValidationError> {
        let range = TimeRange::new(start, end)?;
        self.ranges.push(range);
        Ok(&self.ranges[self.ranges.len() - 1])
    }

    /// Removes the range at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<TimeRange> {
        (index < self.ranges.len()).then(|| self.ranges.remove(index))
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn total_hours(&self) -> f64 {
        total_hours(&self.ranges)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Takes the ranges out for submission, leaving the draft empty.
    pub fn take(&mut self) -> Vec<TimeRange> {
        std::mem::take(&mut self.ranges)
    }
}
