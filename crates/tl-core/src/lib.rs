//! Core domain logic for the time log.
//!
//! This crate contains the fundamental types and logic for:
//! - Records: one logged work session, validated at creation
//! - Time ranges: clock-in/clock-out arithmetic and 12-hour formatting
//! - Drafts: ranges collected for an entry that has not been submitted
//! - Aggregation: filtering, search, sorting, summaries, and grouped totals

pub mod aggregate;
pub mod draft;
pub mod record;
pub mod time_range;
mod types;

pub use aggregate::{DayTotal, ProjectTotal, SortOrder, Summary, WeekSummary};
pub use draft::RangeDraft;
pub use record::{Hours, NewRecord, Record};
pub use time_range::TimeRange;
pub use types::{RecordId, ValidationError};
