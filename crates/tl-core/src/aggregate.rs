//! Derived views over a snapshot of records.
//!
//! Every function here is pure: it borrows records, never mutates them, and treats
//! an empty snapshot as valid input that yields empty or zero-valued results.
//!
//! # Weeks
//!
//! Weekly grouping uses ISO weeks: a week starts on Monday and ends on Sunday,
//! regardless of locale.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::record::Record;

/// Order for date-sorted listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most recent date first. Default for every listing.
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Keeps records whose date falls within `[from, to]`, both ends inclusive.
pub fn filter_date_range<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<&'a Record> {
    records
        .into_iter()
        .filter(|r| r.date() >= from && r.date() <= to)
        .collect()
}

/// Case-insensitive substring search over project and description.
///
/// A blank query matches everything.
pub fn search<'a>(records: impl IntoIterator<Item = &'a Record>, query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|r| {
            r.project().to_lowercase().contains(&needle)
                || r.description().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sorts by date. The sort is stable: records sharing a date keep their input order.
pub fn sort_by_date<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    order: SortOrder,
) -> Vec<&'a Record> {
    let mut sorted: Vec<&Record> = records.into_iter().collect();
    match order {
        SortOrder::NewestFirst => sorted.sort_by(|a, b| b.date().cmp(&a.date())),
        SortOrder::OldestFirst => sorted.sort_by_key(|r| r.date()),
    }
    sorted
}

/// Earliest and latest logged dates, or `None` for an empty snapshot.
pub fn date_bounds<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> Option<(NaiveDate, NaiveDate)> {
    records.into_iter().fold(None, |bounds, r| {
        let date = r.date();
        Some(bounds.map_or((date, date), |(lo, hi): (NaiveDate, NaiveDate)| {
            (lo.min(date), hi.max(date))
        }))
    })
}

/// Headline metrics for a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_hours: f64,
    /// Total hours divided by the number of distinct dates, not by record count.
    pub avg_hours_per_day: f64,
    /// Number of distinct dates.
    pub days_logged: usize,
    pub total_entries: usize,
}

impl Summary {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut total_hours = 0.0;
        let mut total_entries = 0;
        let mut days = HashSet::new();
        for record in records {
            total_hours += record.hours();
            total_entries += 1;
            days.insert(record.date());
        }

        let days_logged = days.len();
        let avg_hours_per_day = if days_logged == 0 {
            0.0
        } else {
            total_hours / days_logged as f64
        };

        Self {
            total_hours,
            avg_hours_per_day,
            days_logged,
            total_entries,
        }
    }
}

/// Hours logged on one date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayTotal {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Sums hours per date, ascending by date.
pub fn group_by_day<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<DayTotal> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *days.entry(record.date()).or_default() += record.hours();
    }
    days.into_iter()
        .map(|(date, hours)| DayTotal { date, hours })
        .collect()
}

/// Hours logged against one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTotal {
    pub project: String,
    pub hours: f64,
}

/// Sums hours per project, largest first.
///
/// Records without a project are left out rather than bucketed together.
/// Ties are ordered by project name.
pub fn group_by_project<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<ProjectTotal> {
    let mut projects: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records.into_iter().filter(|r| r.has_project()) {
        *projects.entry(record.project()).or_default() += record.hours();
    }

    let mut totals: Vec<ProjectTotal> = projects
        .into_iter()
        .map(|(project, hours)| ProjectTotal {
            project: project.to_string(),
            hours,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.hours
            .total_cmp(&a.hours)
            .then_with(|| a.project.cmp(&b.project))
    });
    totals
}

/// Totals for one Monday-to-Sunday week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekSummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Rounded to one decimal.
    pub total_hours: f64,
    /// Total divided by distinct days worked, rounded to one decimal.
    pub avg_hours_per_day: f64,
    pub days_worked: usize,
}

impl WeekSummary {
    /// `2024-01-01/2024-01-07`
    pub fn label(&self) -> String {
        format!(
            "{}/{}",
            self.week_start.format("%Y-%m-%d"),
            self.week_end.format("%Y-%m-%d")
        )
    }
}

/// Returns the Monday that starts the week containing `date`.
///
/// Clamped to [`NaiveDate::MIN`] for the first partial week chrono can represent.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_monday = date.weekday().num_days_from_monday();
    date.checked_sub_days(Days::new(u64::from(days_since_monday)))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns the Sunday that ends the week starting at `start`, clamped to [`NaiveDate::MAX`].
fn week_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}

/// Partitions records into ISO weeks, ascending.
#[allow(clippy::cast_precision_loss)]
pub fn group_by_week<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<WeekSummary> {
    let mut weeks: BTreeMap<NaiveDate, (f64, BTreeSet<NaiveDate>)> = BTreeMap::new();
    for record in records {
        let (hours, days) = weeks.entry(week_start(record.date())).or_default();
        *hours += record.hours();
        days.insert(record.date());
    }

    weeks
        .into_iter()
        .map(|(start, (hours, days))| {
            let days_worked = days.len();
            WeekSummary {
                week_start: start,
                week_end: week_end(start),
                total_hours: round1(hours),
                avg_hours_per_day: round1(hours / days_worked as f64),
                days_worked,
            }
        })
        .collect()
}

/// Rounds to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
