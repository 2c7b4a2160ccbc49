//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, NaiveDate, NaiveTime};
use regex::Regex;
use tl_core::record::is_storable_date;
use tl_core::time_range::parse_time_of_day;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// A time of day: `9:00`, `17:30`, `9:00 AM`, `09:00pm`.
const TIME_PATTERN: &str = r"\d{1,2}:\d{2}(?:\s*[AaPp][Mm])?";

/// Pre-compiled regex for `START-END` time ranges.
static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*({TIME_PATTERN})\s*-\s*({TIME_PATTERN})\s*$")).unwrap()
});

/// Conservative bound for relative dates (~1000 years).
const MAX_RELATIVE_DAYS: u64 = 1000 * 365;

/// Parse a date given as YYYY-MM-DD or relative to `today`.
///
/// Supports:
/// - ISO date: "2024-01-15"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
///
/// The result must have a four-digit year so it can be stored as YYYY-MM-DD.
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let date = resolve_date(s.trim(), today)?;
    if !is_storable_date(date) {
        anyhow::bail!("Date out of range: {date}. Years must be between 0000 and 9999");
    }
    Ok(date)
}

fn resolve_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => {
            return today
                .checked_sub_days(Days::new(1))
                .context("date out of range");
        }
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2024-01-15), 'today', 'yesterday', or relative (e.g., '3 days ago')"
        );
    };

    let n: u64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;
    let days = match &caps[2] {
        "day" => n,
        "week" => n.saturating_mul(7),
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if days > MAX_RELATIVE_DAYS {
        anyhow::bail!("Relative date too far back: {s}");
    }

    today
        .checked_sub_days(Days::new(days))
        .context("date out of range")
}

/// A `--range` argument as typed, plus its parsed endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeInput {
    pub start_raw: String,
    pub end_raw: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Parse `START-END`, accepting 12-hour or 24-hour times on either side.
///
/// Ordering is not checked here; the draft rejects an end that does not
/// follow its start.
pub fn parse_range(s: &str) -> Result<RangeInput, String> {
    let caps = RANGE_RE.captures(s).ok_or_else(|| {
        format!("invalid time range '{s}': expected START-END such as 09:00-17:00 or 9:00 AM-5:00 PM")
    })?;

    let parse = |raw: &str| {
        parse_time_of_day(raw).ok_or_else(|| format!("invalid time of day '{raw}'"))
    };
    let start_raw = caps[1].to_string();
    let end_raw = caps[2].to_string();

    Ok(RangeInput {
        start: parse(&start_raw)?,
        end: parse(&end_raw)?,
        start_raw,
        end_raw,
    })
}

/// Formats hours with one decimal place: `7.5h`.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1}h")
}

/// Generates a 10-character bar.
/// Values <5% of max get a single block for visibility.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress_bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value / max;
    let filled = if ratio < 0.05 && value > 0.0 {
        1
    } else {
        (ratio * 10.0).round().clamp(0.0, 10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
