//! Summary command: headline metrics for a date range plus the latest entries.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tl_core::aggregate::{date_bounds, filter_date_range, sort_by_date};
use tl_core::{Record, SortOrder, Summary};
use tl_store::{Persistence, RecordStore};

use super::util::{format_hours, parse_date, truncate};
use crate::cli::SummaryArgs;

/// How many of the latest entries are shown under the metrics.
const RECENT_LIMIT: usize = 10;

/// Width of the description column in the recent-entries table.
const DESCRIPTION_WIDTH: usize = 40;

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    #[serde(flatten)]
    summary: Summary,
    recent: Vec<&'a Record>,
}

/// Builds the report for `[from, to]`.
///
/// Unspecified bounds fall back to the earliest and latest logged dates, so
/// with no arguments the report covers everything.
fn build_report<'a, P: Persistence>(
    store: &'a RecordStore<P>,
    args: &SummaryArgs,
    today: NaiveDate,
) -> Result<SummaryReport<'a>> {
    let bounds = date_bounds(store.all());
    let from = match &args.from {
        Some(raw) => Some(parse_date(raw, today)?),
        None => bounds.map(|(lo, _)| lo),
    };
    let to = match &args.to {
        Some(raw) => Some(parse_date(raw, today)?),
        None => bounds.map(|(_, hi)| hi),
    };

    let in_range = match (from, to) {
        (Some(from), Some(to)) => {
            // A single bound past the data just selects nothing
            if from > to && args.from.is_some() && args.to.is_some() {
                anyhow::bail!("--from {from} is after --to {to}");
            }
            filter_date_range(store.all(), from, to)
        }
        _ => Vec::new(),
    };

    let summary = Summary::from_records(in_range.iter().copied());
    let mut recent = sort_by_date(in_range, SortOrder::NewestFirst);
    recent.truncate(RECENT_LIMIT);

    Ok(SummaryReport {
        from,
        to,
        summary,
        recent,
    })
}

pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &RecordStore<P>,
    args: &SummaryArgs,
    today: NaiveDate,
) -> Result<()> {
    let report = build_report(store, args, today)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
        return Ok(());
    }

    if store.is_empty() {
        writeln!(writer, "No entries yet. Add your first entry with `tl add`.")?;
        return Ok(());
    }

    let (Some(from), Some(to)) = (report.from, report.to) else {
        return Ok(());
    };
    if report.recent.is_empty() {
        writeln!(writer, "No entries between {from} and {to}.")?;
        return Ok(());
    }

    let summary = &report.summary;
    writeln!(writer, "Summary: {from} to {to}")?;
    writeln!(writer)?;
    writeln!(writer, "{:<16}{}", "Total hours:", format_hours(summary.total_hours))?;
    writeln!(
        writer,
        "{:<16}{}",
        "Avg per day:",
        format_hours(summary.avg_hours_per_day)
    )?;
    writeln!(writer, "{:<16}{}", "Days logged:", summary.days_logged)?;
    writeln!(writer, "{:<16}{}", "Total entries:", summary.total_entries)?;
    writeln!(writer)?;

    writeln!(writer, "Recent entries")?;
    for record in &report.recent {
        let first_line = record.description().lines().next().unwrap_or_default();
        writeln!(
            writer,
            "{}  {:>5}  {}  {}",
            record.date(),
            format_hours(record.hours()),
            record.project_label(),
            truncate(first_line, DESCRIPTION_WIDTH)
        )?;
    }

    Ok(())
}
