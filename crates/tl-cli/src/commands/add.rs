//! Add command for logging a new entry.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use tl_core::time_range::format_12h;
use tl_core::{Hours, NewRecord, RangeDraft, Record, RecordId};
use tl_store::{Persistence, RecordStore};

use super::util::{format_hours, parse_date};
use crate::cli::AddArgs;

/// Validates the arguments, stores the entry, and prints a confirmation.
///
/// `now` stamps the entry and anchors relative dates; the entry date defaults
/// to `now`'s date.
pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &mut RecordStore<P>,
    args: &AddArgs,
    now: NaiveDateTime,
) -> Result<()> {
    let today = now.date();
    let date = match &args.date {
        Some(raw) => parse_date(raw, today)?,
        None => today,
    };

    let hours = if args.ranges.is_empty() {
        let value = args
            .hours
            .context("either --hours or at least one --range is required")?;
        Hours::manual(value)?
    } else {
        let mut draft = RangeDraft::new();
        for input in &args.ranges {
            draft.push(input.start, input.end).with_context(|| {
                format!(
                    "rejected range {} - {}",
                    format_12h(&input.start_raw),
                    format_12h(&input.end_raw)
                )
            })?;
        }
        tracing::debug!(
            ranges = draft.ranges().len(),
            total = draft.total_hours(),
            "collected time ranges"
        );
        Hours::Ranges(draft.take())
    };

    let record = Record::create(
        NewRecord {
            date,
            hours,
            description: args.description.clone(),
            project: args.project.clone(),
        },
        RecordId::generate(),
        now,
    )?;

    let confirmation = format_confirmation(&record);
    store.add(record).context("failed to save entry")?;
    write!(writer, "{confirmation}")?;
    Ok(())
}

fn format_confirmation(record: &Record) -> String {
    let mut output = format!(
        "Logged {} on {} for {} [{}]\n",
        format_hours(record.hours()),
        record.date(),
        record.project_label(),
        record.id().short()
    );
    for range in record.time_ranges().unwrap_or_default() {
        output.push_str(&format!("  {range} ({})\n", format_hours(range.hours())));
    }
    output
}
