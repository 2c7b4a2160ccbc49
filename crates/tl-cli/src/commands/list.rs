//! List command for browsing and searching entries.

use std::io::{self, Write};

use anyhow::Result;
use tl_core::aggregate::{search, sort_by_date};
use tl_core::time_range::format_ranges;
use tl_core::{Record, SortOrder};
use tl_store::{Persistence, RecordStore};

use super::util::format_hours;
use crate::cli::ListArgs;

pub fn run<W: Write, P: Persistence>(
    writer: &mut W,
    store: &RecordStore<P>,
    args: &ListArgs,
) -> Result<()> {
    let query = args.search.as_deref().unwrap_or_default();
    let order = if args.oldest_first {
        SortOrder::OldestFirst
    } else {
        SortOrder::NewestFirst
    };
    let entries = sort_by_date(search(store.all(), query), order);

    if args.json {
        serde_json::to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)?;
        return Ok(());
    }

    if store.is_empty() {
        writeln!(writer, "No entries yet. Add your first entry with `tl add`.")?;
        return Ok(());
    }
    if entries.is_empty() {
        writeln!(writer, "No entries match '{}'.", query.trim())?;
        return Ok(());
    }

    let noun = if entries.len() == 1 { "entry" } else { "entries" };
    writeln!(writer, "{} {noun} found", entries.len())?;
    for record in entries {
        writeln!(writer)?;
        write_entry(writer, record)?;
    }
    Ok(())
}

/// Writes one entry: a heading line, the description, then any time ranges.
fn write_entry<W: Write>(writer: &mut W, record: &Record) -> io::Result<()> {
    writeln!(
        writer,
        "{}  {:>5}  {}  [{}]",
        record.date(),
        format_hours(record.hours()),
        record.project_label(),
        record.id().short()
    )?;
    for line in record.description().lines() {
        writeln!(writer, "    {line}")?;
    }
    if let Some(ranges) = record.time_ranges() {
        writeln!(writer, "    Time: {}", format_ranges(ranges))?;
    }
    Ok(())
}
